//! Board coordinates.

use serde::{Deserialize, Serialize};

/// An integer board coordinate.
///
/// `x` is the column and `y` the row. Points may lie off the board; use
/// `Board::is_within_board` before indexing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another point.
    #[must_use]
    pub const fn manhattan(self, other: Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True if both points share a row or a column.
    #[must_use]
    pub const fn is_straight_line_to(self, other: Point) -> bool {
        self.x == other.x || self.y == other.y
    }

    /// Offset by a delta.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The four orthogonal neighbours in left, right, up, down order.
    #[must_use]
    pub fn neighbours(self) -> [Point; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan() {
        let a = Point::new(1, 3);
        let b = Point::new(4, 1);
        assert_eq!(a.manhattan(b), 5);
        assert_eq!(b.manhattan(a), 5);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn test_straight_line() {
        let origin = Point::new(2, 2);
        assert!(origin.is_straight_line_to(Point::new(2, 5)));
        assert!(origin.is_straight_line_to(Point::new(0, 2)));
        assert!(!origin.is_straight_line_to(Point::new(3, 3)));
    }

    #[test]
    fn test_neighbours_order() {
        let n = Point::new(1, 1).neighbours();
        assert_eq!(n[0], Point::new(0, 1));
        assert_eq!(n[1], Point::new(2, 1));
        assert_eq!(n[2], Point::new(1, 0));
        assert_eq!(n[3], Point::new(1, 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Point::new(3, 4)), "(3, 4)");
    }
}
