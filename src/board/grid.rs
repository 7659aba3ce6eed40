//! The board grid.
//!
//! A square grid of cells indexed `[y][x]` with a single river column in the
//! middle. The board only knows which occupant sits in which cell; unit
//! locations are kept in step by `MatchState`, which is the only caller of
//! [`Board::set_occupant`] during a match.

use serde::{Deserialize, Serialize};

use crate::core::config::BoardSize;
use crate::core::point::Point;
use crate::error::{ConfigurationError, OutOfBounds};
use crate::units::UnitId;

/// Neutral scenery. Blocks movement and placement, never interacts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Landscape {
    Rock,
    Tree,
}

impl Landscape {
    /// Display tag.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Landscape::Rock => "🪨",
            Landscape::Tree => "🌳",
        }
    }
}

/// Anything that can stand in a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    /// A unit, by arena id.
    Unit(UnitId),
    /// Ownerless scenery.
    Landscape(Landscape),
}

impl Occupant {
    /// The unit id if this occupant is a unit.
    #[must_use]
    pub const fn unit(self) -> Option<UnitId> {
        match self {
            Occupant::Unit(id) => Some(id),
            Occupant::Landscape(_) => None,
        }
    }
}

/// One square of the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    point: Point,
    is_river: bool,
    occupant: Option<Occupant>,
}

impl Cell {
    /// Coordinate of this cell.
    #[must_use]
    pub fn point(&self) -> Point {
        self.point
    }

    /// True for cells in the river column.
    #[must_use]
    pub fn is_river(&self) -> bool {
        self.is_river
    }

    /// Whatever stands here.
    #[must_use]
    pub fn occupant(&self) -> Option<Occupant> {
        self.occupant
    }

    /// The unit standing here, if any.
    #[must_use]
    pub fn unit(&self) -> Option<UnitId> {
        self.occupant.and_then(Occupant::unit)
    }

    /// True if nothing stands here.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// The playing field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: BoardSize,
    river_column: i32,
    cells: Vec<Vec<Cell>>,
}

impl Board {
    /// Build an empty board with the river in the middle column.
    #[must_use]
    pub fn new(size: BoardSize) -> Self {
        let n = size.cells();
        let river_column = size.river_column();
        let cells = (0..n)
            .map(|y| {
                (0..n)
                    .map(|x| Cell {
                        point: Point::new(x, y),
                        is_river: x == river_column,
                        occupant: None,
                    })
                    .collect()
            })
            .collect();
        Self {
            size,
            river_column,
            cells,
        }
    }

    /// Build from a raw side length; only 5 and 7 are accepted.
    pub fn initialize(size: u8) -> Result<Self, ConfigurationError> {
        Ok(Self::new(BoardSize::try_from(size)?))
    }

    /// Board dimensions.
    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Side length in cells.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.size.cells()
    }

    /// Index of the river column.
    #[must_use]
    pub fn river_column(&self) -> i32 {
        self.river_column
    }

    /// True if the point names a cell.
    #[must_use]
    pub fn is_within_board(&self, point: Point) -> bool {
        let n = self.width();
        (0..n).contains(&point.x) && (0..n).contains(&point.y)
    }

    /// True if the point lies in the river column.
    #[must_use]
    pub fn is_river(&self, point: Point) -> bool {
        point.x == self.river_column
    }

    /// True iff `start` and `end` lie on strictly opposite banks.
    ///
    /// The river column itself counts as part of the left bank.
    #[must_use]
    pub fn is_crossing_river(&self, start: Point, end: Point) -> bool {
        (start.x <= self.river_column) != (end.x <= self.river_column)
    }

    /// True if a pair of points is separated by the river.
    #[must_use]
    pub fn is_separated_by_river(&self, a: Point, b: Point) -> bool {
        self.is_crossing_river(a, b)
    }

    /// The cell at a point.
    pub fn cell(&self, point: Point) -> Result<&Cell, OutOfBounds> {
        if !self.is_within_board(point) {
            return Err(OutOfBounds(point));
        }
        Ok(&self.cells[point.y as usize][point.x as usize])
    }

    /// The occupant at a point; `None` for empty or off-board points.
    #[must_use]
    pub fn occupant(&self, point: Point) -> Option<Occupant> {
        self.cell(point).ok().and_then(Cell::occupant)
    }

    /// The unit at a point; `None` for empty, landscape or off-board points.
    #[must_use]
    pub fn unit_at(&self, point: Point) -> Option<UnitId> {
        self.occupant(point).and_then(Occupant::unit)
    }

    /// True if the point is on the board and nothing stands there.
    #[must_use]
    pub fn is_empty(&self, point: Point) -> bool {
        self.cell(point).map(Cell::is_empty).unwrap_or(false)
    }

    /// Replace the occupant of a cell, returning the previous one.
    ///
    /// Callers are responsible for updating the unit's own `location`; in a
    /// match this goes through `MatchState`.
    pub fn set_occupant(&mut self, point: Point, occupant: Option<Occupant>) -> Result<Option<Occupant>, OutOfBounds> {
        if !self.is_within_board(point) {
            return Err(OutOfBounds(point));
        }
        let cell = &mut self.cells[point.y as usize][point.x as usize];
        Ok(std::mem::replace(&mut cell.occupant, occupant))
    }

    /// True if every cell strictly between `start` and `end` is empty.
    ///
    /// Only defined for straight-line paths; diagonal or off-board paths are
    /// never clear.
    #[must_use]
    pub fn is_path_clear(&self, start: Point, end: Point) -> bool {
        if !start.is_straight_line_to(end) || !self.is_within_board(start) || !self.is_within_board(end) {
            return false;
        }
        let dx = (end.x - start.x).signum();
        let dy = (end.y - start.y).signum();
        let mut current = start.offset(dx, dy);
        while current != end {
            if !self.is_empty(current) {
                return false;
            }
            current = current.offset(dx, dy);
        }
        true
    }

    /// Iterate over all cells row by row.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    /// Iterate over every unit on the board, in row-major order.
    pub fn units(&self) -> impl Iterator<Item = (Point, UnitId)> + '_ {
        self.cells().filter_map(|cell| cell.unit().map(|id| (cell.point, id)))
    }

    /// Clear all occupancy.
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            cell.occupant = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_sizes() {
        let board = Board::initialize(5).unwrap();
        assert_eq!(board.width(), 5);
        assert_eq!(board.river_column(), 2);
        assert_eq!(board.cells().count(), 25);

        let board = Board::initialize(7).unwrap();
        assert_eq!(board.river_column(), 3);
        assert_eq!(board.cells().filter(|c| c.is_river()).count(), 7);

        assert_eq!(Board::initialize(6), Err(ConfigurationError::InvalidBoardSize(6)));
    }

    #[test]
    fn test_cells_know_their_coordinates() {
        let board = Board::new(BoardSize::Five);
        for cell in board.cells() {
            assert_eq!(board.cell(cell.point()).unwrap().point(), cell.point());
        }
    }

    #[test]
    fn test_within_board() {
        let board = Board::new(BoardSize::Five);
        assert!(board.is_within_board(Point::new(0, 0)));
        assert!(board.is_within_board(Point::new(4, 4)));
        assert!(!board.is_within_board(Point::new(5, 0)));
        assert!(!board.is_within_board(Point::new(0, -1)));
    }

    #[test]
    fn test_crossing_river() {
        let board = Board::new(BoardSize::Seven);
        assert!(board.is_crossing_river(Point::new(2, 0), Point::new(4, 0)));
        assert!(board.is_crossing_river(Point::new(4, 0), Point::new(3, 0)));
        assert!(!board.is_crossing_river(Point::new(2, 0), Point::new(3, 0)));
        assert!(!board.is_crossing_river(Point::new(4, 0), Point::new(6, 5)));
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut board = Board::new(BoardSize::Five);
        let outside = Point::new(9, 9);
        assert_eq!(board.cell(outside).err(), Some(OutOfBounds(outside)));
        assert_eq!(
            board.set_occupant(outside, Some(Occupant::Unit(UnitId::new(1)))),
            Err(OutOfBounds(outside))
        );
    }

    #[test]
    fn test_set_occupant_returns_previous() {
        let mut board = Board::new(BoardSize::Five);
        let p = Point::new(1, 1);
        let unit = Occupant::Unit(UnitId::new(3));

        assert_eq!(board.set_occupant(p, Some(unit)), Ok(None));
        assert_eq!(board.unit_at(p), Some(UnitId::new(3)));
        assert_eq!(board.set_occupant(p, None), Ok(Some(unit)));
        assert!(board.is_empty(p));
    }

    #[test]
    fn test_path_clear() {
        let mut board = Board::new(BoardSize::Seven);
        let start = Point::new(0, 3);
        assert!(board.is_path_clear(start, Point::new(2, 3)));

        board
            .set_occupant(Point::new(1, 3), Some(Occupant::Landscape(Landscape::Rock)))
            .unwrap();
        assert!(!board.is_path_clear(start, Point::new(2, 3)));
        // adjacent destination has no intermediate cells
        assert!(board.is_path_clear(start, Point::new(1, 3)));
        // diagonals are never clear
        assert!(!board.is_path_clear(start, Point::new(1, 4)));
    }

    #[test]
    fn test_units_iterator_skips_landscape() {
        let mut board = Board::new(BoardSize::Five);
        board
            .set_occupant(Point::new(0, 0), Some(Occupant::Landscape(Landscape::Tree)))
            .unwrap();
        board
            .set_occupant(Point::new(4, 4), Some(Occupant::Unit(UnitId::new(8))))
            .unwrap();
        let units: Vec<_> = board.units().collect();
        assert_eq!(units, vec![(Point::new(4, 4), UnitId::new(8))]);

        board.clear();
        assert_eq!(board.units().count(), 0);
    }
}
