//! Flee resolution.
//!
//! A fleeing unit steps one cell away from its pursuer, along the axis of
//! greater displacement first and the perpendicular axis second. Fleeing is
//! an involuntary relocation: it does not spend the unit's action and does
//! not start another detection pass. Each unit flees at most once per turn.

use log::{debug, warn};
use smallvec::SmallVec;

use crate::core::point::Point;
use crate::core::state::MatchState;
use crate::units::{Unit, UnitId};

/// Cells one step away from `pursuer`, preferred first.
///
/// A zero displacement on an axis yields no candidate on that axis.
#[must_use]
pub fn flee_candidates(from: Point, pursuer: Point) -> SmallVec<[Point; 2]> {
    let dx = from.x - pursuer.x;
    let dy = from.y - pursuer.y;
    let horizontal = from.offset(dx.signum(), 0);
    let vertical = from.offset(0, dy.signum());
    let ordered = if dx.abs() >= dy.abs() {
        [horizontal, vertical]
    } else {
        [vertical, horizontal]
    };
    ordered.into_iter().filter(|&p| p != from).collect()
}

/// True if `unit` may flee onto `to`.
#[must_use]
pub fn is_valid_flee_destination(state: &MatchState, unit: &Unit, to: Point) -> bool {
    let Some(from) = unit.location else {
        return false;
    };
    let board = state.board();
    board.is_empty(to)
        && !board.is_river(to)
        && (unit.crosses_river_freely || !board.is_crossing_river(from, to))
}

/// Make a unit flee if it is marked as fleeing and has not fled this turn.
///
/// Returns the cell it fled to. The flee mark is cleared and the unit counts
/// as having fled whether or not a free cell was found.
pub fn resolve_flee(state: &mut MatchState, id: UnitId) -> Option<Point> {
    let unit = state.unit(id)?;
    let pursuer = unit.fleeing_from?;

    let destination = match (unit.has_fled_this_turn, unit.location) {
        (false, Some(from)) => {
            let attempts = state.config().flee_attempts as usize;
            match state.unit(pursuer).and_then(|p| p.location) {
                Some(pursuer_at) => {
                    let found = flee_candidates(from, pursuer_at)
                        .into_iter()
                        .take(attempts)
                        .find(|&to| is_valid_flee_destination(state, unit, to));
                    if found.is_none() {
                        warn!("{} could not flee from {} after {} attempts", unit.name, pursuer, attempts);
                    }
                    found
                }
                None => None,
            }
        }
        _ => {
            if let Some(unit) = state.unit_mut(id) {
                unit.fleeing_from = None;
            }
            return None;
        }
    };

    if let Some(to) = destination {
        if state.relocate_unit(id, to).is_ok() {
            debug!("{id} fled from {pursuer} to {to}");
        }
    }
    if let Some(unit) = state.unit_mut(id) {
        unit.fleeing_from = None;
        unit.has_fled_this_turn = true;
    }
    destination
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Landscape, Occupant};
    use crate::core::config::{BoardSize, MatchConfig};
    use crate::core::player::PlayerId;
    use crate::units::Species;

    fn state() -> MatchState {
        MatchState::new(MatchConfig::new(BoardSize::Seven))
    }

    #[test]
    fn test_candidates_prefer_larger_axis() {
        let from = Point::new(2, 2);
        assert_eq!(
            flee_candidates(from, Point::new(1, 1)).as_slice(),
            &[Point::new(3, 2), Point::new(2, 3)]
        );
        assert_eq!(
            flee_candidates(from, Point::new(2, 4)).as_slice(),
            &[Point::new(2, 1)]
        );
    }

    #[test]
    fn test_flee_moves_away() {
        let mut state = state();
        let tiger = state.spawn_unit(Species::Tiger, PlayerId::FIRST, Point::new(1, 4)).unwrap();
        let squirrel = state.spawn_unit(Species::Squirrel, PlayerId::SECOND, Point::new(1, 3)).unwrap();
        state.unit_mut(squirrel).unwrap().fleeing_from = Some(tiger);

        assert_eq!(resolve_flee(&mut state, squirrel), Some(Point::new(1, 2)));
        assert_eq!(state.board().unit_at(Point::new(1, 2)), Some(squirrel));
        assert!(state.board().is_empty(Point::new(1, 3)));

        let unit = state.unit(squirrel).unwrap();
        assert!(unit.has_fled_this_turn);
        assert_eq!(unit.fleeing_from, None);
        // fleeing does not spend the action
        assert!(unit.can_move_and_attack);
    }

    #[test]
    fn test_flee_never_enters_river() {
        let mut state = state();
        let leopard = state.spawn_unit(Species::Leopard, PlayerId::FIRST, Point::new(1, 3)).unwrap();
        let mouse = state.spawn_unit(Species::Mouse, PlayerId::SECOND, Point::new(2, 3)).unwrap();
        state.unit_mut(mouse).unwrap().fleeing_from = Some(leopard);

        assert_eq!(resolve_flee(&mut state, mouse), None);
        let unit = state.unit(mouse).unwrap();
        assert_eq!(unit.location, Some(Point::new(2, 3)));
        assert!(unit.has_fled_this_turn);
    }

    #[test]
    fn test_flee_falls_back_to_perpendicular() {
        let mut state = state();
        let tiger = state.spawn_unit(Species::Tiger, PlayerId::FIRST, Point::new(0, 0)).unwrap();
        let mouse = state.spawn_unit(Species::Mouse, PlayerId::SECOND, Point::new(1, 1)).unwrap();
        state
            .board
            .set_occupant(Point::new(2, 1), Some(Occupant::Landscape(Landscape::Rock)))
            .unwrap();
        state.unit_mut(mouse).unwrap().fleeing_from = Some(tiger);

        assert_eq!(resolve_flee(&mut state, mouse), Some(Point::new(1, 2)));
    }

    #[test]
    fn test_flee_only_once_per_turn() {
        let mut state = state();
        let tiger = state.spawn_unit(Species::Tiger, PlayerId::FIRST, Point::new(0, 1)).unwrap();
        let mouse = state.spawn_unit(Species::Mouse, PlayerId::SECOND, Point::new(1, 1)).unwrap();
        state.unit_mut(mouse).unwrap().has_fled_this_turn = true;
        state.unit_mut(mouse).unwrap().fleeing_from = Some(tiger);

        assert_eq!(resolve_flee(&mut state, mouse), None);
        let unit = state.unit(mouse).unwrap();
        assert_eq!(unit.location, Some(Point::new(1, 1)));
        assert_eq!(unit.fleeing_from, None);
    }
}
