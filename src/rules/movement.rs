//! Move validation and movement.
//!
//! [`validate_move`] runs every legality check of a move-or-attack request
//! without touching the state and returns a [`MovePlan`]. Execution only
//! starts once a plan exists, so a refused request never mutates anything.

use std::collections::BTreeSet;

use log::{debug, info};

use super::phase::{GamePhase, Outcome};
use crate::board::{Board, Occupant};
use crate::core::point::Point;
use crate::core::rng::RandomSource;
use crate::core::state::MatchState;
use crate::effects::run_detection;
use crate::error::{MoveError, OutOfBounds};
use crate::units::{Species, Unit, UnitId};

/// A validated move-or-attack request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovePlan {
    /// Walk to an empty cell.
    Move {
        from: Point,
        to: Point,
        /// The move is a leopard's first crossing and switches its free
        /// crossing on.
        activates_crossing: bool,
    },
    /// Hit the enemy standing on the destination.
    Attack { from: Point, target: UnitId },
}

/// True if a leopard without the capability may make this crossing.
///
/// The first crossing must be a horizontal move onto the column next to the
/// river, and it uses up the leopard's ability.
fn is_first_leopard_crossing(board: &Board, unit: &Unit, from: Point, to: Point) -> bool {
    let river = board.river_column();
    let landing = if to.x > river { river + 1 } else { river - 1 };
    unit.species == Species::Leopard && !unit.has_used_special_ability && from.y == to.y && to.x == landing
}

/// Check a move-or-attack request.
///
/// Checks run in a fixed order: turn flags, distance, bounds, river,
/// friendly occupancy, straightness, path.
pub fn validate_move(state: &MatchState, id: UnitId, to: Point) -> Result<MovePlan, MoveError> {
    if state.phase() != GamePhase::Playing {
        return Err(MoveError::WrongPhase(state.phase()));
    }
    let unit = state.unit(id).ok_or(MoveError::UnknownUnit(id))?;
    let from = unit.location.ok_or(MoveError::UnknownUnit(id))?;
    if unit.owner != state.current_player() {
        return Err(MoveError::NotYourUnit(id));
    }

    let board = state.board();
    let occupant = board.occupant(to);
    let enemy = occupant
        .and_then(Occupant::unit)
        .and_then(|other| state.unit(other))
        .filter(|other| other.owner != unit.owner);

    if !unit.can_move_and_attack && !(unit.can_attack_again && enemy.is_some()) {
        return Err(MoveError::AlreadyActed(id));
    }

    let distance = from.manhattan(to);
    let range = unit.modified_move_distance();
    if distance == 0 || i64::from(distance) > i64::from(range) {
        return Err(MoveError::OutOfRange { distance, range });
    }

    if !board.is_within_board(to) {
        return Err(OutOfBounds(to).into());
    }

    let mut activates_crossing = false;
    if !unit.crosses_river_freely {
        if board.is_river(to) {
            return Err(MoveError::RiverCell(to));
        }
        if board.is_crossing_river(from, to) {
            if enemy.is_some() || !is_first_leopard_crossing(board, unit, from, to) {
                return Err(MoveError::RiverCrossing(to));
            }
            activates_crossing = true;
        }
    }

    match occupant {
        Some(Occupant::Landscape(_)) => return Err(MoveError::Blocked(to)),
        Some(Occupant::Unit(_)) if enemy.is_none() => return Err(MoveError::FriendlyOccupied(to)),
        _ => {}
    }

    if !from.is_straight_line_to(to) {
        return Err(MoveError::NotStraight);
    }
    if !board.is_path_clear(from, to) {
        return Err(MoveError::PathBlocked(to));
    }

    match enemy {
        Some(target) => {
            if !unit.can_attack {
                return Err(MoveError::Paralyzed(id));
            }
            Ok(MovePlan::Attack { from, target: target.id })
        }
        None => Ok(MovePlan::Move {
            from,
            to,
            activates_crossing,
        }),
    }
}

/// Every destination the unit may move to or attack right now.
///
/// Empty outside the playing phase and for units of the player not on turn.
#[must_use]
pub fn valid_moves(state: &MatchState, id: UnitId) -> BTreeSet<Point> {
    let Some(unit) = state.unit(id) else {
        return BTreeSet::new();
    };
    let Some(from) = unit.location else {
        return BTreeSet::new();
    };
    let range = unit.modified_move_distance().max(0);

    (1..=range)
        .flat_map(|step| {
            [
                from.offset(-step, 0),
                from.offset(step, 0),
                from.offset(0, -step),
                from.offset(0, step),
            ]
        })
        .filter(|&to| validate_move(state, id, to).is_ok())
        .collect()
}

/// Destinations that are empty cells (no attacks).
#[must_use]
pub fn valid_walks(state: &MatchState, id: UnitId) -> Vec<Point> {
    valid_moves(state, id)
        .into_iter()
        .filter(|&to| state.board().is_empty(to))
        .collect()
}

/// Carry out a validated move, then run the effect protocol for the mover.
pub(crate) fn execute_move(
    state: &mut MatchState,
    rng: &mut dyn RandomSource,
    id: UnitId,
    to: Point,
    activates_crossing: bool,
) -> Result<Outcome, MoveError> {
    let from = state.relocate_unit(id, to)?;
    if let Some(unit) = state.unit_mut(id) {
        unit.can_move_and_attack = false;
        if activates_crossing {
            unit.has_used_special_ability = true;
            unit.crosses_river_freely = true;
            info!("{} crossed the river and may now cross freely", unit.name);
        }
    }
    debug!("{id} moved from {from} to {to}");

    run_detection(state, rng, id);
    Ok(Outcome::Moved { from, to })
}
