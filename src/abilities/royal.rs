//! King abilities: rally and revive.

use log::{info, warn};

use super::AbilityOutcome;
use crate::core::point::Point;
use crate::core::rng::RandomSource;
use crate::core::state::MatchState;
use crate::error::{AbilityError, MoveError};
use crate::rules::{execute_move, valid_walks, validate_move, MovePlan};
use crate::units::UnitId;

/// Cat king: move a random friendly unit to a random legal empty cell, then
/// heal the king.
pub(super) fn rally(
    state: &mut MatchState,
    rng: &mut dyn RandomSource,
    king: UnitId,
) -> Result<AbilityOutcome, AbilityError> {
    let player = state.current_player();
    let candidates: Vec<(UnitId, Vec<Point>)> = state
        .pieces_on_board(player)
        .into_iter()
        .filter(|&id| state.unit(id).is_some_and(|u| !u.species.is_king()))
        .map(|id| (id, valid_walks(state, id)))
        .filter(|(_, walks)| !walks.is_empty())
        .collect();
    if candidates.is_empty() {
        return Err(AbilityError::NoEligibleUnit);
    }

    let (unit, walks) = &candidates[rng.pick_index(candidates.len()).min(candidates.len() - 1)];
    let to = walks[rng.pick_index(walks.len()).min(walks.len() - 1)];
    let unit = *unit;

    rally_move(state, rng, unit, to)?;

    let heal = state.config().rally_heal;
    let healed = state.unit_mut(king).map_or(0, |k| {
        let cap = k.max_health;
        k.heal(heal, cap)
    });
    info!("rally moved {unit} to {to}, king healed {healed}");
    Ok(AbilityOutcome::Rally { unit, to, healed })
}

/// Walk the rallied unit. A refused walk fails the whole rally before the
/// king is healed.
fn rally_move(state: &mut MatchState, rng: &mut dyn RandomSource, unit: UnitId, to: Point) -> Result<(), AbilityError> {
    let activates_crossing = match validate_move(state, unit, to) {
        Ok(MovePlan::Move { activates_crossing, .. }) => activates_crossing,
        Ok(MovePlan::Attack { .. }) => return Err(AbilityError::RallyMove(MoveError::Blocked(to))),
        Err(err) => {
            warn!("rally move of {unit} to {to} refused: {err}");
            return Err(AbilityError::RallyMove(err));
        }
    };
    execute_move(state, rng, unit, to, activates_crossing).map_err(AbilityError::RallyMove)?;
    Ok(())
}

/// Mouse king: bring a random dead friendly unit back next to the king.
pub(super) fn revive(
    state: &mut MatchState,
    rng: &mut dyn RandomSource,
    king: UnitId,
) -> Result<AbilityOutcome, AbilityError> {
    let player = state.current_player();
    let dead = state.player(player).dead_pieces().to_vec();
    if dead.is_empty() {
        return Err(AbilityError::NoDeadPieces);
    }
    let king_at = state
        .unit(king)
        .and_then(|u| u.location)
        .ok_or(AbilityError::UnknownUnit(king))?;
    let board = state.board();
    let at = king_at
        .neighbours()
        .into_iter()
        .find(|&p| board.is_empty(p) && !board.is_river(p))
        .ok_or(AbilityError::NoFreeCell)?;

    let unit = dead[rng.pick_index(dead.len()).min(dead.len() - 1)];
    if let Some(u) = state.unit_mut(unit) {
        u.revive();
    }
    state.player_mut(player).revive_piece(unit);
    state.put_unit(unit, at).map_err(|_| AbilityError::NoFreeCell)?;
    info!("{unit} revived at {at}");
    Ok(AbilityOutcome::Revive { unit, at })
}
