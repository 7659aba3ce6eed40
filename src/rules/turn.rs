//! Turn bookkeeping: action accounting, exhaustion, turn end and victory.

use log::info;

use super::movement::valid_moves;
use super::phase::GamePhase;
use crate::core::player::PlayerId;
use crate::core::state::MatchState;
use crate::effects::end_of_turn_sweep;

/// True when no unit of the player on turn has a legal move or attack left.
///
/// Kings never move and an unused ability does not keep the turn open.
#[must_use]
pub fn is_exhausted(state: &MatchState) -> bool {
    state
        .pieces_on_board(state.current_player())
        .into_iter()
        .all(|id| valid_moves(state, id).is_empty())
}

/// Hand the turn to the opponent.
///
/// Runs the effect sweep for every unit, drops the ending player's unused
/// pursuit bonuses and refreshes the new player's action flags.
pub(crate) fn end_turn(state: &mut MatchState) {
    let ending = state.current_player;
    end_of_turn_sweep(state, ending);

    for id in state.player(ending).pieces().to_vec() {
        if let Some(unit) = state.unit_mut(id) {
            unit.can_attack_again = false;
        }
    }

    let next = ending.opponent();
    state.current_player = next;
    state.turn_number += 1;
    state.actions_this_turn = 0;
    state.selected = None;
    for id in state.player(next).pieces().to_vec() {
        if let Some(unit) = state.unit_mut(id) {
            unit.start_turn();
        }
    }
    info!("turn {}: {} to act", state.turn_number, next);
}

/// End the turn if at least one action was taken and nothing is left to do.
///
/// Calling it again right after it ended a turn is a no-op, since the new
/// turn has no actions yet.
pub fn end_turn_if_exhausted(state: &mut MatchState) -> bool {
    if state.phase != GamePhase::Playing || state.actions_this_turn == 0 || !is_exhausted(state) {
        return false;
    }
    end_turn(state);
    true
}

/// The player who has lost, if any.
///
/// A player loses without a king or with too few live pieces. Both players
/// are checked in seat order.
#[must_use]
pub fn losing_player(state: &MatchState) -> Option<PlayerId> {
    let threshold = state.config().defeat_piece_threshold;
    PlayerId::ALL.into_iter().find(|&id| {
        let player = state.player(id);
        player.king().is_none() || player.pieces().len() <= threshold
    })
}

/// End the match if a player has lost. Returns the winner.
pub(crate) fn check_victory(state: &mut MatchState) -> Option<PlayerId> {
    if !state.phase.is_in_play() {
        return state.winner;
    }
    let winner = losing_player(state)?.opponent();
    state.phase = GamePhase::GameOver;
    state.winner = Some(winner);
    state.pending_throw = None;
    state.selected = None;
    info!("{winner} wins after {} turns", state.turn_number);
    Some(winner)
}

/// Bookkeeping after an accepted action.
///
/// Counts the action, checks for a winner, then ends the turn if the action
/// demands it or if the player has nothing left to do.
pub(crate) fn finish_action(state: &mut MatchState, ends_turn: bool) {
    state.actions_this_turn += 1;
    if check_victory(state).is_some() {
        return;
    }
    if ends_turn {
        end_turn(state);
    } else {
        end_turn_if_exhausted(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{BoardSize, MatchConfig};
    use crate::core::point::Point;
    use crate::units::{Species, UnitId};

    struct Setup {
        state: MatchState,
        tiger: UnitId,
        mouse: UnitId,
    }

    fn setup() -> Setup {
        let config = MatchConfig::new(BoardSize::Seven).with_defeat_piece_threshold(0);
        let mut state = MatchState::new(config);
        state.spawn_unit(Species::CatKing, PlayerId::FIRST, Point::new(0, 3)).unwrap();
        state.spawn_unit(Species::MouseKing, PlayerId::SECOND, Point::new(6, 3)).unwrap();
        let tiger = state.spawn_unit(Species::Tiger, PlayerId::FIRST, Point::new(1, 0)).unwrap();
        let mouse = state.spawn_unit(Species::Mouse, PlayerId::SECOND, Point::new(5, 6)).unwrap();
        state.phase = GamePhase::Playing;
        state.turn_number = 1;
        Setup { state, tiger, mouse }
    }

    #[test]
    fn test_exhaustion_ignores_kings() {
        let Setup { mut state, tiger, .. } = setup();
        assert!(!is_exhausted(&state));
        state.unit_mut(tiger).unwrap().can_move_and_attack = false;
        assert!(is_exhausted(&state));
    }

    #[test]
    fn test_end_turn_switches_player_and_refreshes_flags() {
        let Setup { mut state, tiger, mouse } = setup();
        state.unit_mut(tiger).unwrap().can_attack_again = true;
        state.unit_mut(mouse).unwrap().can_move_and_attack = false;
        state.unit_mut(mouse).unwrap().has_fled_this_turn = true;
        state.actions_this_turn = 1;

        end_turn(&mut state);

        assert_eq!(state.current_player(), PlayerId::SECOND);
        assert_eq!(state.turn_number(), 2);
        assert_eq!(state.actions_this_turn(), 0);
        assert!(!state.unit(tiger).unwrap().can_attack_again);
        let m = state.unit(mouse).unwrap();
        assert!(m.can_move_and_attack);
        assert!(!m.has_fled_this_turn);
    }

    #[test]
    fn test_end_turn_if_exhausted_is_idempotent() {
        let Setup { mut state, tiger, .. } = setup();
        state.unit_mut(tiger).unwrap().can_move_and_attack = false;

        // nothing was done yet, so the turn stays open
        assert!(!end_turn_if_exhausted(&mut state));
        assert_eq!(state.current_player(), PlayerId::FIRST);

        state.actions_this_turn = 1;
        assert!(end_turn_if_exhausted(&mut state));
        assert_eq!(state.current_player(), PlayerId::SECOND);
        assert_eq!(state.turn_number(), 2);

        assert!(!end_turn_if_exhausted(&mut state));
        assert_eq!(state.current_player(), PlayerId::SECOND);
        assert_eq!(state.turn_number(), 2);
    }

    #[test]
    fn test_victory_when_king_lost() {
        let Setup { mut state, .. } = setup();
        assert_eq!(check_victory(&mut state), None);

        let king = state.player(PlayerId::SECOND).king().unwrap();
        state.defeat_unit(king);
        assert_eq!(check_victory(&mut state), Some(PlayerId::FIRST));
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.winner(), Some(PlayerId::FIRST));
    }

    #[test]
    fn test_victory_by_piece_threshold() {
        let Setup { mut state, tiger, .. } = setup();
        state.defeat_unit(tiger);
        assert_eq!(check_victory(&mut state), None);

        let mut strict = MatchState::new(MatchConfig::new(BoardSize::Seven));
        strict.spawn_unit(Species::CatKing, PlayerId::FIRST, Point::new(0, 3)).unwrap();
        strict.spawn_unit(Species::MouseKing, PlayerId::SECOND, Point::new(6, 3)).unwrap();
        strict.spawn_unit(Species::Mouse, PlayerId::SECOND, Point::new(5, 6)).unwrap();
        strict.phase = GamePhase::Playing;
        // player one is down to the king alone
        assert_eq!(check_victory(&mut strict), Some(PlayerId::SECOND));
    }

    #[test]
    fn test_finish_action_ends_turn_when_asked() {
        let Setup { mut state, .. } = setup();
        finish_action(&mut state, true);
        assert_eq!(state.current_player(), PlayerId::SECOND);

        finish_action(&mut state, false);
        assert_eq!(state.current_player(), PlayerId::SECOND);
        assert_eq!(state.actions_this_turn(), 1);
    }
}
