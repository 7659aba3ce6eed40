//! End-of-turn effect sweep.

use log::debug;

use crate::core::player::PlayerId;
use crate::core::state::MatchState;
use crate::effects::InteractionEffect;
use crate::units::UnitId;

/// Count down the timed effects on the board at the end of `ending`'s turn.
///
/// Paralysis counts down on every sweep. Attract and repel only count down
/// when their bearer's owner ends a turn, so a modifier landed on an enemy
/// lasts through that enemy's next turn. Flight flags of every unit are
/// cleared. Returns the units whose effect expired.
pub fn end_of_turn_sweep(state: &mut MatchState, ending: PlayerId) -> Vec<UnitId> {
    let on_board: Vec<UnitId> = state.units_on_board().map(|u| u.id).collect();
    let mut expired = Vec::new();
    for id in on_board {
        let Some(unit) = state.unit_mut(id) else {
            continue;
        };
        unit.has_fled_this_turn = false;
        let ticks = unit.current_effect == InteractionEffect::Paralyze || unit.owner == ending;
        if ticks && unit.tick_effect() {
            debug!("effects on {} expired", unit.name);
            expired.push(id);
        }
    }
    expired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{BoardSize, MatchConfig};
    use crate::core::player::PlayerId;
    use crate::core::point::Point;
    use crate::effects::InteractionEffect;
    use crate::units::Species;

    #[test]
    fn test_sweep_expires_modifiers_and_paralysis() {
        let mut state = MatchState::new(MatchConfig::new(BoardSize::Five));
        let mouse = state.spawn_unit(Species::Mouse, PlayerId::SECOND, Point::new(3, 0)).unwrap();
        let tiger = state.spawn_unit(Species::Tiger, PlayerId::FIRST, Point::new(0, 0)).unwrap();
        state.unit_mut(mouse).unwrap().apply_status(InteractionEffect::Attract, 1, tiger);
        state.unit_mut(tiger).unwrap().apply_status(InteractionEffect::Paralyze, 2, mouse);

        assert_eq!(end_of_turn_sweep(&mut state, PlayerId::SECOND), vec![mouse]);
        assert_eq!(state.unit(mouse).unwrap().move_distance_modifier, 0);
        assert!(state.unit(tiger).unwrap().is_paralyzed);

        assert_eq!(end_of_turn_sweep(&mut state, PlayerId::SECOND), vec![tiger]);
        let tiger = state.unit(tiger).unwrap();
        assert!(!tiger.is_paralyzed);
        assert!(tiger.can_attack);
    }

    #[test]
    fn test_sweep_skips_units_off_board() {
        let mut state = MatchState::new(MatchConfig::new(BoardSize::Five));
        let mouse = state.spawn_unit(Species::Mouse, PlayerId::SECOND, Point::new(4, 4)).unwrap();
        state.unit_mut(mouse).unwrap().apply_status(InteractionEffect::Attract, 1, mouse);
        state.defeat_unit(mouse);

        assert!(end_of_turn_sweep(&mut state, PlayerId::SECOND).is_empty());
        assert_eq!(state.unit(mouse).unwrap().effect_duration, 1);
    }

    #[test]
    fn test_enemy_modifier_waits_for_its_owner() {
        let mut state = MatchState::new(MatchConfig::new(BoardSize::Seven));
        let ours = state.spawn_unit(Species::Tiger, PlayerId::FIRST, Point::new(1, 2)).unwrap();
        let theirs = state.spawn_unit(Species::Tiger, PlayerId::SECOND, Point::new(2, 2)).unwrap();
        state.unit_mut(theirs).unwrap().apply_status(InteractionEffect::Repel, 1, ours);

        // the first player's turn ends, the repelled tiger has not acted yet
        assert!(end_of_turn_sweep(&mut state, PlayerId::FIRST).is_empty());
        assert_eq!(state.unit(theirs).unwrap().move_distance_modifier, -1);

        assert_eq!(end_of_turn_sweep(&mut state, PlayerId::SECOND), vec![theirs]);
        assert_eq!(state.unit(theirs).unwrap().move_distance_modifier, 0);
    }

    #[test]
    fn test_sweep_clears_every_flight_flag() {
        let mut state = MatchState::new(MatchConfig::new(BoardSize::Five));
        let mouse = state.spawn_unit(Species::Mouse, PlayerId::SECOND, Point::new(4, 0)).unwrap();
        state.unit_mut(mouse).unwrap().has_fled_this_turn = true;

        end_of_turn_sweep(&mut state, PlayerId::SECOND);
        assert!(!state.unit(mouse).unwrap().has_fled_this_turn);
    }
}
