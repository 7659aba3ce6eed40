//! Computer players for placement and play.
//!
//! Policies are trait-based so hosts can plug in their own:
//! - `PlacementStrategy`: Where to put the next piece during placement
//! - `ActionPolicy`: Which legal intent to issue during play

use crate::core::action::Action;
use crate::core::player::PlayerId;
use crate::core::point::Point;
use crate::core::rng::{choose, RandomSource};
use crate::core::state::MatchState;
use crate::error::EngineError;
use crate::rules::{open_home_cells, GamePhase, MatchEngine};
use crate::units::Species;

// =============================================================================
// Placement Strategy
// =============================================================================

/// Chooses placements for a computer player.
pub trait PlacementStrategy {
    /// Species and cell for the next piece of `player`.
    ///
    /// Returns `None` if nothing can be placed.
    fn choose_placement(
        &self,
        state: &MatchState,
        player: PlayerId,
        rng: &mut dyn RandomSource,
    ) -> Option<(Species, Point)>;
}

/// Uniformly random species from the roster on a uniformly random free cell
/// of the home bank.
#[derive(Clone, Debug, Default)]
pub struct UniformPlacement;

impl PlacementStrategy for UniformPlacement {
    fn choose_placement(
        &self,
        state: &MatchState,
        player: PlayerId,
        rng: &mut dyn RandomSource,
    ) -> Option<(Species, Point)> {
        let species: Vec<Species> = state.player(player).placeable_species().collect();
        let cells = open_home_cells(state, player);
        let species = *choose(rng, &species)?;
        let at = *choose(rng, &cells)?;
        Some((species, at))
    }
}

// =============================================================================
// Action Policy
// =============================================================================

/// Chooses an intent for the player on turn.
pub trait ActionPolicy {
    /// Pick one of `legal`. Returns `None` if `legal` is empty.
    fn choose_action(&self, state: &MatchState, legal: &[Action], rng: &mut dyn RandomSource) -> Option<Action>;
}

/// Selects uniformly from legal intents.
#[derive(Clone, Debug, Default)]
pub struct UniformActions;

impl ActionPolicy for UniformActions {
    fn choose_action(&self, _state: &MatchState, legal: &[Action], rng: &mut dyn RandomSource) -> Option<Action> {
        choose(rng, legal).cloned()
    }
}

/// Attacks whenever it can, otherwise plays like [`UniformActions`].
///
/// Skipping is only chosen when nothing else is legal.
#[derive(Clone, Debug, Default)]
pub struct AggressiveActions;

impl ActionPolicy for AggressiveActions {
    fn choose_action(&self, state: &MatchState, legal: &[Action], rng: &mut dyn RandomSource) -> Option<Action> {
        let attacks: Vec<Action> = legal
            .iter()
            .filter(|action| match action {
                Action::MoveOrAttack { unit, to } => state
                    .unit_at(*to)
                    .zip(state.unit(*unit))
                    .is_some_and(|(target, attacker)| target.owner != attacker.owner),
                _ => false,
            })
            .cloned()
            .collect();
        if let Some(attack) = choose(rng, &attacks) {
            return Some(attack.clone());
        }
        let active: Vec<Action> = legal
            .iter()
            .filter(|action| !matches!(action, Action::SkipTurn))
            .cloned()
            .collect();
        choose(rng, &active).or_else(|| legal.first()).cloned()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Drive a match with `policy` until it ends or `max_steps` intents were
/// applied. Placement is filled in with [`UniformPlacement`] first.
///
/// Returns the winner, if the match ended.
pub fn play_out<R: RandomSource>(
    engine: &mut MatchEngine<R>,
    policy: &impl ActionPolicy,
    max_steps: usize,
) -> Result<Option<PlayerId>, EngineError> {
    while engine.phase() == GamePhase::Placement {
        let player = engine.current_player();
        let placed = engine.auto_place(player, &UniformPlacement)?;
        if placed.is_empty() && engine.current_player() == player {
            break;
        }
    }

    for _ in 0..max_steps {
        if engine.phase() == GamePhase::GameOver {
            break;
        }
        if engine.step_with(policy)?.is_none() {
            break;
        }
    }
    Ok(engine.winner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{BoardSize, MatchConfig};
    use crate::core::rng::{GameRng, ScriptedRandom};

    #[test]
    fn test_uniform_placement_stays_home() {
        let mut engine = MatchEngine::with_random(MatchConfig::new(BoardSize::Five), GameRng::new(3));
        engine.start_match().unwrap();
        let state = engine.state().unwrap();
        let mut rng = GameRng::new(5);

        for _ in 0..20 {
            let (species, at) = UniformPlacement
                .choose_placement(state, PlayerId::SECOND, &mut rng)
                .unwrap();
            assert!(state.player(PlayerId::SECOND).roster().contains(&species));
            assert!(at.x > state.board().river_column());
            assert!(state.board().is_empty(at));
        }
    }

    #[test]
    fn test_auto_place_fills_both_rosters() {
        let mut engine = MatchEngine::with_random(MatchConfig::new(BoardSize::Seven), GameRng::new(11));
        engine.start_match().unwrap();

        let first = engine.auto_place(PlayerId::FIRST, &UniformPlacement).unwrap();
        assert_eq!(first.len(), 7);
        assert_eq!(engine.current_player(), PlayerId::SECOND);
        assert_eq!(engine.phase(), GamePhase::Placement);

        engine.auto_place(PlayerId::SECOND, &UniformPlacement).unwrap();
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert_eq!(engine.current_player(), PlayerId::FIRST);
        assert_eq!(engine.state().unwrap().turn_number(), 1);
    }

    #[test]
    fn test_uniform_actions_empty() {
        let state = MatchState::new(MatchConfig::default());
        let mut rng = ScriptedRandom::new();
        assert_eq!(UniformActions.choose_action(&state, &[], &mut rng), None);
    }

    #[test]
    fn test_aggressive_prefers_attack() {
        let mut engine = MatchEngine::with_random(MatchConfig::new(BoardSize::Seven), ScriptedRandom::new());
        engine.start_custom_match().unwrap();
        let tiger = engine.spawn_unit(Species::Tiger, PlayerId::FIRST, Point::new(1, 1)).unwrap();
        engine.spawn_unit(Species::Squirrel, PlayerId::SECOND, Point::new(1, 2)).unwrap();

        let legal = engine.legal_actions();
        let mut rng = ScriptedRandom::new();
        let chosen = AggressiveActions.choose_action(engine.state().unwrap(), &legal, &mut rng);
        assert_eq!(chosen, Some(Action::MoveOrAttack { unit: tiger, to: Point::new(1, 2) }));
    }

    #[test]
    fn test_play_out_terminates() {
        let config = MatchConfig::new(BoardSize::Five).with_seed(21);
        let mut engine = MatchEngine::with_config(config);
        engine.start_match().unwrap();
        play_out(&mut engine, &UniformActions, 500).unwrap();
        assert_ne!(engine.phase(), GamePhase::Placement);
        assert!(!engine.history().is_empty());
    }
}
