//! The match engine.
//!
//! `MatchEngine` owns one match and the random source it runs on, and is the
//! single entry point hosts talk to. Every mutating intent either succeeds
//! completely or returns an error and leaves the match untouched.
//!
//! ## Example Usage
//!
//! ```
//! use river_king::core::{MatchConfig, BoardSize};
//! use river_king::rules::{GamePhase, MatchEngine};
//!
//! let mut engine = MatchEngine::with_config(MatchConfig::new(BoardSize::Five).with_seed(7));
//! engine.start_match().unwrap();
//! assert_eq!(engine.phase(), GamePhase::Placement);
//! ```

use std::collections::BTreeSet;

use im::Vector;
use log::info;

use super::combat::resolve_attack;
use super::movement::{execute_move, valid_moves, validate_move, MovePlan};
use super::phase::{GamePhase, Outcome};
use super::placement::{
    advance_placement, assign_rosters, begin_play, open_home_cells, place_kings, validate_placement, validate_slot,
};
use super::turn::{end_turn, finish_action};
use crate::abilities::{can_use_ability, cancel_throw, select_throw_target, use_special_ability, AbilityOutcome};
use crate::ai::{ActionPolicy, PlacementStrategy};
use crate::board::{BoardSnapshot, Landscape, Occupant};
use crate::core::action::{Action, ActionRecord};
use crate::core::config::{BoardSize, MatchConfig};
use crate::core::player::{Player, PlayerId};
use crate::core::point::Point;
use crate::core::rng::{GameRng, GameRngState, RandomSource};
use crate::core::state::MatchState;
use crate::error::{AbilityError, ConfigurationError, EngineError, MoveError, PlacementError, TargetError};
use crate::units::{Species, Unit, UnitId};

/// Runs a match.
///
/// Generic over the random source so tests can script every random decision.
#[derive(Clone, Debug)]
pub struct MatchEngine<R: RandomSource = GameRng> {
    pub(super) config: Option<MatchConfig>,
    pub(super) state: Option<MatchState>,
    pub(super) rng: R,
    /// Species the next placement click will place.
    pub(super) pending_species: Option<Species>,
}

impl MatchEngine<GameRng> {
    /// An unconfigured engine seeded from system entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(None, GameRng::from_entropy())
    }

    /// A configured engine. Uses the configured seed if there is one.
    #[must_use]
    pub fn with_config(config: MatchConfig) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Self::from_parts(Some(config), rng)
    }

    /// Position of the random stream, for hosts that save a match.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Rewind or advance the random stream to a saved position.
    pub fn restore_rng(&mut self, state: &GameRngState) {
        self.rng = GameRng::from_state(state);
    }
}

impl Default for MatchEngine<GameRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> MatchEngine<R> {
    /// A configured engine running on the given random source.
    #[must_use]
    pub fn with_random(config: MatchConfig, rng: R) -> Self {
        Self::from_parts(Some(config), rng)
    }

    fn from_parts(config: Option<MatchConfig>, rng: R) -> Self {
        Self {
            config,
            state: None,
            rng,
            pending_species: None,
        }
    }

    fn state_mut(&mut self) -> Option<&mut MatchState> {
        self.state.as_mut()
    }

    /// The current match, unless there is none or it is over.
    fn open_state_mut(&mut self) -> Result<&mut MatchState, PlacementError> {
        match self.state.as_mut() {
            None => Err(PlacementError::WrongPhase(GamePhase::Setup)),
            Some(state) if state.phase() == GamePhase::GameOver => {
                Err(PlacementError::WrongPhase(GamePhase::GameOver))
            }
            Some(state) => Ok(state),
        }
    }

    // === Setup ===

    /// Pick the board size for the next match.
    ///
    /// Other rule settings already configured are kept.
    pub fn configure(&mut self, size: u8) -> Result<(), ConfigurationError> {
        let size = BoardSize::try_from(size)?;
        if self.state.as_ref().is_some_and(|s| s.phase() != GamePhase::GameOver) {
            return Err(ConfigurationError::MatchInProgress);
        }
        let config = match self.config.take() {
            Some(mut config) => {
                config.board_size = size;
                config
            }
            None => MatchConfig::new(size),
        };
        info!("configured a {size} board");
        self.config = Some(config);
        Ok(())
    }

    /// Start a new match, discarding any current one.
    ///
    /// Rosters are drawn, kings placed and player one starts placing.
    pub fn start_match(&mut self) -> Result<&MatchState, ConfigurationError> {
        let config = self.config.clone().ok_or(ConfigurationError::NotConfigured)?;
        let mut state = MatchState::new(config);
        assign_rosters(&mut state, &mut self.rng);
        place_kings(&mut state).map_err(ConfigurationError::KingPlacement)?;
        self.pending_species = None;
        info!("match started on a {} board", state.config().board_size);
        Ok(self.state.insert(state))
    }

    /// Start a match on an empty board, straight in the playing phase.
    ///
    /// For scenario setups: add units with [`MatchEngine::spawn_unit`].
    pub fn start_custom_match(&mut self) -> Result<&MatchState, ConfigurationError> {
        let config = self.config.clone().ok_or(ConfigurationError::NotConfigured)?;
        let mut state = MatchState::new(config);
        begin_play(&mut state);
        self.pending_species = None;
        Ok(self.state.insert(state))
    }

    /// Drop a unit on the board outside the placement rules.
    ///
    /// Works while a match is running; no roster or home-bank checks.
    pub fn spawn_unit(&mut self, species: Species, owner: PlayerId, at: Point) -> Result<UnitId, PlacementError> {
        let state = self.open_state_mut()?;
        let id = state.spawn_unit(species, owner, at)?;
        if state.phase() == GamePhase::Playing && owner == state.current_player() {
            if let Some(unit) = state.unit_mut(id) {
                unit.start_turn();
            }
        }
        Ok(id)
    }

    /// Put neutral scenery on an empty dry cell.
    ///
    /// Landscape blocks movement and placement and never interacts.
    pub fn place_landscape(&mut self, landscape: Landscape, at: Point) -> Result<(), PlacementError> {
        let state = self.open_state_mut()?;
        let cell = state.board().cell(at)?;
        if cell.is_river() {
            return Err(PlacementError::RiverCell(at));
        }
        if !cell.is_empty() {
            return Err(PlacementError::Occupied(at));
        }
        state.board.set_occupant(at, Some(Occupant::Landscape(landscape)))?;
        Ok(())
    }

    /// Back to Setup. The configuration is kept.
    pub fn reset(&mut self) {
        self.state = None;
        self.pending_species = None;
        info!("engine reset");
    }

    // === Placement ===

    /// Place a piece for `player`.
    pub fn place_unit(&mut self, player: PlayerId, species: Species, at: Point) -> Result<UnitId, PlacementError> {
        let state = self
            .state_mut()
            .ok_or(PlacementError::WrongPhase(GamePhase::Setup))?;
        validate_placement(state, player, species, at)?;
        let id = state.spawn_unit(species, player, at)?;
        state.record(player, Action::Place { species, at });
        advance_placement(state, player);
        Ok(id)
    }

    /// Fill the rest of `player`'s roster using a strategy.
    ///
    /// Ignores the placement alternation. Pieces placed before a refused
    /// choice stay on the board.
    pub fn auto_place(&mut self, player: PlayerId, strategy: &impl PlacementStrategy) -> Result<Vec<UnitId>, PlacementError> {
        let state = self
            .state
            .as_mut()
            .ok_or(PlacementError::WrongPhase(GamePhase::Setup))?;
        if state.phase() != GamePhase::Placement {
            return Err(PlacementError::WrongPhase(state.phase()));
        }

        let mut placed = Vec::new();
        while !state.roster_full(player) {
            let Some((species, at)) = strategy.choose_placement(state, player, &mut self.rng) else {
                break;
            };
            validate_slot(state, player, species, at)?;
            placed.push(state.spawn_unit(species, player, at)?);
            state.record(player, Action::Place { species, at });
        }
        advance_placement(state, player);
        info!("auto-placed {} pieces for {player}", placed.len());
        Ok(placed)
    }

    // === Play ===

    /// Move a unit, or attack the enemy on the destination.
    pub fn move_or_attack(&mut self, unit: UnitId, to: Point) -> Result<Outcome, MoveError> {
        let Some(state) = self.state.as_mut() else {
            return Err(MoveError::WrongPhase(GamePhase::Setup));
        };
        let plan = validate_move(state, unit, to)?;
        let player = state.current_player();
        let outcome = match plan {
            MovePlan::Move { activates_crossing, .. } => {
                execute_move(state, &mut self.rng, unit, to, activates_crossing)?
            }
            MovePlan::Attack { target, .. } => resolve_attack(state, unit, target)?,
        };
        state.record(player, Action::MoveOrAttack { unit, to });
        finish_action(state, false);
        Ok(outcome)
    }

    /// Use a unit's special ability.
    pub fn use_special_ability(&mut self, unit: UnitId) -> Result<AbilityOutcome, AbilityError> {
        let Some(state) = self.state.as_mut() else {
            return Err(AbilityError::WrongPhase(GamePhase::Setup));
        };
        let player = state.current_player();
        let outcome = use_special_ability(state, &mut self.rng, unit)?;
        state.record(player, Action::UseAbility { unit });
        if outcome.is_complete() {
            finish_action(state, outcome.ends_turn());
        }
        Ok(outcome)
    }

    /// Choose a squirrel throw target.
    ///
    /// Returns the throw once both targets are chosen; the turn then ends.
    pub fn select_squirrel_target(&mut self, target: UnitId) -> Result<Option<AbilityOutcome>, TargetError> {
        let Some(state) = self.state.as_mut() else {
            return Err(TargetError::WrongPhase(GamePhase::Setup));
        };
        let player = state.current_player();
        let outcome = select_throw_target(state, target)?;
        state.record(player, Action::SelectTarget { target });
        if outcome.is_some() {
            finish_action(state, true);
        }
        Ok(outcome)
    }

    /// Abort a squirrel throw before both targets are chosen.
    pub fn cancel_squirrel_ability(&mut self) -> Result<(), TargetError> {
        let Some(state) = self.state.as_mut() else {
            return Err(TargetError::WrongPhase(GamePhase::Setup));
        };
        cancel_throw(state)?;
        let player = state.current_player();
        state.record(player, Action::CancelAbility);
        Ok(())
    }

    /// End the turn if something was done and nothing is left to do.
    pub fn end_turn_if_exhausted(&mut self) -> bool {
        self.state_mut().is_some_and(super::turn::end_turn_if_exhausted)
    }

    /// End the turn now.
    pub fn skip_turn(&mut self) -> Result<(), MoveError> {
        let Some(state) = self.state.as_mut() else {
            return Err(MoveError::WrongPhase(GamePhase::Setup));
        };
        if state.phase() != GamePhase::Playing {
            return Err(MoveError::WrongPhase(state.phase()));
        }
        let player = state.current_player();
        state.record(player, Action::SkipTurn);
        end_turn(state);
        Ok(())
    }

    // === Generic driving ===

    /// Apply any intent for the player on turn.
    pub fn apply(&mut self, action: &Action) -> Result<(), EngineError> {
        if self.phase() == GamePhase::GameOver {
            return Err(EngineError::GameOver);
        }
        match *action {
            Action::Place { species, at } => {
                let player = self.current_player();
                self.place_unit(player, species, at)?;
            }
            Action::MoveOrAttack { unit, to } => {
                self.move_or_attack(unit, to)?;
            }
            Action::UseAbility { unit } => {
                self.use_special_ability(unit)?;
            }
            Action::SelectTarget { target } => {
                self.select_squirrel_target(target)?;
            }
            Action::CancelAbility => self.cancel_squirrel_ability()?,
            Action::SkipTurn => self.skip_turn()?,
        }
        Ok(())
    }

    /// Every intent the player on turn may issue right now.
    ///
    /// Each listed intent would be accepted by [`MatchEngine::apply`].
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        let Some(state) = self.state.as_ref() else {
            return Vec::new();
        };
        let player = state.current_player();
        match state.phase() {
            GamePhase::Placement => {
                if state.roster_full(player) {
                    return Vec::new();
                }
                let cells = open_home_cells(state, player);
                let mut species: Vec<Species> = state.player(player).placeable_species().collect();
                species.dedup();
                species
                    .into_iter()
                    .flat_map(|s| cells.iter().map(move |&at| Action::Place { species: s, at }))
                    .collect()
            }
            GamePhase::Playing => {
                let mut actions = Vec::new();
                for id in state.pieces_on_board(player) {
                    actions.extend(
                        valid_moves(state, id)
                            .into_iter()
                            .map(|to| Action::MoveOrAttack { unit: id, to }),
                    );
                    if can_use_ability(state, id) {
                        actions.push(Action::UseAbility { unit: id });
                    }
                }
                actions.push(Action::SkipTurn);
                actions
            }
            GamePhase::SquirrelAbility => {
                let chosen = state.pending_throw().map(|p| p.targets.clone()).unwrap_or_default();
                let mut actions: Vec<Action> = state
                    .pieces_on_board(player.opponent())
                    .into_iter()
                    .filter(|id| !chosen.contains(id))
                    .map(|target| Action::SelectTarget { target })
                    .collect();
                actions.push(Action::CancelAbility);
                actions
            }
            GamePhase::Setup | GamePhase::GameOver => Vec::new(),
        }
    }

    /// Let a policy pick and apply one intent. Returns the intent applied.
    pub fn step_with(&mut self, policy: &impl ActionPolicy) -> Result<Option<Action>, EngineError> {
        let legal = self.legal_actions();
        let Some(state) = self.state.as_ref() else {
            return Ok(None);
        };
        let Some(action) = policy.choose_action(state, &legal, &mut self.rng) else {
            return Ok(None);
        };
        self.apply(&action)?;
        Ok(Some(action))
    }

    // === Queries ===

    /// The match in progress, if any.
    #[must_use]
    pub fn state(&self) -> Option<&MatchState> {
        self.state.as_ref()
    }

    /// The configuration for the current or next match.
    #[must_use]
    pub fn config(&self) -> Option<&MatchConfig> {
        self.config.as_ref()
    }

    /// Current phase; Setup before a match starts.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.state.as_ref().map_or(GamePhase::Setup, MatchState::phase)
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.as_ref().map_or(PlayerId::FIRST, MatchState::current_player)
    }

    /// Winner once the match is over.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.as_ref().and_then(MatchState::winner)
    }

    /// Legal destinations for a unit right now.
    #[must_use]
    pub fn valid_moves(&self, unit: UnitId) -> BTreeSet<Point> {
        self.state
            .as_ref()
            .map(|state| valid_moves(state, unit))
            .unwrap_or_default()
    }

    /// A unit by id.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.state.as_ref()?.unit(id)
    }

    /// The unit standing on a cell.
    #[must_use]
    pub fn unit_at(&self, point: Point) -> Option<&Unit> {
        self.state.as_ref()?.unit_at(point)
    }

    /// A player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.state.as_ref().map(|state| state.player(id))
    }

    /// Accepted intents of the current match.
    #[must_use]
    pub fn history(&self) -> Vector<ActionRecord> {
        self.state
            .as_ref()
            .map(|state| state.history().clone())
            .unwrap_or_default()
    }

    /// A serializable picture of the board for hosts.
    #[must_use]
    pub fn board_snapshot(&self) -> Option<BoardSnapshot> {
        self.state.as_ref().map(BoardSnapshot::capture)
    }
}
