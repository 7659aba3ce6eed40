//! Match state.
//!
//! ## MatchState
//!
//! Everything one match consists of:
//! - Board and unit arena
//! - Both players and their piece lists
//! - Phase, current player, turn counters
//! - Input selection and the pending squirrel throw
//! - Action history
//!
//! Units are stored once, in an arena keyed by [`UnitId`]. Cells and players
//! only hold ids. All cell assignments go through [`MatchState::put_unit`]
//! and [`MatchState::lift_unit`], which keep `Unit::location` and cell
//! occupancy in step.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::{Action, ActionRecord};
use super::config::MatchConfig;
use super::player::{Player, PlayerId, PlayerMap};
use super::point::Point;
use crate::board::{Board, Occupant};
use crate::error::{OutOfBounds, PlacementError};
use crate::rules::GamePhase;
use crate::units::{Species, Unit, UnitId};

/// A squirrel throw waiting for its targets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingThrow {
    /// The squirrel that started the throw.
    pub thrower: UnitId,
    /// Targets chosen so far, in selection order.
    pub targets: SmallVec<[UnitId; 2]>,
}

/// Complete state of one match.
///
/// Cloning is cheap enough for AI lookahead: the history is an `im::Vector`
/// and the arena is small.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchState {
    config: MatchConfig,

    // === Board ===
    pub(crate) board: Board,
    units: FxHashMap<UnitId, Unit>,
    next_unit_id: u32,

    // === Players ===
    pub(crate) players: PlayerMap<Player>,

    // === Progression ===
    pub(crate) phase: GamePhase,
    pub(crate) current_player: PlayerId,
    /// 0 during placement, 1 for the first playing turn.
    pub(crate) turn_number: u32,
    pub(crate) actions_this_turn: u32,
    pub(crate) winner: Option<PlayerId>,

    // === Input ===
    pub(crate) selected: Option<UnitId>,
    pub(crate) pending_throw: Option<PendingThrow>,

    history: Vector<ActionRecord>,
}

impl MatchState {
    /// An empty board in the placement phase, player one to act.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self {
            board: Board::new(config.board_size),
            config,
            units: FxHashMap::default(),
            next_unit_id: 1,
            players: PlayerMap::new(Player::new),
            phase: GamePhase::Placement,
            current_player: PlayerId::FIRST,
            turn_number: 0,
            actions_this_turn: 0,
            winner: None,
            selected: None,
            pending_throw: None,
            history: Vector::new(),
        }
    }

    // === Queries ===

    /// Rules in force.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Turn counter.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Accepted intents since the turn started.
    #[must_use]
    pub fn actions_this_turn(&self) -> u32 {
        self.actions_this_turn
    }

    /// Winner once the match is over.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Unit selected through click input.
    #[must_use]
    pub fn selected_unit(&self) -> Option<UnitId> {
        self.selected
    }

    /// The squirrel throw in progress, if any.
    #[must_use]
    pub fn pending_throw(&self) -> Option<&PendingThrow> {
        self.pending_throw.as_ref()
    }

    /// Every accepted intent so far.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// A player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    /// A unit, alive or dead.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub(crate) fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    /// The unit standing on a cell.
    #[must_use]
    pub fn unit_at(&self, point: Point) -> Option<&Unit> {
        self.board.unit_at(point).and_then(|id| self.units.get(&id))
    }

    /// Every unit on the board, in row-major order.
    pub fn units_on_board(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.board.units().filter_map(|(_, id)| self.units.get(&id))
    }

    /// A player's live pieces that stand on the board, in ownership order.
    #[must_use]
    pub fn pieces_on_board(&self, player: PlayerId) -> Vec<UnitId> {
        self.players[player]
            .pieces()
            .iter()
            .copied()
            .filter(|id| self.units.get(id).is_some_and(Unit::is_on_board))
            .collect()
    }

    /// Regular (non-king) units this player has placed, dead ones included.
    #[must_use]
    pub fn placed_count(&self, player: PlayerId) -> usize {
        let owner = &self.players[player];
        owner
            .pieces()
            .iter()
            .chain(owner.dead_pieces())
            .filter(|id| self.units.get(*id).is_some_and(|u| !u.species.is_king()))
            .count()
    }

    /// True once the player has placed their full roster.
    #[must_use]
    pub fn roster_full(&self, player: PlayerId) -> bool {
        self.placed_count(player) >= self.config.roster_cap()
    }

    // === Units on cells ===

    /// Create a unit for `owner` and stand it on `at`.
    ///
    /// Only checks that the cell exists, is dry land and is empty; roster
    /// and phase rules are the caller's business.
    pub(crate) fn spawn_unit(&mut self, species: Species, owner: PlayerId, at: Point) -> Result<UnitId, PlacementError> {
        let cell = self.board.cell(at)?;
        if cell.is_river() {
            return Err(PlacementError::RiverCell(at));
        }
        if !cell.is_empty() {
            return Err(PlacementError::Occupied(at));
        }

        let id = UnitId::new(self.next_unit_id);
        self.next_unit_id += 1;
        let unit = Unit::new(id, species, owner, owner.home_faction(), self.config.king_max_health);
        self.units.insert(id, unit);
        self.players[owner].add_piece(id, species.is_king());
        self.put_unit(id, at)?;
        Ok(id)
    }

    /// Stand a unit on a cell, writing the unit's location.
    ///
    /// The cell must be empty; callers validate before mutating.
    pub(crate) fn put_unit(&mut self, id: UnitId, at: Point) -> Result<(), OutOfBounds> {
        let previous = self.board.set_occupant(at, Some(Occupant::Unit(id)))?;
        debug_assert!(previous.is_none(), "put_unit onto occupied cell {at}");
        if let Some(unit) = self.units.get_mut(&id) {
            unit.location = Some(at);
        }
        Ok(())
    }

    /// Take a unit off its cell. Returns where it stood.
    pub(crate) fn lift_unit(&mut self, id: UnitId) -> Option<Point> {
        let at = self.units.get_mut(&id)?.location.take()?;
        // the location came from a successful put, so it is on the board
        let _ = self.board.set_occupant(at, None);
        Some(at)
    }

    /// Move a unit to an empty cell. Returns where it came from.
    pub(crate) fn relocate_unit(&mut self, id: UnitId, to: Point) -> Result<Point, OutOfBounds> {
        if !self.board.is_within_board(to) {
            return Err(OutOfBounds(to));
        }
        let from = self.lift_unit(id).ok_or(OutOfBounds(to))?;
        self.put_unit(id, to)?;
        Ok(from)
    }

    /// Swap the cells of two units on the board.
    pub(crate) fn swap_units(&mut self, a: UnitId, b: UnitId) {
        let (Some(at_a), Some(at_b)) = (self.lift_unit(a), self.lift_unit(b)) else {
            return;
        };
        let _ = self.put_unit(a, at_b);
        let _ = self.put_unit(b, at_a);
    }

    /// Take a defeated unit off the board and onto its owner's dead roster.
    ///
    /// Returns false if the unit was not a live piece.
    pub(crate) fn defeat_unit(&mut self, id: UnitId) -> bool {
        let Some(owner) = self.units.get(&id).map(|u| u.owner) else {
            return false;
        };
        self.lift_unit(id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.players[owner].remove_piece(id)
    }

    /// Hand a live unit to another player.
    pub(crate) fn transfer_unit(&mut self, id: UnitId, to: PlayerId) {
        let Some(unit) = self.units.get_mut(&id) else {
            return;
        };
        let from = unit.owner;
        let is_king = unit.species.is_king();
        unit.owner = to;
        if self.players[from].release_piece(id) {
            self.players[to].add_piece(id, is_king);
        }
    }

    // === History ===

    /// Append an accepted intent to the history.
    pub(crate) fn record(&mut self, player: PlayerId, action: Action) {
        self.history.push_back(ActionRecord {
            player,
            action,
            turn: self.turn_number,
            sequence: self.actions_this_turn,
        });
    }
}
