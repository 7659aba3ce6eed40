//! Match start and the placement phase.
//!
//! Rosters are drawn at match start: each player gets two regular species,
//! drawn without replacement and alternating between players. Kings are
//! placed automatically in the middle row of the outer columns. Players then
//! alternate placing pieces on their own bank until both rosters are full.

use std::ops::Range;

use log::{debug, info};

use super::phase::GamePhase;
use crate::core::player::PlayerId;
use crate::core::point::Point;
use crate::core::rng::RandomSource;
use crate::core::state::MatchState;
use crate::error::PlacementError;
use crate::units::Species;

/// Columns a player may place on: the bank on their side of the river.
#[must_use]
pub fn home_columns(state: &MatchState, player: PlayerId) -> Range<i32> {
    let board = state.board();
    let river = board.river_column();
    if player == PlayerId::FIRST {
        0..river
    } else {
        river + 1..board.width()
    }
}

/// Empty cells on the player's bank, row by row.
#[must_use]
pub fn open_home_cells(state: &MatchState, player: PlayerId) -> Vec<Point> {
    let columns = home_columns(state, player);
    state
        .board()
        .cells()
        .filter(|cell| columns.contains(&cell.point().x) && cell.is_empty())
        .map(|cell| cell.point())
        .collect()
}

/// Draw two regular species per player.
pub(crate) fn assign_rosters(state: &mut MatchState, rng: &mut dyn RandomSource) {
    let mut pool = Species::REGULAR.to_vec();
    for _ in 0..2 {
        for player in PlayerId::ALL {
            let index = rng.pick_index(pool.len()).min(pool.len() - 1);
            let species = pool.remove(index);
            state.player_mut(player).assign_species(species);
        }
    }
    for player in PlayerId::ALL {
        let king = Species::king_of(player.home_faction());
        state.player_mut(player).assign_species(king);
        debug!("{player} roster: {:?}", state.player(player).roster());
    }
}

/// Stand both kings on the middle row of the outer columns.
pub(crate) fn place_kings(state: &mut MatchState) -> Result<(), PlacementError> {
    let width = state.board().width();
    let middle = width / 2;
    for (player, x) in [(PlayerId::FIRST, 0), (PlayerId::SECOND, width - 1)] {
        let king = Species::king_of(player.home_faction());
        state.spawn_unit(king, player, Point::new(x, middle))?;
    }
    Ok(())
}

/// Everything about a placement except whose turn it is.
pub fn validate_slot(state: &MatchState, player: PlayerId, species: Species, at: Point) -> Result<(), PlacementError> {
    if state.phase() != GamePhase::Placement {
        return Err(PlacementError::WrongPhase(state.phase()));
    }
    if !state.player(player).placeable_species().any(|s| s == species) {
        return Err(PlacementError::SpeciesNotInRoster(species));
    }
    if state.roster_full(player) {
        return Err(PlacementError::RosterFull);
    }
    let cell = state.board().cell(at)?;
    if !home_columns(state, player).contains(&at.x) {
        return Err(PlacementError::OutsideHomeColumns(at.x));
    }
    if !cell.is_empty() {
        return Err(PlacementError::Occupied(at));
    }
    Ok(())
}

/// Check a placement request from `player`.
pub fn validate_placement(state: &MatchState, player: PlayerId, species: Species, at: Point) -> Result<(), PlacementError> {
    if state.phase() == GamePhase::Placement && player != state.current_player() {
        return Err(PlacementError::NotYourTurn);
    }
    validate_slot(state, player, species, at)
}

/// Decide who places next after `last` placed, or start play.
///
/// Turns alternate while both players have room. A player with a full roster
/// is skipped.
pub(crate) fn advance_placement(state: &mut MatchState, last: PlayerId) {
    let other = last.opponent();
    match (state.roster_full(last), state.roster_full(other)) {
        (true, true) => begin_play(state),
        (_, false) => state.current_player = other,
        (false, true) => state.current_player = last,
    }
}

/// Leave placement: player one starts turn 1.
pub(crate) fn begin_play(state: &mut MatchState) {
    state.phase = GamePhase::Playing;
    state.current_player = PlayerId::FIRST;
    state.turn_number = 1;
    state.actions_this_turn = 0;
    for player in PlayerId::ALL {
        for id in state.player(player).pieces().to_vec() {
            if let Some(unit) = state.unit_mut(id) {
                unit.start_turn();
            }
        }
    }
    info!("placement complete, {} starts", PlayerId::FIRST);
}
