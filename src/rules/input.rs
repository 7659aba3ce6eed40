//! Click-driven input.
//!
//! Graphical hosts report board clicks; the engine turns them into intents
//! depending on the phase:
//! - Placement: place the pending species on the clicked cell
//! - Playing: select a friendly unit, then click a destination
//! - SquirrelAbility: pick throw targets

use log::debug;

use super::engine::MatchEngine;
use super::movement::valid_moves;
use super::phase::{GamePhase, Outcome};
use crate::abilities::AbilityOutcome;
use crate::core::point::Point;
use crate::core::rng::RandomSource;
use crate::error::EngineError;
use crate::units::{Species, UnitId};

/// What a click did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A piece was placed.
    Placed(UnitId),
    /// A friendly unit is now selected.
    Selected(UnitId),
    /// The selection was cleared.
    Deselected,
    /// The selected unit moved or attacked.
    Resolved(Outcome),
    /// A throw target was taken; carries the throw once both are chosen.
    TargetChosen(Option<AbilityOutcome>),
    /// The click had no effect.
    Ignored,
}

impl<R: RandomSource> MatchEngine<R> {
    /// Choose which species the next placement click places.
    pub fn set_pending_species(&mut self, species: Option<Species>) {
        self.pending_species = species;
    }

    /// Species the next placement click places.
    #[must_use]
    pub fn pending_species(&self) -> Option<Species> {
        self.pending_species
    }

    /// Unit selected by click input.
    #[must_use]
    pub fn selected_unit(&self) -> Option<UnitId> {
        self.state.as_ref().and_then(|s| s.selected_unit())
    }

    /// Handle a click on a board cell.
    ///
    /// While playing, clicking a friendly unit selects it (or re-selects
    /// another one), clicking the selected unit again clears the selection,
    /// and any other cell is treated as the destination of a move or attack.
    /// A refused move keeps the selection; a unit with nothing left to do is
    /// deselected.
    pub fn click(&mut self, point: Point) -> Result<ClickOutcome, EngineError> {
        match self.phase() {
            GamePhase::Setup => Ok(ClickOutcome::Ignored),
            GamePhase::GameOver => Err(EngineError::GameOver),
            GamePhase::Placement => {
                let species = self.pending_species.ok_or(EngineError::NoPendingSpecies)?;
                let player = self.current_player();
                let id = self.place_unit(player, species, point)?;
                Ok(ClickOutcome::Placed(id))
            }
            GamePhase::SquirrelAbility => {
                let Some(target) = self.unit_at(point).map(|u| u.id) else {
                    return Ok(ClickOutcome::Ignored);
                };
                Ok(ClickOutcome::TargetChosen(self.select_squirrel_target(target)?))
            }
            GamePhase::Playing => self.click_in_play(point),
        }
    }

    fn click_in_play(&mut self, point: Point) -> Result<ClickOutcome, EngineError> {
        let player = self.current_player();
        let clicked = self.unit_at(point).map(|u| (u.id, u.owner));
        let Some(state) = self.state.as_mut() else {
            return Ok(ClickOutcome::Ignored);
        };

        match (state.selected, clicked) {
            (Some(selected), Some((id, _))) if selected == id => {
                state.selected = None;
                Ok(ClickOutcome::Deselected)
            }
            (_, Some((id, owner))) if owner == player => {
                state.selected = Some(id);
                debug!("selected {id}");
                Ok(ClickOutcome::Selected(id))
            }
            (Some(selected), _) => {
                let outcome = self.move_or_attack(selected, point)?;
                if let Some(state) = self.state.as_mut() {
                    if valid_moves(state, selected).is_empty() {
                        state.selected = None;
                    }
                }
                Ok(ClickOutcome::Resolved(outcome))
            }
            (None, _) => Ok(ClickOutcome::Ignored),
        }
    }
}
