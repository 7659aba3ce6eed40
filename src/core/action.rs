//! Intents accepted by the engine and the history log built from them.
//!
//! Every intent that changes the match is appended to the history as an
//! [`ActionRecord`], so hosts can show a log or replay a match against the
//! same seed.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::point::Point;
use crate::units::{Species, UnitId};

/// A state-changing intent.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Place a new unit during the placement phase.
    Place { species: Species, at: Point },
    /// Move a unit, or attack the enemy standing on the destination.
    MoveOrAttack { unit: UnitId, to: Point },
    /// Trigger a unit's special ability.
    UseAbility { unit: UnitId },
    /// Pick one of the two squirrel throw targets.
    SelectTarget { target: UnitId },
    /// Leave the squirrel target sub-phase without throwing.
    CancelAbility,
    /// End the turn without acting further.
    SkipTurn,
}

impl Action {
    /// The unit this intent acts with, if any.
    #[must_use]
    pub fn actor(&self) -> Option<UnitId> {
        match self {
            Action::MoveOrAttack { unit, .. } | Action::UseAbility { unit } => Some(*unit),
            Action::Place { .. }
            | Action::SelectTarget { .. }
            | Action::CancelAbility
            | Action::SkipTurn => None,
        }
    }
}

/// A record of an accepted intent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Player who issued the intent.
    pub player: PlayerId,
    /// The intent itself.
    pub action: Action,
    /// Turn number when it was accepted.
    pub turn: u32,
    /// Sequence number within the turn.
    pub sequence: u32,
}
