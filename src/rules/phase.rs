//! Match phases and the results of resolved intents.

use serde::{Deserialize, Serialize};

use crate::core::point::Point;
use crate::units::UnitId;

/// Match-level state machine.
///
/// `Setup -> Placement -> Playing <-> SquirrelAbility -> GameOver`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// No match yet; the board size may be configured.
    #[default]
    Setup,
    /// Players alternate placing their pieces.
    Placement,
    /// The turn loop.
    Playing,
    /// A squirrel is waiting for its two throw targets.
    SquirrelAbility,
    /// Terminal. No further mutating intents are accepted.
    GameOver,
}

impl GamePhase {
    /// True in the phases where a victory check runs.
    #[must_use]
    pub const fn is_in_play(self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::SquirrelAbility)
    }
}

/// What a successful move-or-attack did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The unit walked to an empty cell.
    Moved { from: Point, to: Point },
    /// The unit hit the enemy on the destination and stayed put.
    Attacked {
        target: UnitId,
        damage: i32,
        defeated: bool,
        /// Attacker and defender swapped sides afterwards.
        exchanged: bool,
    },
}

impl Outcome {
    /// True for a kill.
    #[must_use]
    pub fn defeated(&self) -> bool {
        matches!(self, Outcome::Attacked { defeated: true, .. })
    }
}
