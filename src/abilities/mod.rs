//! Special abilities.
//!
//! Every species except the mouse has one active ability, usable once per
//! match and only by a unit that has not acted this turn. Nothing is
//! consumed unless every precondition holds.
//!
//! ## Key Types
//!
//! - `AbilityOutcome`: What a successful ability use did
//!
//! | Species   | Ability                                        | Ends turn |
//! |-----------|------------------------------------------------|-----------|
//! | Leopard   | Free river crossing from now on                | no        |
//! | Tiger     | Roar: damage the enemy king                    | yes       |
//! | Squirrel  | Throw: damage two chosen enemies               | yes       |
//! | Cat king  | Rally: move a random friendly unit, heal king  | yes       |
//! | Mouse king| Revive a random dead friendly unit             | yes       |

mod direct_damage;
mod resolver;
mod royal;

pub use resolver::{can_use_ability, cancel_throw, select_throw_target, use_special_ability};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::point::Point;
use crate::rules::Hit;
use crate::units::UnitId;

/// What a successful ability use did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityOutcome {
    /// A leopard may now cross the river at will.
    RiverCrossing { unit: UnitId },
    /// A tiger hit the enemy king.
    Roar { king: UnitId, damage: i32, defeated: bool },
    /// A squirrel is waiting for its two targets.
    AwaitingTargets { thrower: UnitId },
    /// A squirrel throw landed.
    Thrown { thrower: UnitId, hits: SmallVec<[ThrowHit; 2]> },
    /// The cat king moved a friendly unit and healed.
    Rally { unit: UnitId, to: Point, healed: i32 },
    /// The mouse king brought a unit back.
    Revive { unit: UnitId, at: Point },
}

/// One target of a squirrel throw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowHit {
    pub target: UnitId,
    pub damage: i32,
    pub defeated: bool,
}

impl From<Hit> for ThrowHit {
    fn from(hit: Hit) -> Self {
        Self {
            target: hit.target,
            damage: hit.damage,
            defeated: hit.defeated,
        }
    }
}

impl AbilityOutcome {
    /// True if the owner's turn is over after this outcome.
    ///
    /// `AwaitingTargets` is not finished yet, so it does not end the turn.
    #[must_use]
    pub fn ends_turn(&self) -> bool {
        !matches!(
            self,
            AbilityOutcome::RiverCrossing { .. } | AbilityOutcome::AwaitingTargets { .. }
        )
    }

    /// True once the ability has fully resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !matches!(self, AbilityOutcome::AwaitingTargets { .. })
    }
}
