//! Interaction effect table.
//!
//! Which effect a pair of units produces, and over what distance, depends
//! only on their species. Both lookups are pure functions so the whole rule
//! set can be tested without a board.

use serde::{Deserialize, Serialize};

use crate::units::Species;

/// A proximity-triggered status between two units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionEffect {
    /// No interaction.
    #[default]
    None,
    /// Target moves one cell further.
    Attract,
    /// Target moves one cell less.
    Repel,
    /// Source gains the pursuit bonus, target flees from it.
    Pursue,
    /// Source flees from the target.
    Flee,
    /// Target cannot attack and moves one cell less.
    Paralyze,
    /// Coin flip: paralyze the target or nothing.
    Intimidate,
}

/// The effect `source` exerts on `target`.
///
/// ```
/// use river_king::effects::{interaction_effect, InteractionEffect};
/// use river_king::units::Species;
///
/// assert_eq!(interaction_effect(Species::Tiger, Species::Mouse), InteractionEffect::Pursue);
/// assert_eq!(interaction_effect(Species::Mouse, Species::Tiger), InteractionEffect::Flee);
/// ```
#[must_use]
pub fn interaction_effect(source: Species, target: Species) -> InteractionEffect {
    use Species::*;

    match (source, target) {
        (Leopard | Tiger, Mouse | Squirrel) => InteractionEffect::Pursue,
        (Leopard | Tiger, Leopard | Tiger) => InteractionEffect::Repel,
        (Mouse | Squirrel, Leopard | Tiger) => InteractionEffect::Flee,
        (Mouse, Mouse) | (Squirrel, Squirrel) => InteractionEffect::Attract,
        (CatKing, Leopard | Tiger) => InteractionEffect::Attract,
        (CatKing, Mouse | Squirrel) => InteractionEffect::Intimidate,
        (MouseKing, Leopard | Tiger) => InteractionEffect::Repel,
        (MouseKing, Mouse | Squirrel) => InteractionEffect::Attract,
        _ => InteractionEffect::None,
    }
}

/// Manhattan range over which `effect` reaches from `source` to `target`.
///
/// Flee range belongs to the fleeing unit (the source): mice notice danger
/// two cells away.
#[must_use]
pub fn effect_range(source: Species, _target: Species, effect: InteractionEffect) -> u32 {
    match effect {
        InteractionEffect::Attract | InteractionEffect::Repel => {
            if source.is_king() {
                2
            } else {
                1
            }
        }
        InteractionEffect::Pursue => {
            if source == Species::Leopard {
                2
            } else {
                1
            }
        }
        InteractionEffect::Flee => {
            if source == Species::Mouse {
                2
            } else {
                1
            }
        }
        InteractionEffect::Intimidate | InteractionEffect::Paralyze => 1,
        InteractionEffect::None => 0,
    }
}

/// Range of the effect `source` exerts on `target`, or `None` if they do not
/// interact.
#[must_use]
pub fn interaction_range(source: Species, target: Species) -> Option<(InteractionEffect, u32)> {
    match interaction_effect(source, target) {
        InteractionEffect::None => None,
        effect => Some((effect, effect_range(source, target, effect))),
    }
}
