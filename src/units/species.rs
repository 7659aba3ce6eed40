//! Species definitions.
//!
//! Each species is a variant with fixed base stats. Behaviour that differs
//! per species (interaction effects, abilities) is dispatched with
//! exhaustive matches on [`Species`] rather than through a trait hierarchy,
//! so every rule for a species can be read in one place.

use serde::{Deserialize, Serialize};

/// Side affiliation of a unit. Can change through the exchange rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Cat,
    Mouse,
}

impl Faction {
    /// The opposite faction.
    #[must_use]
    pub const fn flipped(self) -> Faction {
        match self {
            Faction::Cat => Faction::Mouse,
            Faction::Mouse => Faction::Cat,
        }
    }
}

/// Every kind of unit in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    Leopard,
    Tiger,
    Mouse,
    Squirrel,
    CatKing,
    MouseKing,
}

/// Base stats of a species.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeciesStats {
    pub attack: i32,
    /// Starting health. Kings use the configured king health instead.
    pub health: i32,
    pub move_distance: i32,
    pub attack_range: u32,
}

impl Species {
    /// Species that can be assigned to rosters and placed by players.
    pub const REGULAR: [Species; 4] = [
        Species::Leopard,
        Species::Tiger,
        Species::Mouse,
        Species::Squirrel,
    ];

    /// Base stats.
    #[must_use]
    pub const fn stats(self) -> SpeciesStats {
        match self {
            Species::Leopard => SpeciesStats { attack: 4, health: 3, move_distance: 2, attack_range: 1 },
            Species::Tiger => SpeciesStats { attack: 4, health: 4, move_distance: 2, attack_range: 1 },
            Species::Mouse => SpeciesStats { attack: 5, health: 1, move_distance: 2, attack_range: 1 },
            Species::Squirrel => SpeciesStats { attack: 2, health: 5, move_distance: 2, attack_range: 2 },
            Species::CatKing | Species::MouseKing => {
                SpeciesStats { attack: 0, health: 50, move_distance: 0, attack_range: 0 }
            }
        }
    }

    /// Kings never move and their loss ends the match.
    #[must_use]
    pub const fn is_king(self) -> bool {
        matches!(self, Species::CatKing | Species::MouseKing)
    }

    /// Leopards and tigers.
    #[must_use]
    pub const fn is_big_cat(self) -> bool {
        matches!(self, Species::Leopard | Species::Tiger)
    }

    /// Mice and squirrels.
    #[must_use]
    pub const fn is_rodent(self) -> bool {
        matches!(self, Species::Mouse | Species::Squirrel)
    }

    /// False for species whose ability is passive (the mouse survival clamp).
    #[must_use]
    pub const fn has_active_ability(self) -> bool {
        !matches!(self, Species::Mouse)
    }

    /// Whether a successful ability use ends the owner's turn.
    #[must_use]
    pub const fn ability_ends_turn(self) -> bool {
        !matches!(self, Species::Leopard)
    }

    /// The king species that leads a faction at match start.
    #[must_use]
    pub const fn king_of(faction: Faction) -> Species {
        match faction {
            Faction::Cat => Species::CatKing,
            Faction::Mouse => Species::MouseKing,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Species::Leopard => "Leopard",
            Species::Tiger => "Tiger",
            Species::Mouse => "Mouse",
            Species::Squirrel => "Squirrel",
            Species::CatKing => "CatKing",
            Species::MouseKing => "MouseKing",
        }
    }

    /// Display tag for text and graphical boards.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Species::Leopard => "🐆",
            Species::Tiger => "🐅",
            Species::Mouse => "🐁",
            Species::Squirrel => "🐿️",
            Species::CatKing => "🐱",
            Species::MouseKing => "🐭",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_table() {
        assert_eq!(Species::Leopard.stats().attack, 4);
        assert_eq!(Species::Leopard.stats().health, 3);
        assert_eq!(Species::Tiger.stats().health, 4);
        assert_eq!(Species::Mouse.stats().attack, 5);
        assert_eq!(Species::Mouse.stats().health, 1);
        assert_eq!(Species::Squirrel.stats().attack_range, 2);
        assert_eq!(Species::CatKing.stats().move_distance, 0);
        assert_eq!(Species::MouseKing.stats().attack, 0);
    }

    #[test]
    fn test_classification() {
        for species in Species::REGULAR {
            assert!(!species.is_king());
            assert_ne!(species.is_big_cat(), species.is_rodent());
        }
        assert!(Species::CatKing.is_king());
        assert!(Species::MouseKing.is_king());
    }

    #[test]
    fn test_ability_flags() {
        assert!(!Species::Mouse.has_active_ability());
        assert!(Species::Squirrel.has_active_ability());
        assert!(!Species::Leopard.ability_ends_turn());
        assert!(Species::Tiger.ability_ends_turn());
    }

    #[test]
    fn test_faction_flip() {
        assert_eq!(Faction::Cat.flipped(), Faction::Mouse);
        assert_eq!(Faction::Mouse.flipped().flipped(), Faction::Mouse);
        assert_eq!(Species::king_of(Faction::Mouse), Species::MouseKing);
    }
}
