//! Match configuration.
//!
//! Hosts build a `MatchConfig` before starting a match:
//! - `BoardSize`: the only two supported boards, 5x5 and 7x7
//! - `MatchConfig`: board size, seed and the numeric rule constants
//!
//! Every constant has the value the game ships with as its default, so
//! `MatchConfig::new(BoardSize::Seven)` is a complete configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Supported board sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardSize {
    /// 5x5 board, 4 regular pieces per player.
    Five,
    /// 7x7 board, 7 regular pieces per player.
    Seven,
}

impl BoardSize {
    /// Side length in cells.
    #[must_use]
    pub const fn cells(self) -> i32 {
        match self {
            BoardSize::Five => 5,
            BoardSize::Seven => 7,
        }
    }

    /// Index of the river column (the middle column).
    #[must_use]
    pub const fn river_column(self) -> i32 {
        self.cells() / 2
    }

    /// Maximum number of non-king pieces each player may place.
    #[must_use]
    pub const fn roster_cap(self) -> usize {
        match self {
            BoardSize::Five => 4,
            BoardSize::Seven => 7,
        }
    }
}

impl TryFrom<u8> for BoardSize {
    type Error = ConfigurationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(BoardSize::Five),
            7 => Ok(BoardSize::Seven),
            other => Err(ConfigurationError::InvalidBoardSize(other)),
        }
    }
}

impl std::fmt::Display for BoardSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.cells();
        write!(f, "{n}x{n}")
    }
}

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Board dimensions.
    pub board_size: BoardSize,

    /// Seed for the match RNG. `None` seeds from system entropy.
    pub seed: Option<u64>,

    /// Minimum damage of a regular attack.
    pub damage_floor: i32,

    /// Health cap for kings (also their starting health).
    pub king_max_health: i32,

    /// Health the cat king regains when rallying.
    pub rally_heal: i32,

    /// Attempts a fleeing unit gets before giving up.
    pub flee_attempts: u32,

    /// End-of-turn sweeps an attract or repel modifier survives.
    pub modifier_duration: u32,

    /// End-of-turn sweeps a paralysis survives.
    ///
    /// Sweeps run for every unit at the end of every turn, so a paralysis
    /// inflicted on an enemy needs two sweeps to last through their turn.
    pub paralysis_duration: u32,

    /// A player whose live piece count drops to this value or below loses.
    pub defeat_piece_threshold: usize,
}

impl MatchConfig {
    /// Default rules on the given board.
    #[must_use]
    pub fn new(board_size: BoardSize) -> Self {
        Self {
            board_size,
            seed: None,
            damage_floor: 2,
            king_max_health: 50,
            rally_heal: 5,
            flee_attempts: 3,
            modifier_duration: 1,
            paralysis_duration: 2,
            defeat_piece_threshold: 1,
        }
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the damage floor. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_damage_floor(mut self, floor: i32) -> Self {
        self.damage_floor = floor.max(1);
        self
    }

    /// Set the king health cap.
    #[must_use]
    pub fn with_king_max_health(mut self, health: i32) -> Self {
        self.king_max_health = health;
        self
    }

    /// Set the rally heal amount.
    #[must_use]
    pub fn with_rally_heal(mut self, heal: i32) -> Self {
        self.rally_heal = heal;
        self
    }

    /// Set how many times a unit tries to flee.
    #[must_use]
    pub fn with_flee_attempts(mut self, attempts: u32) -> Self {
        self.flee_attempts = attempts;
        self
    }

    /// Set the paralysis duration in end-of-turn sweeps.
    #[must_use]
    pub fn with_paralysis_duration(mut self, sweeps: u32) -> Self {
        self.paralysis_duration = sweeps;
        self
    }

    /// Set how long attract and repel last.
    #[must_use]
    pub fn with_modifier_duration(mut self, sweeps: u32) -> Self {
        self.modifier_duration = sweeps;
        self
    }

    /// Set the live piece count at or below which a player loses.
    #[must_use]
    pub fn with_defeat_piece_threshold(mut self, pieces: usize) -> Self {
        self.defeat_piece_threshold = pieces;
        self
    }

    /// Number of non-king pieces each player places.
    #[must_use]
    pub fn roster_cap(&self) -> usize {
        self.board_size.roster_cap()
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(BoardSize::Seven)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_size_from_u8() {
        assert_eq!(BoardSize::try_from(5), Ok(BoardSize::Five));
        assert_eq!(BoardSize::try_from(7), Ok(BoardSize::Seven));
        assert_eq!(
            BoardSize::try_from(6),
            Err(ConfigurationError::InvalidBoardSize(6))
        );
    }

    #[test]
    fn test_board_size_geometry() {
        assert_eq!(BoardSize::Five.river_column(), 2);
        assert_eq!(BoardSize::Seven.river_column(), 3);
        assert_eq!(BoardSize::Five.roster_cap(), 4);
        assert_eq!(BoardSize::Seven.roster_cap(), 7);
        assert_eq!(format!("{}", BoardSize::Seven), "7x7");
    }

    #[test]
    fn test_config_builder() {
        let config = MatchConfig::new(BoardSize::Five)
            .with_seed(11)
            .with_damage_floor(0)
            .with_rally_heal(3)
            .with_flee_attempts(1);

        assert_eq!(config.seed, Some(11));
        assert_eq!(config.damage_floor, 1);
        assert_eq!(config.rally_heal, 3);
        assert_eq!(config.flee_attempts, 1);
        assert_eq!(config.king_max_health, 50);
        assert_eq!(config.roster_cap(), 4);
    }

    #[test]
    fn test_config_serde() {
        let config = MatchConfig::new(BoardSize::Seven).with_seed(3);
        let json = serde_json::to_string(&config).unwrap();
        let back: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
