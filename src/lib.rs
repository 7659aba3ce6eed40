//! # river-king
//!
//! A deterministic rule engine for the Cat vs Mouse river board game.
//!
//! Two players, one per faction, face each other across a river that splits
//! a 5x5 or 7x7 board. Each side has a king and a small drafted roster of
//! leopards, tigers, mice and squirrels. Units move in straight lines,
//! attack by moving onto enemies, react to each other by proximity
//! (attraction, repulsion, pursuit, flight, paralysis) and have one special
//! ability each. A player loses with their king, or when they are down to
//! their last piece.
//!
//! ## Design Principles
//!
//! 1. **Headless**: No rendering and no input devices. Hosts send intents
//!    and read state or a [`BoardSnapshot`](board::BoardSnapshot).
//!
//! 2. **All or Nothing**: A refused intent returns a typed error and leaves
//!    the match untouched.
//!
//! 3. **Reproducible**: Every random decision goes through an injectable
//!    [`RandomSource`](core::RandomSource). A seeded engine replays the same
//!    match from the same intents.
//!
//! ## Modules
//!
//! - `core`: Points, players, configuration, RNG, actions, match state
//! - `board`: Grid, cells, occupants and snapshots
//! - `units`: Species table and runtime unit state
//! - `effects`: Proximity interactions, flight and the end-of-turn sweep
//! - `rules`: The match engine, move validation, combat, turns, placement
//! - `abilities`: Special abilities and the squirrel target sub-phase
//! - `ai`: Computer placement and play
//! - `error`: Error types for every operation
//!
//! ## Example Usage
//!
//! ```
//! use river_king::{BoardSize, GamePhase, MatchConfig, MatchEngine, PlayerId, Point, Species};
//!
//! let mut engine = MatchEngine::with_config(MatchConfig::new(BoardSize::Seven).with_seed(1));
//! engine.start_custom_match().unwrap();
//! engine.spawn_unit(Species::CatKing, PlayerId::FIRST, Point::new(0, 3)).unwrap();
//! engine.spawn_unit(Species::MouseKing, PlayerId::SECOND, Point::new(6, 3)).unwrap();
//! let tiger = engine.spawn_unit(Species::Tiger, PlayerId::FIRST, Point::new(1, 0)).unwrap();
//! engine.spawn_unit(Species::Mouse, PlayerId::SECOND, Point::new(5, 6)).unwrap();
//!
//! engine.move_or_attack(tiger, Point::new(2, 0)).unwrap();
//! assert_eq!(engine.unit_at(Point::new(2, 0)).map(|u| u.id), Some(tiger));
//! assert_eq!(engine.phase(), GamePhase::Playing);
//! ```

pub mod abilities;
pub mod ai;
pub mod board;
pub mod core;
pub mod effects;
pub mod error;
pub mod rules;
pub mod units;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord,
    BoardSize, MatchConfig,
    GameRng, GameRngState, RandomSource, ScriptedRandom,
    MatchState, PendingThrow,
    Player, PlayerId, PlayerMap,
    Point,
};

pub use crate::board::{Board, BoardSnapshot, Cell, CellView, Landscape, Occupant, UnitView};

pub use crate::units::{Faction, Species, Unit, UnitId};

pub use crate::effects::InteractionEffect;

pub use crate::rules::{ClickOutcome, GamePhase, MatchEngine, MovePlan, Outcome};

pub use crate::abilities::{AbilityOutcome, ThrowHit};

pub use crate::ai::{ActionPolicy, AggressiveActions, PlacementStrategy, UniformActions, UniformPlacement};

pub use crate::error::{
    AbilityError, ConfigurationError, EngineError, MoveError, OutOfBounds, PlacementError, TargetError,
};
