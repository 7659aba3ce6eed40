//! Rules: the match engine and everything it validates and resolves.
//!
//! ## Key Types
//!
//! - `MatchEngine`: Owns a match and accepts intents
//! - `GamePhase`: Setup, Placement, Playing, SquirrelAbility, GameOver
//! - `Outcome`: What a move-or-attack did
//! - `ClickOutcome`: What a board click did
//!
//! ## Turn Flow
//!
//! A turn lasts until the player skips, uses an ability that ends the turn,
//! or has no legal move or attack left after acting. Ending a turn sweeps
//! timed effects for every unit and refreshes the next player's units.
//! The match ends as soon as a player has lost their king or is down to
//! the piece threshold.

mod combat;
mod engine;
mod input;
mod movement;
mod phase;
mod placement;
mod turn;

pub use combat::{can_exchange, Hit};
pub use engine::MatchEngine;
pub use input::ClickOutcome;
pub use movement::{valid_moves, valid_walks, validate_move, MovePlan};
pub use phase::{GamePhase, Outcome};
pub use placement::{home_columns, open_home_cells, validate_placement};
pub use turn::{is_exhausted, losing_player};

pub(crate) use combat::deal_damage;
pub(crate) use movement::execute_move;
