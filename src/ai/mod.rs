//! Computer players.
//!
//! ## Key Types
//!
//! - `PlacementStrategy` / `UniformPlacement`: automatic placement
//! - `ActionPolicy` / `UniformActions` / `AggressiveActions`: automatic play
//!
//! All randomness comes from the engine's [`RandomSource`](crate::core::RandomSource),
//! so a seeded engine replays the same computer moves.

mod policy;

pub use policy::{play_out, ActionPolicy, AggressiveActions, PlacementStrategy, UniformActions, UniformPlacement};
