//! Core engine types: coordinates, players, state, actions, RNG, configuration.
//!
//! These are the building blocks every other module works on. Rule logic
//! lives in `rules`, `effects` and `abilities`; this module only stores
//! and hands out data.

pub mod action;
pub mod config;
pub mod player;
pub mod point;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use config::{BoardSize, MatchConfig};
pub use player::{Player, PlayerId, PlayerMap};
pub use point::Point;
pub use rng::{choose, GameRng, GameRngState, RandomSource, ScriptedRandom};
pub use state::{MatchState, PendingThrow};
