//! Interaction effect system.
//!
//! Units react to each other by proximity:
//! - `InteractionEffect`: Attract, Repel, Pursue, Flee, Paralyze, Intimidate
//! - `interaction_effect` / `effect_range`: the pure species table
//! - `run_detection`: detection and application after a move
//! - `resolve_flee`: one-step escape from a pursuer
//! - `end_of_turn_sweep`: countdown of timed effects
//!
//! ## King auras
//!
//! Detection only looks up the table from the unit running the pass, and a
//! king only runs a pass when it is the mover or sits in a mover's nearby
//! set. Kings never move and no species has a table entry against a king,
//! so the cat king's attract and intimidate and the mouse king's attract and
//! repel never fire during play. [`apply_interactions`] on a king still
//! applies them for hosts that want to trigger an aura directly.
//!
//! ## Randomness
//!
//! Intimidate is a coin flip. The flip is drawn from the caller's
//! [`RandomSource`](crate::core::RandomSource), so effect resolution is
//! reproducible under a fixed seed or a scripted source.

mod flee;
mod interaction;
mod resolver;
mod sweep;

pub use flee::{flee_candidates, is_valid_flee_destination, resolve_flee};
pub use interaction::{effect_range, interaction_effect, interaction_range, InteractionEffect};
pub use resolver::{apply_effect, apply_interactions, detect_nearby, run_detection, Nearby};
pub use sweep::end_of_turn_sweep;
