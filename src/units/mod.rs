//! Unit system: species definitions and runtime unit state.
//!
//! ## Key Types
//!
//! - `Species`: The six kinds of unit and their base stat table
//! - `Faction`: Cat or Mouse side affiliation
//! - `UnitId`: Arena identifier for a unit
//! - `Unit`: Runtime unit state (health, turn flags, effect bookkeeping)

pub mod species;
pub mod unit;

pub use species::{Faction, Species, SpeciesStats};
pub use unit::{DamageReport, Unit, UnitId};
