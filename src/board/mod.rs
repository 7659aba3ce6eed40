//! Board system: the grid, its cells and what occupies them.
//!
//! ## Key Types
//!
//! - `Board`: Square grid with a middle river column
//! - `Cell`: One square, with its coordinate and at most one occupant
//! - `Occupant`: A unit (by id) or neutral landscape
//! - `BoardSnapshot`: Owned, serializable view of the board for hosts

mod grid;
mod snapshot;

pub use grid::{Board, Cell, Landscape, Occupant};
pub use snapshot::{BoardSnapshot, CellView, UnitView};
