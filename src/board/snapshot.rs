//! Read-only board view for hosts.
//!
//! A snapshot copies everything a renderer needs out of the match, so hosts
//! never hold references into engine state.

use serde::{Deserialize, Serialize};

use super::grid::{Landscape, Occupant};
use crate::core::config::BoardSize;
use crate::core::player::PlayerId;
use crate::core::point::Point;
use crate::core::state::MatchState;
use crate::units::{Faction, Species, Unit, UnitId};

/// A unit as seen on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitView {
    pub id: UnitId,
    pub name: String,
    pub species: Species,
    pub owner: PlayerId,
    pub faction: Faction,
    pub health: i32,
    pub max_health: i32,
    /// Active statuses, e.g. `Paralyzed`.
    pub effects: Vec<String>,
}

impl From<&Unit> for UnitView {
    fn from(unit: &Unit) -> Self {
        Self {
            id: unit.id,
            name: unit.name.clone(),
            species: unit.species,
            owner: unit.owner,
            faction: unit.faction,
            health: unit.health,
            max_health: unit.max_health,
            effects: unit.effect_summary().into_iter().map(String::from).collect(),
        }
    }
}

/// One cell of a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub point: Point,
    pub is_river: bool,
    pub unit: Option<UnitView>,
    pub landscape: Option<Landscape>,
}

/// The whole board, row by row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: BoardSize,
    pub river_column: i32,
    pub cells: Vec<CellView>,
}

impl BoardSnapshot {
    /// Copy the board of a match.
    #[must_use]
    pub fn capture(state: &MatchState) -> Self {
        let board = state.board();
        let cells = board
            .cells()
            .map(|cell| {
                CellView {
                    point: cell.point(),
                    is_river: cell.is_river(),
                    unit: cell.unit().and_then(|id| state.unit(id)).map(UnitView::from),
                    landscape: match cell.occupant() {
                        Some(Occupant::Landscape(landscape)) => Some(landscape),
                        _ => None,
                    },
                }
            })
            .collect();
        Self {
            size: board.size(),
            river_column: board.river_column(),
            cells,
        }
    }

    /// The cell at a point.
    #[must_use]
    pub fn cell(&self, point: Point) -> Option<&CellView> {
        let n = self.size.cells();
        if !(0..n).contains(&point.x) || !(0..n).contains(&point.y) {
            return None;
        }
        self.cells.get((point.y * n + point.x) as usize)
    }

    /// Plain-text rendering, one line per row.
    #[must_use]
    pub fn render(&self) -> String {
        let n = self.size.cells() as usize;
        self.cells
            .chunks(n)
            .map(|row| {
                row.iter()
                    .map(|cell| match (&cell.unit, cell.landscape) {
                        (Some(unit), _) => unit.species.emoji(),
                        (None, Some(landscape)) => landscape.emoji(),
                        (None, None) if cell.is_river => "🌊",
                        (None, None) => "⬜",
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
