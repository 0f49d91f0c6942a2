//! Spawn location search.

use incident_events::{Area, Cell};
use rand::RngCore;

use crate::host::{EdgeCellFinder, Reachability};

/// An edge cell that was reachable from the colony when it was found.
///
/// Only [`SpawnLocator::find`] creates these; reachability is not re-checked later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnCandidate {
    cell: Cell,
}

impl SpawnCandidate {
    pub fn cell(&self) -> Cell {
        self.cell
    }
}

/// Finds where the refugee enters the area.
#[derive(Debug, Clone, Copy)]
pub struct SpawnLocator {
    road_chance: f32,
}

impl SpawnLocator {
    pub fn new(road_chance: f32) -> Self {
        Self { road_chance }
    }

    /// Samples one colony-reachable edge cell. A single failed search is final.
    pub fn find<H>(&self, area: &Area, host: &H, rng: &mut dyn RngCore) -> Option<SpawnCandidate>
    where
        H: EdgeCellFinder + Reachability + ?Sized,
    {
        let reachable = |cell: Cell| host.can_reach_colony(area, cell);
        let cell = host.find_edge_cell(area, self.road_chance, &reachable, rng)?;

        // Finder output is re-checked against the edge and reachability.
        if !area.is_edge(cell) || !reachable(cell) {
            tracing::warn!("Edge finder returned invalid cell {} in {}", cell, area.id);
            return None;
        }

        tracing::debug!("Spawn cell {} found in {}", cell, area.id);
        Some(SpawnCandidate { cell })
    }
}
