//! Area Types
//!
//! The operating area an incident targets and the cells inside it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A single grid cell. `x` runs west to east, `z` south to north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Returns the four orthogonal neighbours.
    pub fn neighbours(self) -> [Cell; 4] {
        [
            Cell::new(self.x + 1, self.z),
            Cell::new(self.x - 1, self.z),
            Cell::new(self.x, self.z + 1),
            Cell::new(self.x, self.z - 1),
        ]
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Unique identifier for an area
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AreaId(pub String);

impl From<&str> for AreaId {
    fn from(s: &str) -> Self {
        AreaId(s.to_string())
    }
}

impl From<String> for AreaId {
    fn from(s: String) -> Self {
        AreaId(s)
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A rectangular area controlled (in part) by the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    /// Unique identifier
    pub id: AreaId,
    /// Display label, used in dialog titles
    pub label: String,
    /// Width in cells
    pub width: i32,
    /// Height in cells
    pub height: i32,
    /// Cells carrying a road
    #[serde(default)]
    pub roads: BTreeSet<Cell>,
}

impl Area {
    pub fn new(id: impl Into<AreaId>, label: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            width,
            height,
            roads: BTreeSet::new(),
        }
    }

    /// Adds road cells to the area.
    pub fn with_roads(mut self, roads: impl IntoIterator<Item = Cell>) -> Self {
        self.roads.extend(roads);
        self
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.z >= 0 && cell.x < self.width && cell.z < self.height
    }

    /// True if the cell lies on the outermost ring of the area.
    pub fn is_edge(&self, cell: Cell) -> bool {
        self.contains(cell)
            && (cell.x == 0 || cell.z == 0 || cell.x == self.width - 1 || cell.z == self.height - 1)
    }

    /// Returns every edge cell exactly once, in a stable order.
    pub fn edge_cells(&self) -> Vec<Cell> {
        if self.width <= 0 || self.height <= 0 {
            return Vec::new();
        }

        let mut cells = BTreeSet::new();
        for x in 0..self.width {
            cells.insert(Cell::new(x, 0));
            cells.insert(Cell::new(x, self.height - 1));
        }
        for z in 0..self.height {
            cells.insert(Cell::new(0, z));
            cells.insert(Cell::new(self.width - 1, z));
        }
        cells.into_iter().collect()
    }

    /// True if the cell is a road or touches one.
    pub fn is_road_adjacent(&self, cell: Cell) -> bool {
        self.roads.contains(&cell) || cell.neighbours().iter().any(|n| self.roads.contains(n))
    }
}
