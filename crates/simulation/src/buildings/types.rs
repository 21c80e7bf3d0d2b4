use std::fmt;

use serde::{Deserialize, Serialize};

use crate::archetypes::{ArchetypeError, BuildingArchetype};
use crate::grid::{GridPos, Rotation};

pub type BuildingId = u64;

/// One placed building as exchanged with the external store.
///
/// `kind` is kept as the raw archetype key so records with keys this build
/// does not know still round-trip and still occupy their cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    #[serde(rename = "type")]
    pub kind: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub rotation: Rotation,
}

impl Building {
    pub fn new(id: BuildingId, archetype: BuildingArchetype, pos: GridPos, rotation: Rotation) -> Self {
        Self {
            id,
            kind: archetype.key().to_string(),
            x: pos.x,
            y: pos.y,
            rotation,
        }
    }

    pub fn pos(&self) -> GridPos {
        GridPos::new(self.x, self.y)
    }

    pub fn archetype(&self) -> Result<BuildingArchetype, ArchetypeError> {
        BuildingArchetype::from_key(&self.kind)
    }
}

/// Why a mutation of the building list was refused. The list is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Another building already sits on the cell.
    Occupied(GridPos),
    /// The cell is outside the playable grid.
    OutOfBounds(GridPos),
    /// No building with this id exists.
    UnknownBuilding(BuildingId),
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::Occupied(pos) => write!(f, "cell {pos} is already occupied"),
            PlacementError::OutOfBounds(pos) => write!(f, "cell {pos} is outside the map"),
            PlacementError::UnknownBuilding(id) => write!(f, "no building with id {id}"),
        }
    }
}

impl std::error::Error for PlacementError {}
