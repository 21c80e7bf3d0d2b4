use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{GRID_CELLS, HALF_EXTENT, TILE_SIZE};

/// Integer cell coordinate in city space. `y` is the second map axis and
/// maps to world `z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(self) -> bool {
        (0..GRID_CELLS).contains(&self.x) && (0..GRID_CELLS).contains(&self.y)
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Centre of the cell on the ground plane.
    pub fn to_world(self) -> Vec3 {
        grid_to_world(self.x, self.y)
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// `world = grid * TILE_SIZE - HALF_EXTENT` on both ground axes.
pub fn grid_to_world(x: i32, y: i32) -> Vec3 {
    Vec3::new(
        x as f32 * TILE_SIZE - HALF_EXTENT,
        0.0,
        y as f32 * TILE_SIZE - HALF_EXTENT,
    )
}

/// Snap a ground-plane point to the nearest cell. Returns `None` when the
/// snapped point lies outside the playable half-extent on either axis.
pub fn world_to_grid(world_x: f32, world_z: f32) -> Option<GridPos> {
    if !world_x.is_finite() || !world_z.is_finite() {
        return None;
    }
    let snapped_x = (world_x / TILE_SIZE).round() * TILE_SIZE;
    let snapped_z = (world_z / TILE_SIZE).round() * TILE_SIZE;
    if snapped_x.abs() > HALF_EXTENT || snapped_z.abs() > HALF_EXTENT {
        return None;
    }
    let x = ((snapped_x + HALF_EXTENT) / TILE_SIZE).round() as i32;
    let y = ((snapped_z + HALF_EXTENT) / TILE_SIZE).round() as i32;
    Some(GridPos::new(x, y))
}

/// Quarter-turn orientation of a placed building, stored as degrees
/// `0 | 90 | 180 | 270` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    pub fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Snap an arbitrary angle to the nearest quarter turn. Non-finite input maps to `Deg0`.
    pub fn from_degrees(degrees: f64) -> Self {
        if !degrees.is_finite() {
            return Self::Deg0;
        }
        match (degrees / 90.0).round().rem_euclid(4.0) as i32 {
            1 => Self::Deg90,
            2 => Self::Deg180,
            3 => Self::Deg270,
            _ => Self::Deg0,
        }
    }

    /// Next orientation clockwise on the map (`+90` degrees, wrapping).
    pub fn next(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    pub fn to_radians(self) -> f32 {
        (self.degrees() as f32).to_radians()
    }
}

impl Serialize for Rotation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.degrees())
    }
}

impl<'de> Deserialize<'de> for Rotation {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let degrees = f64::deserialize(deserializer)?;
        Ok(Self::from_degrees(degrees))
    }
}

/// Unit step between neighbouring cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const WEST: Offset = Offset::new(-1, 0);
    pub const EAST: Offset = Offset::new(1, 0);
    pub const NORTH: Offset = Offset::new(0, -1);
    pub const SOUTH: Offset = Offset::new(0, 1);

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub fn reversed(self) -> Self {
        Self::new(-self.dx, -self.dy)
    }

    /// `90 -> (-dy, dx)`, `180 -> (-dx, -dy)`, `270 -> (dy, -dx)`.
    pub fn rotated(self, rotation: Rotation) -> Self {
        let Self { dx, dy } = self;
        match rotation {
            Rotation::Deg0 => Self::new(dx, dy),
            Rotation::Deg90 => Self::new(-dy, dx),
            Rotation::Deg180 => Self::new(-dx, -dy),
            Rotation::Deg270 => Self::new(dy, -dx),
        }
    }

    pub fn apply(self, pos: GridPos) -> GridPos {
        pos.offset(self.dx, self.dy)
    }
}
