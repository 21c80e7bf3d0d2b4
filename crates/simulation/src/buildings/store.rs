use std::collections::HashSet;

use bevy::prelude::*;

use super::types::{Building, BuildingId, PlacementError};
use crate::archetypes::BuildingArchetype;
use crate::grid::{GridPos, Rotation};

/// The authoritative building list.
///
/// Downstream systems react to `Res<CityBuildings>::is_changed()`; the
/// `generation` counter lets non-ECS consumers detect changes too.
#[derive(Resource, Debug, Default)]
pub struct CityBuildings {
    buildings: Vec<Building>,
    next_id: BuildingId,
    generation: u64,
}

impl CityBuildings {
    pub fn iter(&self) -> impl Iterator<Item = &Building> {
        self.buildings.iter()
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    pub fn as_slice(&self) -> &[Building] {
        &self.buildings
    }

    /// Bumped on every successful mutation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    pub fn find_at(&self, pos: GridPos) -> Option<&Building> {
        self.buildings.iter().find(|b| b.x == pos.x && b.y == pos.y)
    }

    /// Single source of truth for "is something on this cell".
    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.find_at(pos).is_some()
    }

    /// Whether a new building may go on `pos`, without mutating anything.
    pub fn check_placement(&self, pos: GridPos) -> Result<(), PlacementError> {
        if !pos.in_bounds() {
            return Err(PlacementError::OutOfBounds(pos));
        }
        if self.is_occupied(pos) {
            return Err(PlacementError::Occupied(pos));
        }
        Ok(())
    }

    /// Place a new building, returning its id.
    pub fn try_place(
        &mut self,
        archetype: BuildingArchetype,
        pos: GridPos,
        rotation: Rotation,
    ) -> Result<BuildingId, PlacementError> {
        self.check_placement(pos)?;
        let id = self.allocate_id();
        self.buildings.push(Building::new(id, archetype, pos, rotation));
        self.generation += 1;
        Ok(id)
    }

    /// Advance a building by one quarter turn. Returns the new rotation.
    pub fn rotate(&mut self, id: BuildingId) -> Result<Rotation, PlacementError> {
        let building = self.get_mut(id)?;
        building.rotation = building.rotation.next();
        let rotation = building.rotation;
        self.generation += 1;
        Ok(rotation)
    }

    pub fn set_rotation(&mut self, id: BuildingId, rotation: Rotation) -> Result<(), PlacementError> {
        let building = self.get_mut(id)?;
        if building.rotation != rotation {
            building.rotation = rotation;
            self.generation += 1;
        }
        Ok(())
    }

    /// Demolish a building and hand back its record.
    pub fn remove(&mut self, id: BuildingId) -> Result<Building, PlacementError> {
        let index = self
            .buildings
            .iter()
            .position(|b| b.id == id)
            .ok_or(PlacementError::UnknownBuilding(id))?;
        self.generation += 1;
        Ok(self.buildings.remove(index))
    }

    /// Replace the whole list with a refresh from the external store.
    ///
    /// Records sharing a cell with an earlier record, or reusing an earlier
    /// id, are dropped. Returns how many were dropped.
    pub fn replace_all(&mut self, incoming: impl IntoIterator<Item = Building>) -> usize {
        let mut cells = HashSet::new();
        let mut ids = HashSet::new();
        let mut kept = Vec::new();
        let mut dropped = 0;
        for building in incoming {
            let pos = building.pos();
            if cells.contains(&pos) || ids.contains(&building.id) {
                warn!(
                    "Dropping building {} ('{}') at {}: cell or id already taken",
                    building.id, building.kind, pos
                );
                dropped += 1;
                continue;
            }
            cells.insert(pos);
            ids.insert(building.id);
            kept.push(building);
        }
        self.next_id = kept
            .iter()
            .map(|b| b.id.saturating_add(1))
            .max()
            .unwrap_or(0)
            .max(self.next_id);
        self.buildings = kept;
        self.generation += 1;
        dropped
    }

    fn get_mut(&mut self, id: BuildingId) -> Result<&mut Building, PlacementError> {
        self.buildings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(PlacementError::UnknownBuilding(id))
    }

    /// Next free id. Once the counter reaches `u64::MAX` it wraps and
    /// skips past ids still in use.
    fn allocate_id(&mut self) -> BuildingId {
        let mut id = self.next_id;
        while self.get(id).is_some() {
            id = id.wrapping_add(1);
        }
        self.next_id = id.checked_add(1).unwrap_or_else(|| {
            warn!("Building id counter exhausted, wrapping to 0");
            0
        });
        id
    }
}
