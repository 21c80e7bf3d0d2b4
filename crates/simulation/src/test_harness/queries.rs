//! Read-only queries and input helpers for integration tests.

use bevy::prelude::*;

use crate::archetypes::BuildingArchetype;
use crate::buildings::CityBuildings;
use crate::grid::GridPos;
use crate::placement::{
    ActiveBuild, CancelBuild, DemolishSelected, RotateSelected, SelectedBuilding, TileSelected,
};
use crate::road_graph::RoadGraph;
use crate::traffic::{TrafficSimulator, VehicleAgent};

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // State
    // -----------------------------------------------------------------------

    pub fn buildings(&self) -> &CityBuildings {
        self.resource::<CityBuildings>()
    }

    pub fn building_count(&self) -> usize {
        self.buildings().len()
    }

    pub fn road_graph(&self) -> &RoadGraph {
        self.resource::<RoadGraph>()
    }

    pub fn traffic(&self) -> &TrafficSimulator {
        self.resource::<TrafficSimulator>()
    }

    pub fn active_vehicles(&self) -> Vec<VehicleAgent> {
        self.traffic()
            .pool()
            .agents()
            .iter()
            .filter(|a| a.active)
            .cloned()
            .collect()
    }

    pub fn active_build(&self) -> ActiveBuild {
        *self.resource::<ActiveBuild>()
    }

    pub fn selected(&self) -> SelectedBuilding {
        *self.resource::<SelectedBuilding>()
    }

    // -----------------------------------------------------------------------
    // Host actions (take effect on the next tick)
    // -----------------------------------------------------------------------

    pub fn start_build(&mut self, archetype: BuildingArchetype) {
        self.world_mut().resource_mut::<ActiveBuild>().start(archetype);
    }

    pub fn click_tile(&mut self, x: i32, y: i32) {
        self.world_mut().send_event(TileSelected {
            pos: GridPos::new(x, y),
        });
    }

    pub fn cancel_build(&mut self) {
        self.world_mut().send_event(CancelBuild);
    }

    pub fn rotate_selected(&mut self) {
        self.world_mut().send_event(RotateSelected);
    }

    pub fn demolish_selected(&mut self) {
        self.world_mut().send_event(DemolishSelected);
    }

    /// Take every pending event of type `E` out of the queue.
    pub fn drain_events<E: Event>(&mut self) -> Vec<E> {
        self.world_mut()
            .resource_mut::<Events<E>>()
            .drain()
            .collect()
    }
}
