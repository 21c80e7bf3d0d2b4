//! Builder methods for city setup in integration tests.

use crate::archetypes::BuildingArchetype;
use crate::buildings::{Building, CityBuildings};
use crate::grid::{GridPos, Rotation};

use super::TestCity;

impl TestCity {
    /// Place a building directly in the authoritative list. Panics if the
    /// cell is taken, since that is a broken test setup.
    pub fn with_building(
        mut self,
        archetype: BuildingArchetype,
        x: i32,
        y: i32,
        rotation: Rotation,
    ) -> Self {
        self.place(archetype, x, y, rotation);
        self
    }

    pub fn with_road(self, archetype: BuildingArchetype, x: i32, y: i32, rotation: Rotation) -> Self {
        assert!(archetype.is_road(), "{archetype} is not a road");
        self.with_building(archetype, x, y, rotation)
    }

    /// Straight east-west road from `(x0, y)` to `(x1, y)` inclusive.
    pub fn with_straight_road_x(mut self, x0: i32, x1: i32, y: i32) -> Self {
        for x in x0.min(x1)..=x0.max(x1) {
            self.place(BuildingArchetype::RoadStraight, x, y, Rotation::Deg0);
        }
        self
    }

    /// Straight north-south road from `(x, y0)` to `(x, y1)` inclusive.
    pub fn with_straight_road_y(mut self, x: i32, y0: i32, y1: i32) -> Self {
        for y in y0.min(y1)..=y0.max(y1) {
            self.place(BuildingArchetype::RoadStraight, x, y, Rotation::Deg90);
        }
        self
    }

    /// Replace the list as a store refresh would.
    pub fn with_buildings(mut self, buildings: Vec<Building>) -> Self {
        self.world_mut()
            .resource_mut::<CityBuildings>()
            .replace_all(buildings);
        self
    }

    fn place(&mut self, archetype: BuildingArchetype, x: i32, y: i32, rotation: Rotation) {
        let pos = GridPos::new(x, y);
        if let Err(e) = self
            .world_mut()
            .resource_mut::<CityBuildings>()
            .try_place(archetype, pos, rotation)
        {
            panic!("test setup: cannot place {archetype} at {pos}: {e}");
        }
    }
}
