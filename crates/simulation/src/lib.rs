//! Headless core of the tile city: grid math, archetype catalog, the
//! authoritative building list, placement commit and preview validity, the
//! road graph and the pooled traffic simulator.
//!
//! Nothing here touches rendering or windowing; hosts drive it through the
//! events in [`placement`] and read state from the resources it registers.

use bevy::prelude::*;

pub mod archetypes;
pub mod buildings;
pub mod config;
pub mod grid;
pub mod placement;
pub mod road_graph;
pub mod sim_rng;
pub mod simulation_sets;
pub mod traffic;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;


pub use simulation_sets::SimulationUpdateSet;

use buildings::CityBuildings;

/// Frames processed since startup. Incremented at the start of `Simulate`.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        simulation_sets::configure_sets(app);

        app.init_resource::<TickCounter>()
            .init_resource::<CityBuildings>()
            .add_systems(
                Update,
                tick_counter.in_set(SimulationUpdateSet::Simulate),
            );

        app.add_plugins((
            sim_rng::SimRngPlugin,
            placement::PlacementPlugin,
            traffic::TrafficPlugin,
        ));
    }
}

pub fn tick_counter(mut tick: ResMut<TickCounter>) {
    tick.0 = tick.0.wrapping_add(1);
}
