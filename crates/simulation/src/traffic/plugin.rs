use bevy::prelude::*;

use super::simulator::TrafficSimulator;
use super::systems::tick_traffic;
use super::types::TrafficConfig;
use crate::road_graph::{rebuild_road_graph, RoadGraph};
use crate::SimulationUpdateSet;

pub struct TrafficPlugin;

impl Plugin for TrafficPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrafficConfig>()
            .init_resource::<RoadGraph>()
            .init_resource::<TrafficSimulator>()
            .add_systems(
                Update,
                (rebuild_road_graph, tick_traffic)
                    .chain()
                    .in_set(SimulationUpdateSet::Simulate),
            );
    }
}
