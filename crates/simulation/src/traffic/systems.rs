use bevy::prelude::*;

use super::simulator::TrafficSimulator;
use crate::road_graph::RoadGraph;
use crate::sim_rng::SimRng;

/// Per-frame traffic tick. Agents stranded by a graph rebuild are recycled
/// before anything moves.
pub fn tick_traffic(
    time: Res<Time>,
    graph: Res<RoadGraph>,
    mut sim: ResMut<TrafficSimulator>,
    mut rng: ResMut<SimRng>,
) {
    if graph.is_changed() {
        let released = sim.release_stale(&graph);
        if released > 0 {
            debug!("Released {released} vehicles stranded by road changes");
        }
    }
    let outcome = sim.update(time.delta_secs(), &graph, &mut rng.0);
    if outcome.finished > 0 || outcome.spawned > 0 {
        trace!(
            "Traffic: +{} spawned, {} finished, {} active",
            outcome.spawned,
            outcome.finished,
            sim.active_count()
        );
    }
}
