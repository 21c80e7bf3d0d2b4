use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use super::types::{TrafficConfig, VehiclePool};
use crate::archetypes::VehicleArchetype;
use crate::grid::GridPos;
use crate::road_graph::RoadGraph;

/// Smallest spawn interval accepted, so a zero config cannot spin the timer.
const MIN_SPAWN_INTERVAL_SECS: f32 = 0.01;

/// What one `update` call did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub spawned: usize,
    /// Spawn attempts that found no road node or no idle agent.
    pub skipped: usize,
    pub hops: usize,
    pub finished: usize,
}

#[derive(Resource, Debug)]
pub struct TrafficSimulator {
    config: TrafficConfig,
    pool: VehiclePool,
    /// Slots currently on a trip, in activation order.
    active: Vec<usize>,
    spawn_timer: Timer,
    clock: f64,
    next_trip: u64,
}

impl FromWorld for TrafficSimulator {
    fn from_world(world: &mut World) -> Self {
        let config = world
            .get_resource::<TrafficConfig>()
            .cloned()
            .unwrap_or_default();
        Self::new(config)
    }
}

impl TrafficSimulator {
    pub fn new(config: TrafficConfig) -> Self {
        let interval = config.spawn_interval_secs.max(MIN_SPAWN_INTERVAL_SECS);
        let mut spawn_timer = Timer::from_seconds(interval, TimerMode::Repeating);
        // first update spawns straight away
        spawn_timer.set_elapsed(spawn_timer.duration());
        Self {
            pool: VehiclePool::new(config.pool_size),
            config,
            active: Vec::new(),
            spawn_timer,
            clock: 0.0,
            next_trip: 1,
        }
    }

    pub fn config(&self) -> &TrafficConfig {
        &self.config
    }

    pub fn pool(&self) -> &VehiclePool {
        &self.pool
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Seconds of simulated time accumulated by `update`.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Advance the simulation by `dt` seconds: fire due spawns, then hop every
    /// active agent whose interval has elapsed.
    pub fn update(&mut self, dt: f32, graph: &RoadGraph, rng: &mut impl Rng) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !dt.is_finite() || dt < 0.0 {
            return outcome;
        }
        self.clock += f64::from(dt);

        self.spawn_timer.tick(Duration::from_secs_f32(dt));
        // Spawns beyond the pool size could only be skipped.
        let attempts = (self.spawn_timer.times_finished_this_tick() as usize)
            .min(self.pool.capacity().max(1));
        for _ in 0..attempts {
            if self.try_spawn(graph, rng) {
                outcome.spawned += 1;
            } else {
                outcome.skipped += 1;
            }
        }

        // Reverse order: `swap_remove` only moves an already-visited entry.
        for i in (0..self.active.len()).rev() {
            let slot = self.active[i];
            match self.step_agent(slot) {
                Step::Waiting => {}
                Step::Hopped => outcome.hops += 1,
                Step::Finished => {
                    self.pool.release(slot);
                    self.active.swap_remove(i);
                    outcome.finished += 1;
                }
            }
        }
        outcome
    }

    /// Return agents whose remaining walk touches a cell that is no longer a
    /// road node. Called after the graph was rebuilt.
    pub fn release_stale(&mut self, graph: &RoadGraph) -> usize {
        let mut released = 0;
        for i in (0..self.active.len()).rev() {
            let slot = self.active[i];
            let stale = self.pool.get(slot).is_some_and(|agent| {
                let from = agent.path_index.saturating_sub(1);
                agent.path[from.min(agent.path.len())..]
                    .iter()
                    .any(|&pos| graph.node(pos).is_none())
            });
            if stale {
                self.pool.release(slot);
                self.active.swap_remove(i);
                released += 1;
            }
        }
        released
    }

    /// Park every agent and restart the spawn timer.
    pub fn reset(&mut self) {
        for slot in self.active.drain(..) {
            self.pool.release(slot);
        }
        self.spawn_timer.reset();
        self.spawn_timer.set_elapsed(self.spawn_timer.duration());
    }

    fn try_spawn(&mut self, graph: &RoadGraph, rng: &mut impl Rng) -> bool {
        let Some(start) = graph.random_node(rng) else {
            debug!("Traffic spawn skipped: no road nodes");
            return false;
        };
        let Some(slot) = self.pool.acquire() else {
            debug!("Traffic spawn skipped: all {} vehicles busy", self.pool.capacity());
            return false;
        };

        let path = graph.generate_random_path(start, self.config.max_hops, rng);
        let archetype = VehicleArchetype::random(rng);
        let speed = self.config.base_speed + rng.gen::<f32>() * self.config.speed_jitter;
        let hop_interval = if self.config.max_hop_interval_secs > self.config.min_hop_interval_secs {
            rng.gen_range(self.config.min_hop_interval_secs..self.config.max_hop_interval_secs)
        } else {
            self.config.min_hop_interval_secs
        };
        let trip = self.next_trip;
        self.next_trip += 1;
        let clock = self.clock;
        let ride_height = self.config.ride_height;

        let Some(agent) = self.pool.get_mut(slot) else {
            return false;
        };
        agent.trip = trip;
        agent.archetype = archetype;
        agent.speed = speed;
        agent.hop_interval = hop_interval;
        agent.last_move_time = clock;
        agent.position = cell_position(start, ride_height);
        if let Some(&next) = path.get(1) {
            agent.heading = heading_between(start, next);
        }
        agent.path = path;
        agent.path_index = 1;
        self.active.push(slot);
        true
    }

    fn step_agent(&mut self, slot: usize) -> Step {
        let clock = self.clock;
        let ride_height = self.config.ride_height;
        let Some(agent) = self.pool.get_mut(slot) else {
            return Step::Finished;
        };
        if !agent.is_hop_due(clock) {
            return Step::Waiting;
        }
        let Some(&target) = agent.path.get(agent.path_index) else {
            return Step::Finished;
        };
        agent.position = cell_position(target, ride_height);
        if let Some(&after) = agent.path.get(agent.path_index + 1) {
            agent.heading = heading_between(target, after);
        }
        agent.path_index += 1;
        agent.last_move_time = clock;
        Step::Hopped
    }
}

enum Step {
    Waiting,
    Hopped,
    Finished,
}

fn cell_position(pos: GridPos, ride_height: f32) -> Vec3 {
    pos.to_world() + Vec3::Y * ride_height
}

/// Yaw facing from `from` towards `to` (grid `y` is world `z`).
pub(crate) fn heading_between(from: GridPos, to: GridPos) -> f32 {
    let dx = (to.x - from.x) as f32;
    let dz = (to.y - from.y) as f32;
    dx.atan2(dz)
}
