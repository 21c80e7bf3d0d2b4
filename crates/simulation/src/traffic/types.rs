use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::archetypes::VehicleArchetype;
use crate::grid::GridPos;

/// Where idle agents are parked. Below the ground plane, out of view.
pub const OFF_SCENE: Vec3 = Vec3::new(0.0, -10.0, 0.0);

/// Traffic tunables. Read once when the simulator is created; insert a custom
/// value before adding `SimulationPlugin` to override.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficConfig {
    /// Number of reusable agents. Never more than this many are active.
    pub pool_size: usize,
    pub spawn_interval_secs: f32,
    /// Maximum hops of a spawned walk (the path holds up to `max_hops + 1` cells).
    pub max_hops: usize,
    /// Each agent draws its hop interval uniformly from this range.
    pub min_hop_interval_secs: f32,
    pub max_hop_interval_secs: f32,
    /// Cosmetic cruising speed: `base_speed + U(0, speed_jitter)`.
    pub base_speed: f32,
    pub speed_jitter: f32,
    /// Height of the vehicle origin above the ground plane.
    pub ride_height: f32,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            pool_size: 15,
            spawn_interval_secs: 2.0,
            max_hops: 5,
            min_hop_interval_secs: 1.0,
            max_hop_interval_secs: 2.0,
            base_speed: 0.1,
            speed_jitter: 0.05,
            ride_height: 0.6,
        }
    }
}

/// One pooled vehicle. Lives for the whole session; `active` says whether it
/// is currently on a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleAgent {
    pub slot: usize,
    /// Bumped on every activation so visuals can tell a new trip from an old one.
    pub trip: u64,
    pub archetype: VehicleArchetype,
    pub path: Vec<GridPos>,
    /// Index of the next path cell to hop to.
    pub path_index: usize,
    pub speed: f32,
    pub active: bool,
    /// Simulation clock (seconds) of the last hop or of the spawn.
    pub last_move_time: f64,
    pub hop_interval: f32,
    pub position: Vec3,
    /// Yaw in radians; `Quat::from_rotation_y(heading) * Vec3::Z` points along travel.
    pub heading: f32,
}

impl VehicleAgent {
    fn idle(slot: usize) -> Self {
        Self {
            slot,
            trip: 0,
            archetype: VehicleArchetype::Sedan,
            path: Vec::new(),
            path_index: 0,
            speed: 0.0,
            active: false,
            last_move_time: 0.0,
            hop_interval: 0.0,
            position: OFF_SCENE,
            heading: 0.0,
        }
    }

    /// Cell the agent currently sits on, if active.
    pub fn current_cell(&self) -> Option<GridPos> {
        if !self.active {
            return None;
        }
        self.path_index
            .checked_sub(1)
            .and_then(|i| self.path.get(i))
            .copied()
    }

    pub fn is_hop_due(&self, now: f64) -> bool {
        now - self.last_move_time >= f64::from(self.hop_interval)
    }
}

/// Fixed arena of agents addressed by slot index.
#[derive(Debug, Clone)]
pub struct VehiclePool {
    agents: Vec<VehicleAgent>,
}

impl VehiclePool {
    pub fn new(size: usize) -> Self {
        Self {
            agents: (0..size).map(VehicleAgent::idle).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.agents.len()
    }

    pub fn agents(&self) -> &[VehicleAgent] {
        &self.agents
    }

    pub fn get(&self, slot: usize) -> Option<&VehicleAgent> {
        self.agents.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut VehicleAgent> {
        self.agents.get_mut(slot)
    }

    /// First idle slot, marked active. `None` when every agent is out.
    pub fn acquire(&mut self) -> Option<usize> {
        let agent = self.agents.iter_mut().find(|a| !a.active)?;
        agent.active = true;
        Some(agent.slot)
    }

    /// Park the agent off-scene and make the slot available again.
    pub fn release(&mut self, slot: usize) {
        if let Some(agent) = self.agents.get_mut(slot) {
            agent.active = false;
            agent.path.clear();
            agent.path_index = 0;
            agent.position = OFF_SCENE;
        }
    }

    pub fn active_count(&self) -> usize {
        self.agents.iter().filter(|a| a.active).count()
    }
}
