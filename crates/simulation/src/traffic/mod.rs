//! Pooled vehicle agents hopping along the road graph.
//!
//! A fixed pool of agents is recycled between trips. Every spawn interval one
//! idle agent (if any) is given a bounded random walk from a random road node;
//! agents then teleport one tile per hop, each on its own randomized hop
//! interval, and return to the pool when their walk is exhausted.

mod plugin;
mod simulator;
mod systems;
mod types;

pub use plugin::TrafficPlugin;
pub use simulator::{TickOutcome, TrafficSimulator};
pub use systems::tick_traffic;
pub use types::{TrafficConfig, VehicleAgent, VehiclePool, OFF_SCENE};
