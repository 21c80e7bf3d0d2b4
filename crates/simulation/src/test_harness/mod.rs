//! # TestCity: headless integration test harness
//!
//! Provides a fluent builder that wraps `bevy::app::App` + `SimulationPlugin`
//! for running integration tests without a window or renderer. Time advances
//! by a fixed manual step and the RNG is seeded, so runs are reproducible.

mod queries;
mod setup;

use std::time::Duration;

use bevy::app::App;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::config::DEFAULT_SEED;
use crate::sim_rng::SimRng;
use crate::traffic::TrafficConfig;
use crate::SimulationPlugin;

/// Simulated seconds per `tick()`. Kept under `Time<Virtual>`'s default
/// max delta so no frame is clamped.
pub const TICK_SECS: f32 = 0.1;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
///
/// Use builder methods to set up city state, then call `tick()` to advance the
/// simulation and query/assert on the resulting ECS state.
pub struct TestCity {
    app: App,
}

impl Default for TestCity {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCity {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new **empty** city with default traffic settings and the
    /// default seed.
    pub fn new() -> Self {
        Self::with_config(TrafficConfig::default(), DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(TrafficConfig::default(), seed)
    }

    /// Traffic config and seed must be in place before `SimulationPlugin`
    /// builds, so they are constructor arguments rather than builder methods.
    pub fn with_config(config: TrafficConfig, seed: u64) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(
            Duration::from_secs_f32(TICK_SECS),
        ));
        app.insert_resource(config);
        app.insert_resource(SimRng::from_seed_u64(seed));
        app.add_plugins(SimulationPlugin);

        // Run one update so Startup systems execute and the empty graph is built.
        app.update();

        Self { app }
    }

    // -----------------------------------------------------------------------
    // Time
    // -----------------------------------------------------------------------

    /// Run one frame (`TICK_SECS` of simulated time).
    pub fn tick(&mut self) {
        self.app.update();
    }

    pub fn tick_n(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
        }
    }

    /// Run enough frames to cover `secs` of simulated time.
    pub fn advance_secs(&mut self, secs: f32) {
        let frames = (secs / TICK_SECS).ceil().max(0.0) as u32;
        self.tick_n(frames);
    }

    // -----------------------------------------------------------------------
    // Raw access
    // -----------------------------------------------------------------------

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }
}
