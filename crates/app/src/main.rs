use std::path::PathBuf;

use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use simulation::config::DEFAULT_SEED;
use simulation::sim_rng::SimRng;

mod city_store;

use city_store::CityStorePlugin;

const DEFAULT_CITY_PATH: &str = "city.json";

fn main() {
    let seed = std::env::var("TILECITY_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_SEED);
    let city_path = std::env::var("TILECITY_CITY")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CITY_PATH));

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "TileCity".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::Continuous,
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    // Inserted ahead of the plugin so its init_resource keeps this seed.
    .insert_resource(SimRng::from_seed_u64(seed))
    .add_plugins((
        simulation::SimulationPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
        CityStorePlugin { path: city_path },
    ));

    info!("Starting TileCity with seed {seed}");
    app.run();
}
