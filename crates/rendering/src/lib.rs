use bevy::prelude::*;

use simulation::config::{HALF_EXTENT, TILE_SIZE};
use simulation::SimulationUpdateSet;

pub mod building_render;
pub mod camera;
pub mod camera_smoothing;
pub mod ghost_preview;
pub mod input;
pub mod model_cache;
pub mod vehicle_render;

use camera::{CameraConfig, CameraRig};
use input::{CameraController, PickedCell};
use model_cache::ModelCache;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraConfig>()
            .init_resource::<CameraRig>()
            .init_resource::<CameraController>()
            .init_resource::<PickedCell>()
            .init_resource::<ModelCache>()
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    setup_lighting,
                    spawn_ground,
                    model_cache::setup_placeholder_assets,
                ),
            )
            .add_systems(
                Update,
                (
                    input::update_picked_cell,
                    input::mouse_camera_input,
                    input::touch_camera_input,
                    input::keyboard_shortcuts,
                )
                    .chain()
                    .in_set(SimulationUpdateSet::Input),
            )
            .add_systems(
                Update,
                (
                    camera::smooth_camera_zoom,
                    camera::apply_camera_rig,
                )
                    .chain()
                    .in_set(SimulationUpdateSet::Visual),
            )
            .add_systems(
                Update,
                (
                    model_cache::poll_model_failures,
                    building_render::sync_building_instances,
                    building_render::replace_failed_building_models,
                    building_render::animate_grow_in,
                    ghost_preview::sync_ghost_preview,
                    ghost_preview::update_ghost_preview,
                    vehicle_render::sync_vehicle_visuals,
                    vehicle_render::replace_failed_vehicle_models,
                )
                    .chain()
                    .in_set(SimulationUpdateSet::Visual),
            );
    }
}

fn setup_lighting(mut commands: Commands) {
    // Ambient light for baseline illumination
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 300.0,
    });

    // Directional light (sun) angled from above
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_4,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
    ));
}

/// Grass plane covering every cell, slightly below the building origin.
fn spawn_ground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let side = 2.0 * HALF_EXTENT + TILE_SIZE;
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(side, side))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.36, 0.55, 0.28),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(0.0, -0.01, 0.0),
    ));
}
