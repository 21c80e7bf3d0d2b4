use bevy::prelude::*;

use simulation::buildings::CityBuildings;
use simulation::config::TILE_SIZE;
use simulation::placement::{validate_placement, ActiveBuild};

use crate::building_render::rotation_quat;
use crate::input::PickedCell;

const GHOST_HEIGHT: f32 = 1.0;
const PULSE_BASE: f32 = 0.55;
const PULSE_AMPLITUDE: f32 = 0.15;
const PULSE_SPEED: f32 = 5.0;

/// Marker for the translucent preview shown while a build type is armed.
#[derive(Component)]
pub struct GhostPreview;

pub fn pulse_alpha(elapsed_secs: f32) -> f32 {
    PULSE_BASE + (elapsed_secs * PULSE_SPEED).sin() * PULSE_AMPLITUDE
}

/// Green when the picked cell can take the building, red otherwise.
pub fn ghost_color(valid: bool, alpha: f32) -> Color {
    if valid {
        Color::srgba(0.2, 0.9, 0.3, alpha)
    } else {
        Color::srgba(0.95, 0.2, 0.2, alpha)
    }
}

/// Spawn the ghost when a build type is armed and remove it when cleared.
pub fn sync_ghost_preview(
    mut commands: Commands,
    active: Res<ActiveBuild>,
    ghosts: Query<Entity, With<GhostPreview>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !active.is_changed() {
        return;
    }
    let have_ghost = !ghosts.is_empty();
    match (active.is_active(), have_ghost) {
        (true, false) => {
            let side = TILE_SIZE * 0.9;
            let mesh = meshes.add(
                Mesh::from(Cuboid::new(side, GHOST_HEIGHT, side))
                    .translated_by(Vec3::Y * GHOST_HEIGHT * 0.5),
            );
            let material = materials.add(StandardMaterial {
                base_color: ghost_color(false, PULSE_BASE),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            });
            commands.spawn((
                GhostPreview,
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::default(),
                Visibility::Hidden,
            ));
        }
        (false, true) => {
            for entity in &ghosts {
                commands.entity(entity).despawn_recursive();
            }
        }
        _ => {}
    }
}

/// Follow the picked cell, tint by validity and pulse the opacity.
#[allow(clippy::type_complexity)]
pub fn update_ghost_preview(
    time: Res<Time>,
    picked: Res<PickedCell>,
    active: Res<ActiveBuild>,
    city: Res<CityBuildings>,
    mut query: Query<
        (
            &mut Transform,
            &mut Visibility,
            &MeshMaterial3d<StandardMaterial>,
        ),
        With<GhostPreview>,
    >,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Ok((mut transform, mut vis, material)) = query.get_single_mut() else {
        return;
    };
    let Some(cell) = picked.cell else {
        *vis = Visibility::Hidden;
        return;
    };
    *vis = Visibility::Visible;
    transform.translation = cell.to_world();
    transform.rotation = rotation_quat(active.rotation);

    let valid = validate_placement(&city, active.archetype, Some(cell));
    if let Some(mat) = materials.get_mut(&material.0) {
        mat.base_color = ghost_color(valid, pulse_alpha(time.elapsed_secs()));
    }
}
