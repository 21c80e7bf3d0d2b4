//! GLB scene handles shared by building and vehicle visuals, plus the
//! primitive placeholders drawn when a model is missing or failed to load.

use std::collections::{HashMap, HashSet};

use bevy::asset::LoadState;
use bevy::prelude::*;

use simulation::archetypes::VehicleArchetype;
use simulation::config::TILE_SIZE;

/// Scene handles keyed by asset path. Each path is requested once; a failed
/// load is terminal and the path is never retried.
#[derive(Resource, Default)]
pub struct ModelCache {
    scenes: HashMap<&'static str, Handle<Scene>>,
    failed: HashSet<&'static str>,
}

impl ModelCache {
    /// Handle for `path`, starting the load on first use. `None` once the
    /// path is known to have failed.
    pub fn scene(&mut self, path: &'static str, asset_server: &AssetServer) -> Option<Handle<Scene>> {
        if self.failed.contains(path) {
            return None;
        }
        let handle = self
            .scenes
            .entry(path)
            .or_insert_with(|| asset_server.load(bevy::gltf::GltfAssetLabel::Scene(0).from_asset(path)));
        Some(handle.clone())
    }

    pub fn is_failed(&self, path: &str) -> bool {
        self.failed.contains(path)
    }

    /// Returns `true` the first time `path` is marked.
    pub fn mark_failed(&mut self, path: &'static str) -> bool {
        self.failed.insert(path)
    }

    pub fn pending(&self) -> impl Iterator<Item = (&'static str, &Handle<Scene>)> {
        self.scenes
            .iter()
            .filter(|(path, _)| !self.failed.contains(*path))
            .map(|(path, handle)| (*path, handle))
    }
}

/// Shared primitive meshes and materials for stand-in visuals.
#[derive(Resource)]
pub struct PlaceholderAssets {
    pub building_mesh: Handle<Mesh>,
    pub building_material: Handle<StandardMaterial>,
    pub vehicle_mesh: Handle<Mesh>,
    pub vehicle_materials: HashMap<VehicleArchetype, Handle<StandardMaterial>>,
}

pub fn setup_placeholder_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Sits on the ground rather than straddling it.
    let side = TILE_SIZE * 0.4;
    let building_mesh =
        meshes.add(Mesh::from(Cuboid::new(side, side, side)).translated_by(Vec3::Y * side * 0.5));
    let building_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.55, 0.55),
        perceptual_roughness: 0.8,
        ..default()
    });
    let vehicle_mesh = meshes.add(Cuboid::new(1.0, 0.6, 1.8));
    let vehicle_materials = VehicleArchetype::ALL
        .iter()
        .map(|&v| {
            let material = materials.add(StandardMaterial {
                base_color: v.placeholder_color(),
                ..default()
            });
            (v, material)
        })
        .collect();

    commands.insert_resource(PlaceholderAssets {
        building_mesh,
        building_material,
        vehicle_mesh,
        vehicle_materials,
    });
}

/// Poll outstanding loads and record failures so callers fall back to
/// placeholders.
pub fn poll_model_failures(asset_server: Res<AssetServer>, mut cache: ResMut<ModelCache>) {
    let failed: Vec<&'static str> = cache
        .pending()
        .filter(|(_, handle)| matches!(asset_server.load_state(handle.id()), LoadState::Failed(_)))
        .map(|(path, _)| path)
        .collect();
    for path in failed {
        if cache.mark_failed(path) {
            warn!("Model '{path}' failed to load, using placeholder");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_failed_reports_first_time_only() {
        let mut cache = ModelCache::default();
        assert!(!cache.is_failed("models/cars/van.glb"));
        assert!(cache.mark_failed("models/cars/van.glb"));
        assert!(!cache.mark_failed("models/cars/van.glb"));
        assert!(cache.is_failed("models/cars/van.glb"));
    }

    #[test]
    fn test_failed_paths_are_not_pending() {
        let mut cache = ModelCache::default();
        cache.scenes.insert("a.glb", Handle::default());
        cache.scenes.insert("b.glb", Handle::default());
        cache.mark_failed("a.glb");
        let pending: Vec<_> = cache.pending().map(|(p, _)| p).collect();
        assert_eq!(pending, vec!["b.glb"]);
    }
}
