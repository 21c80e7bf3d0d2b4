use std::collections::HashSet;

use bevy::prelude::*;

use simulation::archetypes::BuildingArchetype;
use simulation::buildings::{Building, BuildingId, CityBuildings};
use simulation::grid::Rotation;

use crate::model_cache::{ModelCache, PlaceholderAssets};

/// Ticks of the grow-in animation; each adds a tenth of the final scale.
const GROW_STEPS: u32 = 10;
const GROW_STEP_SECS: f32 = 0.016;

/// Visual instance of one entry in `CityBuildings`.
#[derive(Component, Debug, Clone, Copy)]
pub struct BuildingInstance {
    pub building_id: BuildingId,
    pub archetype: BuildingArchetype,
}

/// Instance drawn with the grey stand-in cube instead of its model.
#[derive(Component)]
pub struct PlaceholderModel;

/// Scale-in from zero after spawn. Removed once complete.
#[derive(Component, Debug)]
pub struct GrowIn {
    timer: Timer,
    steps_done: u32,
    target_scale: f32,
}

impl GrowIn {
    pub fn new(target_scale: f32) -> Self {
        Self {
            timer: Timer::from_seconds(GROW_STEP_SECS, TimerMode::Repeating),
            steps_done: 0,
            target_scale,
        }
    }

    /// Apply `steps` more ticks; returns the current scale.
    pub fn advance(&mut self, steps: u32) -> f32 {
        self.steps_done = (self.steps_done + steps).min(GROW_STEPS);
        self.target_scale * self.steps_done as f32 / GROW_STEPS as f32
    }

    pub fn is_done(&self) -> bool {
        self.steps_done >= GROW_STEPS
    }
}

/// Grid rotations turn `+x` toward `+y`, which is world `+z`; Bevy's yaw
/// turns `+x` toward `-z`, hence the sign flip.
pub fn rotation_quat(rotation: Rotation) -> Quat {
    Quat::from_rotation_y(-rotation.to_radians())
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Instances whose building is gone, plus duplicates for one id.
    pub despawn: Vec<Entity>,
    /// Buildings with no instance yet, in list order.
    pub spawn: Vec<BuildingId>,
}

pub fn plan_sync(existing: &[(Entity, BuildingId)], buildings: &[Building]) -> SyncPlan {
    let wanted: HashSet<BuildingId> = buildings.iter().map(|b| b.id).collect();
    let mut covered = HashSet::new();
    let mut plan = SyncPlan::default();
    for &(entity, id) in existing {
        if !wanted.contains(&id) || !covered.insert(id) {
            plan.despawn.push(entity);
        }
    }
    plan.spawn = buildings
        .iter()
        .map(|b| b.id)
        .filter(|id| !covered.contains(id))
        .collect();
    plan
}

/// Reconcile visual instances with the building list whenever it changes:
/// drop orphans, spawn what is missing, reapply every rotation.
#[allow(clippy::too_many_arguments)]
pub fn sync_building_instances(
    mut commands: Commands,
    city: Res<CityBuildings>,
    mut instances: Query<(Entity, &BuildingInstance, &mut Transform)>,
    asset_server: Res<AssetServer>,
    mut cache: ResMut<ModelCache>,
    placeholders: Res<PlaceholderAssets>,
    mut warned: Local<HashSet<BuildingId>>,
) {
    if !city.is_changed() {
        return;
    }

    let existing: Vec<(Entity, BuildingId)> = instances
        .iter()
        .map(|(entity, inst, _)| (entity, inst.building_id))
        .collect();
    let plan = plan_sync(&existing, city.as_slice());
    let stale: HashSet<Entity> = plan.despawn.iter().copied().collect();

    for &entity in &plan.despawn {
        commands.entity(entity).despawn_recursive();
    }

    for (entity, inst, mut transform) in &mut instances {
        if stale.contains(&entity) {
            continue;
        }
        let Some(building) = city.get(inst.building_id) else {
            continue;
        };
        let rotation = rotation_quat(building.rotation);
        if transform.rotation != rotation {
            transform.rotation = rotation;
        }
    }

    let mut spawned = 0usize;
    for id in plan.spawn {
        let Some(building) = city.get(id) else {
            continue;
        };
        let archetype = match building.archetype() {
            Ok(a) => a,
            Err(e) => {
                if warned.insert(id) {
                    warn!("Building {id} at {} not drawn: {e}", building.pos());
                }
                continue;
            }
        };

        let transform = Transform::from_translation(building.pos().to_world())
            .with_rotation(rotation_quat(building.rotation))
            .with_scale(Vec3::ZERO);
        let instance = BuildingInstance {
            building_id: id,
            archetype,
        };
        let grow = GrowIn::new(archetype.scale());

        match archetype
            .model_path()
            .and_then(|path| cache.scene(path, &asset_server))
        {
            Some(scene) => {
                commands.spawn((instance, grow, SceneRoot(scene), transform));
            }
            None => {
                commands.spawn((
                    instance,
                    grow,
                    PlaceholderModel,
                    Mesh3d(placeholders.building_mesh.clone()),
                    MeshMaterial3d(placeholders.building_material.clone()),
                    transform,
                ));
            }
        }
        spawned += 1;
    }

    debug!(
        "Building sync: {} spawned, {} removed, {} total",
        spawned,
        plan.despawn.len(),
        city.len()
    );
}

/// Swap instances whose model failed to load over to the placeholder cube.
pub fn replace_failed_building_models(
    mut commands: Commands,
    cache: Res<ModelCache>,
    placeholders: Res<PlaceholderAssets>,
    query: Query<(Entity, &BuildingInstance), (With<SceneRoot>, Without<PlaceholderModel>)>,
) {
    if !cache.is_changed() {
        return;
    }
    for (entity, inst) in &query {
        let Some(path) = inst.archetype.model_path() else {
            continue;
        };
        if !cache.is_failed(path) {
            continue;
        }
        commands.entity(entity).remove::<SceneRoot>().insert((
            PlaceholderModel,
            Mesh3d(placeholders.building_mesh.clone()),
            MeshMaterial3d(placeholders.building_material.clone()),
        ));
    }
}

pub fn animate_grow_in(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut GrowIn, &mut Transform)>,
) {
    for (entity, mut grow, mut transform) in &mut query {
        grow.timer.tick(time.delta());
        let steps = grow.timer.times_finished_this_tick();
        if steps == 0 {
            continue;
        }
        transform.scale = Vec3::splat(grow.advance(steps));
        if grow.is_done() {
            commands.entity(entity).remove::<GrowIn>();
        }
    }
}
