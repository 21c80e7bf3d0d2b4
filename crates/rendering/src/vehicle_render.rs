use bevy::prelude::*;

use simulation::archetypes::VehicleArchetype;
use simulation::traffic::{TrafficSimulator, VehicleAgent, OFF_SCENE};

use crate::model_cache::{ModelCache, PlaceholderAssets};

const VEHICLE_SCALE: f32 = 0.5;

/// Visual for one pool slot. Spawned once per slot and reused across trips.
#[derive(Component, Debug)]
pub struct VehicleSlot {
    pub slot: usize,
    /// Trip whose model is currently attached; `None` until the first trip.
    pub shown_trip: Option<u64>,
    pub shown_archetype: Option<VehicleArchetype>,
}

/// Which visual a slot needs this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotVisual {
    Parked,
    /// New trip: swap the model, then place it.
    Restyle(VehicleArchetype),
    Moving,
}

pub fn slot_visual(agent: &VehicleAgent, shown_trip: Option<u64>) -> SlotVisual {
    if !agent.active {
        SlotVisual::Parked
    } else if shown_trip != Some(agent.trip) {
        SlotVisual::Restyle(agent.archetype)
    } else {
        SlotVisual::Moving
    }
}

/// Keep one entity per pool slot and mirror each agent's position, heading
/// and model.
pub fn sync_vehicle_visuals(
    mut commands: Commands,
    traffic: Res<TrafficSimulator>,
    mut slots: Query<(Entity, &mut VehicleSlot, &mut Transform, &mut Visibility)>,
    asset_server: Res<AssetServer>,
    mut cache: ResMut<ModelCache>,
    placeholders: Res<PlaceholderAssets>,
) {
    let agents = traffic.pool().agents();

    if slots.iter().count() < agents.len() {
        let have: Vec<usize> = slots.iter().map(|(_, s, _, _)| s.slot).collect();
        for agent in agents.iter().filter(|a| !have.contains(&a.slot)) {
            commands.spawn((
                VehicleSlot {
                    slot: agent.slot,
                    shown_trip: None,
                    shown_archetype: None,
                },
                Transform::from_translation(OFF_SCENE).with_scale(Vec3::splat(VEHICLE_SCALE)),
                Visibility::Hidden,
            ));
        }
    }

    if !traffic.is_changed() {
        return;
    }

    for (entity, mut slot, mut transform, mut vis) in &mut slots {
        let Some(agent) = agents.get(slot.slot) else {
            continue;
        };
        match slot_visual(agent, slot.shown_trip) {
            SlotVisual::Parked => {
                if *vis != Visibility::Hidden {
                    *vis = Visibility::Hidden;
                    transform.translation = OFF_SCENE;
                }
                continue;
            }
            SlotVisual::Restyle(archetype) => {
                let mut entity_cmds = commands.entity(entity);
                entity_cmds.remove::<(SceneRoot, Mesh3d, MeshMaterial3d<StandardMaterial>)>();
                let material = placeholders.vehicle_materials.get(&archetype);
                match (cache.scene(archetype.model_path(), &asset_server), material) {
                    (Some(scene), _) => {
                        entity_cmds.insert(SceneRoot(scene));
                    }
                    (None, Some(material)) => {
                        entity_cmds.insert((
                            Mesh3d(placeholders.vehicle_mesh.clone()),
                            MeshMaterial3d(material.clone()),
                        ));
                    }
                    (None, None) => {}
                }
                slot.shown_trip = Some(agent.trip);
                slot.shown_archetype = Some(archetype);
            }
            SlotVisual::Moving => {}
        }
        transform.translation = agent.position;
        transform.rotation = Quat::from_rotation_y(agent.heading);
        *vis = Visibility::Visible;
    }
}

/// Slots still showing a model that has since failed get their placeholder.
pub fn replace_failed_vehicle_models(
    mut commands: Commands,
    cache: Res<ModelCache>,
    placeholders: Res<PlaceholderAssets>,
    query: Query<(Entity, &VehicleSlot), With<SceneRoot>>,
) {
    if !cache.is_changed() {
        return;
    }
    for (entity, slot) in &query {
        let Some(archetype) = slot.shown_archetype else {
            continue;
        };
        if !cache.is_failed(archetype.model_path()) {
            continue;
        }
        let Some(material) = placeholders.vehicle_materials.get(&archetype) else {
            continue;
        };
        commands.entity(entity).remove::<SceneRoot>().insert((
            Mesh3d(placeholders.vehicle_mesh.clone()),
            MeshMaterial3d(material.clone()),
        ));
    }
}
