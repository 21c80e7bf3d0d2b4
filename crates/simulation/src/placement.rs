//! Placement commit, selection and preview validity.
//!
//! The camera controller only reports *which* cell was clicked; this module
//! decides what the click means. With an active build type the click commits a
//! placement, otherwise it selects whatever building sits on the cell.

use bevy::prelude::*;

use crate::archetypes::BuildingArchetype;
use crate::buildings::{BuildingId, CityBuildings, PlacementError};
use crate::grid::{GridPos, Rotation};
use crate::simulation_sets::SimulationUpdateSet;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Build type chosen in the palette but not yet committed.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ActiveBuild {
    pub archetype: Option<BuildingArchetype>,
    /// Orientation the next placement will get.
    pub rotation: Rotation,
}

impl ActiveBuild {
    pub fn start(&mut self, archetype: BuildingArchetype) {
        self.archetype = Some(archetype);
        self.rotation = Rotation::Deg0;
    }

    pub fn clear(&mut self) {
        self.archetype = None;
        self.rotation = Rotation::Deg0;
    }

    pub fn is_active(&self) -> bool {
        self.archetype.is_some()
    }
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SelectedBuilding(pub Option<BuildingId>);

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A disambiguated click or tap on a grid cell.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSelected {
    pub pos: GridPos,
}

/// Secondary press or `Escape` while a build type is active.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct CancelBuild;

#[derive(Event, Debug, Clone, Copy)]
pub struct RotateSelected;

#[derive(Event, Debug, Clone, Copy)]
pub struct DemolishSelected;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingPlaced {
    pub id: BuildingId,
    pub archetype: BuildingArchetype,
    pub pos: GridPos,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRejected {
    pub pos: GridPos,
    pub reason: PlacementError,
}

// ---------------------------------------------------------------------------
// Preview validity
// ---------------------------------------------------------------------------

/// `true` only when a build type is active, a cell is picked, the cell is on
/// the map, and nothing occupies it.
pub fn validate_placement(
    city: &CityBuildings,
    active: Option<BuildingArchetype>,
    cell: Option<GridPos>,
) -> bool {
    match (active, cell) {
        (Some(_), Some(pos)) => pos.in_bounds() && !city.is_occupied(pos),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

pub fn handle_tile_selected(
    mut events: EventReader<TileSelected>,
    mut city: ResMut<CityBuildings>,
    mut active: ResMut<ActiveBuild>,
    mut selected: ResMut<SelectedBuilding>,
    mut placed: EventWriter<BuildingPlaced>,
    mut rejected: EventWriter<PlacementRejected>,
) {
    for &TileSelected { pos } in events.read() {
        let Some(archetype) = active.archetype else {
            let hit = city.find_at(pos).map(|b| b.id);
            if selected.0 != hit {
                selected.0 = hit;
            }
            continue;
        };
        // Check before taking `&mut` so a refused click leaves change detection untouched.
        let result = city
            .check_placement(pos)
            .and_then(|()| city.try_place(archetype, pos, active.rotation));
        match result {
            Ok(id) => {
                info!("Placed {} at {} (id {})", archetype.key(), pos, id);
                placed.send(BuildingPlaced { id, archetype, pos });
                active.clear();
                selected.0 = None;
            }
            Err(reason) => {
                info!("Rejected {} at {}: {}", archetype.key(), pos, reason);
                rejected.send(PlacementRejected { pos, reason });
            }
        }
    }
}

pub fn handle_cancel_build(mut events: EventReader<CancelBuild>, mut active: ResMut<ActiveBuild>) {
    if events.read().count() > 0 && active.is_active() {
        active.clear();
    }
}

/// Rotates the pending placement when a build type is active, otherwise the
/// selected building.
pub fn handle_rotate_selected(
    mut events: EventReader<RotateSelected>,
    mut active: ResMut<ActiveBuild>,
    selected: Res<SelectedBuilding>,
    mut city: ResMut<CityBuildings>,
) {
    for _ in events.read() {
        if active.is_active() {
            active.rotation = active.rotation.next();
            continue;
        }
        let Some(id) = selected.0 else {
            continue;
        };
        if let Err(e) = city.rotate(id) {
            warn!("Rotate failed: {e}");
        }
    }
}

pub fn handle_demolish_selected(
    mut events: EventReader<DemolishSelected>,
    mut selected: ResMut<SelectedBuilding>,
    mut city: ResMut<CityBuildings>,
) {
    for _ in events.read() {
        let Some(id) = selected.0.take() else {
            continue;
        };
        match city.remove(id) {
            Ok(b) => info!("Demolished {} at {}", b.kind, b.pos()),
            Err(e) => warn!("Demolish failed: {e}"),
        }
    }
}

/// Drops the selection when its building disappeared (demolished or replaced
/// by a store refresh).
pub fn clear_stale_selection(city: Res<CityBuildings>, mut selected: ResMut<SelectedBuilding>) {
    if !city.is_changed() {
        return;
    }
    if let Some(id) = selected.0 {
        if city.get(id).is_none() {
            selected.0 = None;
        }
    }
}

pub struct PlacementPlugin;

impl Plugin for PlacementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveBuild>()
            .init_resource::<SelectedBuilding>()
            .add_event::<TileSelected>()
            .add_event::<CancelBuild>()
            .add_event::<RotateSelected>()
            .add_event::<DemolishSelected>()
            .add_event::<BuildingPlaced>()
            .add_event::<PlacementRejected>()
            .add_systems(
                Update,
                (
                    handle_cancel_build,
                    handle_tile_selected,
                    handle_rotate_selected,
                    handle_demolish_selected,
                    clear_stale_selection,
                )
                    .chain()
                    .in_set(SimulationUpdateSet::Commit),
            );
    }
}
