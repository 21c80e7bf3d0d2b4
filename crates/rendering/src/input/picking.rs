use bevy::prelude::*;

use simulation::config::RAY_PARALLEL_EPSILON;
use simulation::grid::{world_to_grid, GridPos};

/// Cell under the pointer, `None` while the pointer is off the map.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PickedCell {
    pub cell: Option<GridPos>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// Ray is near-parallel to the ground or points away from it.
    Unchanged,
    OffMap,
    Cell(GridPos),
}

impl PickedCell {
    pub fn apply(&mut self, outcome: PickOutcome) {
        match outcome {
            PickOutcome::Unchanged => {}
            PickOutcome::OffMap => self.cell = None,
            PickOutcome::Cell(pos) => self.cell = Some(pos),
        }
    }
}

/// Intersection of a ray with the ground plane `y = 0`.
pub fn ground_hit(origin: Vec3, direction: Vec3) -> Option<Vec3> {
    if !origin.is_finite() || !direction.is_finite() {
        return None;
    }
    if direction.y.abs() < RAY_PARALLEL_EPSILON {
        return None;
    }
    let t = -origin.y / direction.y;
    if t <= 0.0 {
        return None;
    }
    Some(origin + direction * t)
}

pub fn pick_cell(origin: Vec3, direction: Vec3) -> PickOutcome {
    let Some(hit) = ground_hit(origin, direction) else {
        return PickOutcome::Unchanged;
    };
    match world_to_grid(hit.x, hit.z) {
        Some(pos) => PickOutcome::Cell(pos),
        None => PickOutcome::OffMap,
    }
}

/// Unproject a viewport position through `camera` and pick against the ground.
pub fn pick_from_viewport(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    viewport_pos: Vec2,
) -> PickOutcome {
    match camera.viewport_to_world(camera_transform, viewport_pos) {
        Ok(ray) => pick_cell(ray.origin, *ray.direction),
        Err(_) => PickOutcome::Unchanged,
    }
}
