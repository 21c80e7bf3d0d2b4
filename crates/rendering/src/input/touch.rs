use bevy::prelude::*;

use simulation::placement::{ActiveBuild, TileSelected};

use super::controller::{CameraController, ControllerAction, PointerButton};
use super::picking::{pick_from_viewport, PickedCell};
use crate::camera::{CameraConfig, CameraRig, CityCamera};

/// One finger pans and taps; a second finger switches to pinch zoom until
/// every finger is lifted.
#[allow(clippy::too_many_arguments)]
pub fn touch_camera_input(
    touches: Res<Touches>,
    camera_q: Query<(&Camera, &GlobalTransform), With<CityCamera>>,
    active: Res<ActiveBuild>,
    config: Res<CameraConfig>,
    mut controller: ResMut<CameraController>,
    mut rig: ResMut<CameraRig>,
    mut picked: ResMut<PickedCell>,
    mut tile_events: EventWriter<TileSelected>,
) {
    let held: Vec<Vec2> = touches.iter().map(|t| t.position()).collect();

    if let [a, b, ..] = held.as_slice() {
        controller.pinch(a.distance(*b), &mut rig, &config);
        return;
    }

    if let Some(first) = touches.iter_just_pressed().next() {
        // Touch has no secondary button; the build-active flag is irrelevant.
        controller.press(PointerButton::Primary, first.position(), active.is_active());
    }
    if let Some(pos) = held.first() {
        controller.move_to(*pos, &mut rig, &config);
        return;
    }

    let Some(lifted) = touches.iter_just_released().next() else {
        return;
    };
    if let Some(ControllerAction::SelectTile { at }) =
        controller.release(PointerButton::Primary, lifted.position())
    {
        if let Ok((camera, cam_transform)) = camera_q.get_single() {
            picked.apply(pick_from_viewport(camera, cam_transform, at));
        }
        if let Some(pos) = picked.cell {
            tile_events.send(TileSelected { pos });
        }
    }
}
