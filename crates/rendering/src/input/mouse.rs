use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use simulation::placement::{ActiveBuild, CancelBuild, TileSelected};

use super::controller::{CameraController, ControllerAction, PointerButton};
use super::picking::{pick_from_viewport, PickedCell};
use crate::camera::{CameraConfig, CameraRig, CityCamera};

/// Pixels per wheel line for touchpads reporting in pixels.
const PIXELS_PER_LINE: f32 = 100.0;

const BUTTONS: [(MouseButton, PointerButton); 2] = [
    (MouseButton::Left, PointerButton::Primary),
    (MouseButton::Right, PointerButton::Secondary),
];

/// Hover picking: keep `PickedCell` under the cursor every frame.
pub fn update_picked_cell(
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<CityCamera>>,
    controller: Res<CameraController>,
    mut picked: ResMut<PickedCell>,
) {
    if !controller.tracks_hover() {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, cam_transform)) = camera_q.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let outcome = pick_from_viewport(camera, cam_transform, cursor);
    let mut next = *picked;
    next.apply(outcome);
    if next != *picked {
        *picked = next;
    }
}

/// Mouse buttons and wheel drive the controller; its actions become
/// `TileSelected` / `CancelBuild` events.
#[allow(clippy::too_many_arguments)]
pub fn mouse_camera_input(
    buttons: Res<ButtonInput<MouseButton>>,
    mut wheel: EventReader<MouseWheel>,
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<CityCamera>>,
    active: Res<ActiveBuild>,
    config: Res<CameraConfig>,
    mut controller: ResMut<CameraController>,
    mut rig: ResMut<CameraRig>,
    mut picked: ResMut<PickedCell>,
    mut tile_events: EventWriter<TileSelected>,
    mut cancel_events: EventWriter<CancelBuild>,
) {
    for evt in wheel.read() {
        let lines = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / PIXELS_PER_LINE,
        };
        controller.wheel(lines, &mut rig, &config);
    }

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(pos) = window.cursor_position() else {
        for (mouse, button) in BUTTONS {
            if buttons.just_released(mouse) {
                controller.release_without_position(button);
            }
        }
        return;
    };

    let mut actions = Vec::new();
    for (mouse, button) in BUTTONS {
        if buttons.just_pressed(mouse) {
            actions.extend(controller.press(button, pos, active.is_active()));
        }
    }
    controller.move_to(pos, &mut rig, &config);
    for (mouse, button) in BUTTONS {
        if buttons.just_released(mouse) {
            actions.extend(controller.release(button, pos));
        }
    }

    for action in actions {
        match action {
            ControllerAction::CancelBuild => {
                cancel_events.send(CancelBuild);
            }
            ControllerAction::SelectTile { at } => {
                // Pick at the release point; the hover pick may be a frame old.
                if let Ok((camera, cam_transform)) = camera_q.get_single() {
                    picked.apply(pick_from_viewport(camera, cam_transform, at));
                }
                if let Some(pos) = picked.cell {
                    tile_events.send(TileSelected { pos });
                }
            }
        }
    }
}
