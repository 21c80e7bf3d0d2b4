//! Egui input guard: prevents click-through from UI elements to the world.
//!
//! While egui (palette, panels) is handling the pointer, the camera
//! controller is told to suppress new gestures, so a click on a palette
//! button never places a building underneath it.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use rendering::input::CameraController;

/// Returns `true` when egui wants the pointer, i.e. the cursor is over an
/// egui panel or egui is actively handling a drag/click.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}

pub fn update_input_suppression(
    mut contexts: EguiContexts,
    mut controller: ResMut<CameraController>,
) {
    let over_ui = egui_wants_pointer(&mut contexts);
    if controller.is_input_suppressed() != over_ui {
        controller.set_input_suppressed(over_ui);
    }
}
