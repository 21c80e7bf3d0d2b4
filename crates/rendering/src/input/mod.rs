//! Pointer, touch and keyboard input for the city view.
//!
//! Split into sub-modules by concern:
//! - `controller`: click/drag/rotate/pinch state machine over `CameraRig`
//! - `picking`: ray vs. ground plane, snapped to a grid cell
//! - `mouse`: mouse buttons, wheel and hover picking
//! - `touch`: single-finger pan/tap and two-finger pinch
//! - `keyboard`: rotate, demolish and cancel shortcuts

mod controller;
mod keyboard;
mod mouse;
mod picking;
mod touch;

#[cfg(test)]
mod tests;

pub use controller::{is_click, CameraController, ControllerAction, Gesture, PointerButton};
pub use picking::{ground_hit, pick_cell, pick_from_viewport, PickOutcome, PickedCell};

pub use keyboard::keyboard_shortcuts;
pub use mouse::{mouse_camera_input, update_picked_cell};
pub use touch::touch_camera_input;
