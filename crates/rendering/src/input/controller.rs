use bevy::prelude::*;

use simulation::config::CLICK_THRESHOLD_PX;

use crate::camera::{CameraConfig, CameraRig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left mouse button or a single finger.
    Primary,
    /// Right mouse button.
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    /// Primary held. Becomes a tile select on release if it never travelled.
    Panning { start: Vec2, last: Vec2 },
    Rotating { last: Vec2 },
    /// Two fingers down. Ends only when every finger is lifted.
    Pinching { last_distance: f32 },
    /// Press that began over host UI; swallowed until release.
    Ignored,
}

/// What the host should do in response to a pointer transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerAction {
    /// Pick the cell under `at` and report it as selected.
    SelectTile { at: Vec2 },
    CancelBuild,
}

/// Pointer/touch state machine driving the camera rig.
///
/// Free of Bevy input types so the click/drag rules can be exercised
/// directly. The mouse and touch systems translate raw input into calls on
/// this type and forward the returned actions.
#[derive(Resource, Debug, Clone)]
pub struct CameraController {
    gesture: Gesture,
    suppressed: bool,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            gesture: Gesture::Idle,
            suppressed: false,
        }
    }
}

impl CameraController {
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Set by the host while the pointer is over its own controls. Only new
    /// gestures and wheel input are affected; a gesture already in progress
    /// runs to its release.
    pub fn set_input_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
    }

    pub fn is_input_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Whether the hover pick should follow the pointer. Frozen while
    /// suppressed and while orbiting.
    pub fn tracks_hover(&self) -> bool {
        !self.suppressed && !matches!(self.gesture, Gesture::Rotating { .. })
    }

    /// `build_active` is whether the host has a build type armed; it turns
    /// the secondary button into a cancel.
    pub fn press(
        &mut self,
        button: PointerButton,
        at: Vec2,
        build_active: bool,
    ) -> Option<ControllerAction> {
        if self.gesture != Gesture::Idle {
            return None;
        }
        if self.suppressed {
            self.gesture = Gesture::Ignored;
            return None;
        }
        match button {
            PointerButton::Primary => {
                self.gesture = Gesture::Panning {
                    start: at,
                    last: at,
                };
                None
            }
            PointerButton::Secondary if build_active => Some(ControllerAction::CancelBuild),
            PointerButton::Secondary => {
                self.gesture = Gesture::Rotating { last: at };
                None
            }
        }
    }

    pub fn move_to(&mut self, at: Vec2, rig: &mut CameraRig, config: &CameraConfig) {
        match &mut self.gesture {
            Gesture::Panning { last, .. } => {
                rig.pan(at - *last, config);
                *last = at;
            }
            Gesture::Rotating { last } => {
                rig.orbit(at - *last, config);
                *last = at;
            }
            Gesture::Idle | Gesture::Pinching { .. } | Gesture::Ignored => {}
        }
    }

    pub fn release(&mut self, button: PointerButton, at: Vec2) -> Option<ControllerAction> {
        match (self.gesture, button) {
            (Gesture::Panning { start, .. }, PointerButton::Primary) => {
                self.gesture = Gesture::Idle;
                is_click(start, at).then_some(ControllerAction::SelectTile { at })
            }
            (Gesture::Rotating { .. }, PointerButton::Secondary) => {
                self.gesture = Gesture::Idle;
                None
            }
            (Gesture::Ignored, _) | (Gesture::Pinching { .. }, _) => {
                self.gesture = Gesture::Idle;
                None
            }
            _ => None,
        }
    }

    /// Release seen with no pointer position, e.g. outside the window. Ends
    /// the gesture like `release` but never selects a tile.
    pub fn release_without_position(&mut self, button: PointerButton) {
        match (self.gesture, button) {
            (Gesture::Panning { .. }, PointerButton::Primary)
            | (Gesture::Rotating { .. }, PointerButton::Secondary)
            | (Gesture::Ignored, _) => self.gesture = Gesture::Idle,
            _ => {}
        }
    }

    /// Two-finger update. Entering pinch overrides any single-finger pan;
    /// subsequent calls zoom by the change in finger distance.
    pub fn pinch(&mut self, distance: f32, rig: &mut CameraRig, config: &CameraConfig) {
        if !distance.is_finite() {
            return;
        }
        if let Gesture::Pinching { last_distance } = &mut self.gesture {
            // Fingers apart zooms in, which shrinks the projection height.
            rig.zoom_by(-(distance - *last_distance) * config.pinch_step);
            *last_distance = distance;
            return;
        }
        match self.gesture {
            Gesture::Ignored => {}
            Gesture::Idle if self.suppressed => self.gesture = Gesture::Ignored,
            _ => {
                self.gesture = Gesture::Pinching {
                    last_distance: distance,
                }
            }
        }
    }

    /// Wheel delta in lines; positive scrolls up, which zooms in.
    pub fn wheel(&mut self, lines: f32, rig: &mut CameraRig, config: &CameraConfig) {
        if self.suppressed {
            return;
        }
        rig.zoom_by(-lines * config.wheel_step);
    }
}

/// A press/release pair counts as a click when the pointer ended closer than
/// the threshold to where it started.
pub fn is_click(start: Vec2, end: Vec2) -> bool {
    start.distance(end) < CLICK_THRESHOLD_PX
}
