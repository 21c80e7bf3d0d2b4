use bevy::prelude::*;

use simulation::placement::{ActiveBuild, CancelBuild, DemolishSelected, RotateSelected};

// ---------------------------------------------------------------------------
// Keyboard shortcuts
// ---------------------------------------------------------------------------

/// `R` rotates (pending placement or selection), `Delete`/`Backspace`
/// demolishes the selection, `Escape` drops the armed build type.
pub fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    active: Res<ActiveBuild>,
    mut rotate: EventWriter<RotateSelected>,
    mut demolish: EventWriter<DemolishSelected>,
    mut cancel: EventWriter<CancelBuild>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        rotate.send(RotateSelected);
    }
    if keys.any_just_pressed([KeyCode::Delete, KeyCode::Backspace]) {
        demolish.send(DemolishSelected);
    }
    if keys.just_pressed(KeyCode::Escape) && active.is_active() {
        cancel.send(CancelBuild);
    }
}
