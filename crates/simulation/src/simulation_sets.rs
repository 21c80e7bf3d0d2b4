//! Per-frame ordering via `SystemSet` phases.
//!
//! ```text
//! Input  →  Commit  →  Simulate  →  Visual
//! ```
//!
//! * **Input** – Pointer, touch and keyboard handling. Emits `TileSelected`,
//!   `CancelBuild`, `RotateSelected` and `DemolishSelected`.
//! * **Commit** – Applies those events to the authoritative building list and
//!   the active-build / selection state.
//! * **Simulate** – Road graph rebuild on list change, then the traffic tick.
//! * **Visual** – Building sync, ghost preview, vehicle transforms. Reads
//!   simulation state and never mutates it.
//!
//! Events written in `Input` are consumed in `Commit` of the same frame, so a
//! click is reflected in the list, the graph and the visuals without a frame
//! of latency.

use bevy::prelude::*;

/// Ordered phases for systems running in the `Update` schedule.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationUpdateSet {
    Input,
    Commit,
    Simulate,
    Visual,
}

pub(crate) fn configure_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            SimulationUpdateSet::Input,
            SimulationUpdateSet::Commit,
            SimulationUpdateSet::Simulate,
            SimulationUpdateSet::Visual,
        )
            .chain(),
    );
}
