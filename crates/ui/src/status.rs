use bevy::prelude::*;

use simulation::buildings::PlacementError;
use simulation::placement::{BuildingPlaced, PlacementRejected};

const STATUS_SECS: f32 = 3.0;

/// Last placement outcome, shown in the palette footer until it expires.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
    pub remaining_secs: f32,
}

impl StatusLine {
    pub fn set(&mut self, text: impl Into<String>, is_error: bool) {
        self.text = text.into();
        self.is_error = is_error;
        self.remaining_secs = STATUS_SECS;
    }

    pub fn is_visible(&self) -> bool {
        self.remaining_secs > 0.0 && !self.text.is_empty()
    }
}

pub fn rejection_message(reason: &PlacementError) -> String {
    match reason {
        PlacementError::Occupied(_) => "That tile is already taken".to_string(),
        PlacementError::OutOfBounds(_) => "That tile is outside the city".to_string(),
        PlacementError::UnknownBuilding(_) => "That building no longer exists".to_string(),
    }
}

pub fn update_status_line(
    time: Res<Time>,
    mut placed: EventReader<BuildingPlaced>,
    mut rejected: EventReader<PlacementRejected>,
    mut status: ResMut<StatusLine>,
) {
    for evt in placed.read() {
        status.set(format!("Built {} at {}", evt.archetype.name(), evt.pos), false);
    }
    for evt in rejected.read() {
        status.set(rejection_message(&evt.reason), true);
    }
    if status.remaining_secs > 0.0 {
        status.remaining_secs = (status.remaining_secs - time.delta_secs()).max(0.0);
    }
}
