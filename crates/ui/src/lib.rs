use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use simulation::SimulationUpdateSet;

pub mod input_guard;
pub mod status;
pub mod theme;
pub mod toolbar;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<toolbar::OpenCategory>()
            .init_resource::<status::StatusLine>()
            .add_systems(Startup, theme::apply_city_theme)
            .add_systems(
                Update,
                input_guard::update_input_suppression
                    .in_set(SimulationUpdateSet::Input)
                    .before(rendering::input::update_picked_cell),
            )
            .add_systems(
                Update,
                (status::update_status_line, toolbar::toolbar_ui)
                    .chain()
                    .in_set(SimulationUpdateSet::Visual),
            );
    }
}
