use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::archetypes::{BuildingArchetype, BuildingCategory};
use simulation::buildings::CityBuildings;
use simulation::placement::{
    ActiveBuild, CancelBuild, DemolishSelected, RotateSelected, SelectedBuilding,
};

use crate::status::StatusLine;

// ---------------------------------------------------------------------------
// Resource: which category popup is open
// ---------------------------------------------------------------------------

#[derive(Resource, Default)]
pub struct OpenCategory(pub Option<BuildingCategory>);

impl OpenCategory {
    /// Clicking the open category closes it; any other opens that one.
    pub fn toggle(&mut self, category: BuildingCategory) {
        self.0 = if self.0 == Some(category) {
            None
        } else {
            Some(category)
        };
    }
}

pub(crate) fn item_label(archetype: BuildingArchetype) -> String {
    format!("{} ${}", archetype.name(), archetype.cost())
}

// ---------------------------------------------------------------------------
// Main toolbar system
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut active: ResMut<ActiveBuild>,
    mut open_cat: ResMut<OpenCategory>,
    selected: Res<SelectedBuilding>,
    city: Res<CityBuildings>,
    status: Res<StatusLine>,
    mut rotate: EventWriter<RotateSelected>,
    mut demolish: EventWriter<DemolishSelected>,
    mut cancel: EventWriter<CancelBuild>,
) {
    // ---- Status toast ----
    if status.is_visible() {
        let color = if status.is_error {
            egui::Color32::from_rgb(220, 80, 80)
        } else {
            egui::Color32::from_rgb(60, 200, 80)
        };
        egui::Area::new(egui::Id::new("status_toast"))
            .fixed_pos(egui::pos2(
                contexts.ctx_mut().screen_rect().center().x - 100.0,
                12.0,
            ))
            .show(contexts.ctx_mut(), |ui| {
                egui::Frame::popup(ui.style())
                    .fill(egui::Color32::from_rgba_premultiplied(30, 30, 30, 220))
                    .show(ui, |ui| {
                        ui.colored_label(color, &status.text);
                    });
            });
    }

    // ---- Bottom toolbar: categories, then context actions ----
    let bottom_resp = egui::TopBottomPanel::bottom("bottom_toolbar")
        .exact_height(36.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 6.0;

                for category in BuildingCategory::ALL {
                    let is_open = open_cat.0 == Some(category);
                    let btn =
                        ui.selectable_label(is_open, egui::RichText::new(category.label()).strong());
                    if btn.clicked() {
                        open_cat.toggle(category);
                    }
                }

                ui.separator();

                if let Some(archetype) = active.archetype {
                    ui.label(format!(
                        "Placing {} ({}°)",
                        archetype.name(),
                        active.rotation.degrees()
                    ));
                    if ui.button("Rotate").clicked() {
                        rotate.send(RotateSelected);
                    }
                    if ui.button("Cancel").clicked() {
                        cancel.send(CancelBuild);
                    }
                } else if let Some(building) = selected.0.and_then(|id| city.get(id)) {
                    ui.label(format!(
                        "{} at {} ({}°)",
                        building
                            .archetype()
                            .map(|a| a.name())
                            .unwrap_or(building.kind.as_str()),
                        building.pos(),
                        building.rotation.degrees()
                    ));
                    if ui.button("Rotate").clicked() {
                        rotate.send(RotateSelected);
                    }
                    if ui.button("Demolish").clicked() {
                        demolish.send(DemolishSelected);
                    }
                } else {
                    ui.label(format!("{} buildings", city.len()));
                }
            });
        });

    // ---- Category popup (shown above bottom bar when a category is open) ----
    let Some(category) = open_cat.0 else {
        return;
    };
    let bottom_rect = bottom_resp.response.rect;
    let mut should_close = false;

    egui::Area::new(egui::Id::new("category_popup"))
        .fixed_pos(egui::pos2(bottom_rect.left() + 4.0, bottom_rect.top() - 8.0))
        .pivot(egui::Align2::LEFT_BOTTOM)
        .show(contexts.ctx_mut(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_min_width(200.0);
                ui.heading(category.label());
                ui.separator();

                egui::Grid::new("cat_items_grid")
                    .num_columns(3)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        for (i, archetype) in BuildingArchetype::in_category(category).enumerate() {
                            let is_active = active.archetype == Some(archetype);
                            if ui.selectable_label(is_active, item_label(archetype)).clicked() {
                                active.start(archetype);
                                should_close = true;
                            }
                            if (i + 1) % 3 == 0 {
                                ui.end_row();
                            }
                        }
                    });
            });
        });

    if should_close {
        open_cat.0 = None;
    }
}
