use bevy_egui::{egui, EguiContexts};

/// Muted park-green palette with rounded widgets for the build palette.
pub fn apply_city_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    let panel = egui::Color32::from_rgb(32, 40, 36);
    let inactive = egui::Color32::from_rgb(48, 62, 54);
    let hover = egui::Color32::from_rgb(66, 92, 76);
    let active = egui::Color32::from_rgb(96, 176, 120);

    for (visuals, fill) in [
        (&mut style.visuals.widgets.inactive, inactive),
        (&mut style.visuals.widgets.hovered, hover),
        (&mut style.visuals.widgets.active, active),
    ] {
        visuals.bg_fill = fill;
        visuals.weak_bg_fill = fill;
        visuals.corner_radius = egui::CornerRadius::same(6);
    }
    style.visuals.widgets.noninteractive.bg_fill = panel;

    style.visuals.window_fill = panel;
    style.visuals.panel_fill = panel;
    style.visuals.window_corner_radius = egui::CornerRadius::same(8);

    style.visuals.selection.bg_fill = active;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, active);

    ctx.set_style(style);
}
