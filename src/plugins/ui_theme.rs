use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

/// Deep rose used for headings and letter text.
pub const COLOR_ROSE: Color = Color::srgb(0.62, 0.07, 0.22);
/// Cream page color behind the letter.
pub const COLOR_CREAM: Color = Color::srgb(1.0, 0.96, 0.97);

pub const INK: egui::Color32 = egui::Color32::from_rgb(120, 53, 15);
pub const ROSE: egui::Color32 = egui::Color32::from_rgb(225, 29, 72);
pub const PANEL_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(255, 251, 235, 235);

pub struct UiThemePlugin;

impl Plugin for UiThemePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, configure_ui_theme);
    }
}

fn configure_ui_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();

    let highlight = egui::Color32::from_rgb(244, 63, 94);

    let mut style = (*ctx.style()).clone();

    style.visuals.override_text_color = Some(INK);
    style.visuals.hyperlink_color = highlight;

    style.visuals.window_fill = PANEL_FILL;
    style.visuals.panel_fill = egui::Color32::TRANSPARENT;
    style.visuals.window_stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(251, 191, 36));
    style.visuals.window_rounding = egui::Rounding::same(18.0);

    style.visuals.widgets.inactive.bg_fill = ROSE;
    style.visuals.widgets.inactive.weak_bg_fill = ROSE;
    style.visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
    style.visuals.widgets.inactive.rounding = egui::Rounding::same(24.0);

    style.visuals.widgets.hovered.bg_fill = highlight;
    style.visuals.widgets.hovered.weak_bg_fill = highlight;
    style.visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.5, egui::Color32::WHITE);
    style.visuals.widgets.hovered.rounding = egui::Rounding::same(24.0);

    style.visuals.widgets.active.bg_fill = egui::Color32::from_rgb(190, 18, 60);
    style.visuals.widgets.active.weak_bg_fill = egui::Color32::from_rgb(190, 18, 60);
    style.visuals.widgets.active.fg_stroke = egui::Stroke::new(2.0, egui::Color32::WHITE);
    style.visuals.widgets.active.rounding = egui::Rounding::same(24.0);

    ctx.set_style(style);
}

/// Rounded translucent card used by toasts and the CD player.
pub fn card_frame() -> egui::Frame {
    egui::Frame::none()
        .fill(PANEL_FILL)
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(253, 164, 175)))
        .rounding(egui::Rounding::same(14.0))
        .inner_margin(egui::Margin::symmetric(16.0, 10.0))
        .shadow(egui::epaint::Shadow {
            offset: egui::vec2(0.0, 4.0),
            blur: 16.0,
            spread: 0.0,
            color: egui::Color32::from_black_alpha(40),
        })
}
