//! Theme module for UI styling

pub mod palette;

use egui::{Stroke, Visuals};

/// Dark visuals used by the whole application
pub fn visuals() -> Visuals {
    let mut v = Visuals::dark();

    // Background colors
    v.panel_fill = palette::BG_PANEL;
    v.window_fill = palette::BG_ELEVATED;
    v.extreme_bg_color = palette::BG_BASE;
    v.faint_bg_color = palette::BG_INPUT;

    // Selection
    v.selection.bg_fill = palette::ACCENT_SUBTLE;
    v.selection.stroke = Stroke::new(1.0, palette::ACCENT_PRIMARY);
    v.hyperlink_color = palette::ACCENT_PRIMARY;

    // Widget colors
    v.widgets.noninteractive.bg_fill = palette::BG_INPUT;
    v.widgets.noninteractive.bg_stroke = Stroke::new(1.0, palette::BORDER_SUBTLE);
    v.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette::TEXT_SECONDARY);

    v.widgets.inactive.bg_fill = palette::BG_INPUT;
    v.widgets.inactive.weak_bg_fill = palette::BG_PANEL;
    v.widgets.inactive.fg_stroke = Stroke::new(1.0, palette::TEXT_PRIMARY);

    v.widgets.hovered.bg_fill = palette::BG_HOVER;
    v.widgets.hovered.weak_bg_fill = palette::BG_HOVER;
    v.widgets.hovered.bg_stroke = Stroke::new(1.0, palette::BORDER_NORMAL);

    v.widgets.active.bg_fill = palette::ACCENT_PRIMARY;
    v.widgets.active.bg_stroke = Stroke::new(1.0, palette::ACCENT_PRIMARY);

    v
}

/// Apply the theme to an egui context
pub fn apply_theme(ctx: &egui::Context) {
    ctx.set_visuals(visuals());
}

/// Create an overlay frame with standard styling
pub fn overlay_frame() -> egui::Frame {
    egui::Frame::popup(&egui::Style::default())
        .fill(palette::overlay_bg(220))
        .stroke(Stroke::new(1.0, palette::BORDER_NORMAL))
}
