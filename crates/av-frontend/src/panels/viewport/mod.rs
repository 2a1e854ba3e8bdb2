//! 3D Viewport panel
//!
//! Translates egui pointer input into session events, advances the session
//! one frame and draws it with the painter backend.

mod axes_indicator;

use glam::Vec2;

use av_renderer::{InputEvent, PointerButtons};

use crate::panels::Panel;
use crate::render::PainterRenderer;
use crate::state::{AppAction, SharedAppState};
use crate::theme::{overlay_frame, palette};

use axes_indicator::render_axes_indicator;

/// 3D viewport panel
pub struct ViewportPanel {
    last_size: egui::Vec2,
    show_help: bool,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            last_size: egui::Vec2::ZERO,
            show_help: true,
        }
    }
}

impl Default for ViewportPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Held buttons in DOM bitmask layout
fn pointer_buttons(pointer: &egui::PointerState) -> PointerButtons {
    let mut buttons = PointerButtons::NONE;
    if pointer.primary_down() {
        buttons = buttons | PointerButtons::PRIMARY;
    }
    if pointer.secondary_down() {
        buttons = buttons | PointerButtons::SECONDARY;
    }
    if pointer.middle_down() {
        buttons = buttons | PointerButtons::MIDDLE;
    }
    buttons
}

/// Wheel direction as the session expects it: positive zooms out
fn wheel_delta(scroll_y: f32) -> Option<f32> {
    (scroll_y != 0.0 && scroll_y.is_finite()).then_some(-scroll_y)
}

impl Panel for ViewportPanel {
    fn name(&self) -> &str {
        "3D Viewport"
    }

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        let available_size = ui.available_size();
        if available_size.x < 1.0 || available_size.y < 1.0 {
            return;
        }

        let (response, painter) =
            ui.allocate_painter(available_size, egui::Sense::click_and_drag());
        let rect = response.rect;
        let local = |p: egui::Pos2| Vec2::new(p.x - rect.min.x, p.y - rect.min.y);

        let (buttons, press_origin, scroll_y) = ui.input(|i| {
            (
                pointer_buttons(&i.pointer),
                i.pointer.press_origin(),
                i.raw_scroll_delta.y,
            )
        });

        let mut state = app_state.lock();
        let session = &mut state.session;

        if available_size != self.last_size {
            session.push_event(InputEvent::Resize {
                width: available_size.x,
                height: available_size.y,
            });
            self.last_size = available_size;
        }

        // Drag: rotate with the primary button, pan with the secondary
        if response.drag_started()
            && let Some(pos) = press_origin.or(response.interact_pointer_pos())
        {
            session.push_event(InputEvent::PointerDown {
                pos: local(pos),
                buttons,
            });
        }
        if response.dragged()
            && let Some(pos) = response.interact_pointer_pos()
        {
            session.push_event(InputEvent::PointerMove {
                pos: local(pos),
                buttons,
            });
        }
        if response.drag_stopped() {
            session.push_event(InputEvent::PointerUp);
        }

        if response.clicked()
            && let Some(pos) = response.interact_pointer_pos()
        {
            session.push_event(InputEvent::Click { pos: local(pos) });
        }

        if response.hovered()
            && let Some(delta_y) = wheel_delta(scroll_y)
        {
            session.push_event(InputEvent::Wheel { delta_y });
        }

        session.tick();

        let view = state.view;
        state
            .session
            .render(&mut PainterRenderer::new(&painter, rect, view));

        let camera = state.session.camera().clone();
        let orbit = *state.session.controls().state();
        drop(state);

        render_axes_indicator(ui, rect, &camera);

        if self.show_help {
            let help = "Left drag: rotate   Right drag: pan   Wheel: zoom   Click: select";
            painter.text(
                rect.left_bottom() + egui::vec2(10.0, -10.0),
                egui::Align2::LEFT_BOTTOM,
                help,
                egui::FontId::proportional(12.0),
                palette::TEXT_SECONDARY,
            );
        }

        egui::Area::new(egui::Id::new("viewport_camera_info"))
            .fixed_pos(rect.left_top() + egui::vec2(10.0, 10.0))
            .show(ui.ctx(), |ui| {
                overlay_frame().show(ui, |ui| {
                    ui.label(format!(
                        "Distance {:.1}   Azimuth {:.0}\u{00b0}   Polar {:.0}\u{00b0}",
                        orbit.distance,
                        orbit.azimuth.to_degrees(),
                        orbit.polar.to_degrees()
                    ));
                });
            });

        response.context_menu(|ui| {
            if ui.button("Reset Camera").clicked() {
                app_state.lock().queue_action(AppAction::ResetCamera);
                ui.close_menu();
            }
            if ui.button("Clear Selection").clicked() {
                app_state.lock().queue_action(AppAction::ClearSelection);
                ui.close_menu();
            }
            ui.separator();
            ui.checkbox(&mut self.show_help, "Show controls hint");
        });

        // Particles move every frame
        ui.ctx().request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_delta_direction() {
        // Scrolling down (negative in egui) moves away
        assert_eq!(wheel_delta(-50.0), Some(50.0));
        assert_eq!(wheel_delta(50.0), Some(-50.0));
        assert_eq!(wheel_delta(0.0), None);
        assert_eq!(wheel_delta(f32::NAN), None);
    }

    #[test]
    fn test_no_buttons_by_default() {
        assert_eq!(
            pointer_buttons(&egui::PointerState::default()),
            PointerButtons::NONE
        );
    }
}
