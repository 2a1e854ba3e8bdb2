//! Axes indicator overlay for the viewport

use glam::Vec3;

use av_renderer::Camera;

/// X axis color
const AXIS_X: egui::Color32 = egui::Color32::from_rgb(255, 75, 75);
/// Y axis color
const AXIS_Y: egui::Color32 = egui::Color32::from_rgb(75, 255, 100);
/// Z axis color
const AXIS_Z: egui::Color32 = egui::Color32::from_rgb(75, 150, 255);

/// Screen direction and depth of a world axis as seen by the camera
fn project_axis(camera: &Camera, world_axis: Vec3, axis_len: f32) -> (egui::Vec2, f32) {
    let x = world_axis.dot(camera.right());
    let y = world_axis.dot(camera.up_axis());
    let z = world_axis.dot(camera.forward());
    (egui::vec2(x * axis_len, -y * axis_len), z)
}

/// Render axes indicator in the bottom-right corner
pub fn render_axes_indicator(ui: &mut egui::Ui, rect: egui::Rect, camera: &Camera) {
    let painter = ui.painter();
    let axes_center = rect.right_bottom() - egui::vec2(50.0, 50.0);
    let axis_len = 30.0;

    let mut axes = [
        (Vec3::X, "X", AXIS_X),
        (Vec3::Y, "Y", AXIS_Y),
        (Vec3::Z, "Z", AXIS_Z),
    ]
    .map(|(axis, label, color)| {
        let (dir, depth) = project_axis(camera, axis, axis_len);
        (depth, dir, label, color)
    });
    // Axes pointing away are drawn first
    axes.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (_depth, dir, label, color) in axes {
        painter.line_segment(
            [axes_center, axes_center + dir],
            egui::Stroke::new(2.0, color),
        );

        let label_offset = dir.normalized() * 8.0;
        painter.text(
            axes_center + dir + label_offset,
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::default(),
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use av_renderer::config::CameraConfig;

    #[test]
    fn test_front_view_axes() {
        let config = CameraConfig {
            position: [0.0, 0.0, 10.0],
            target: [0.0, 0.0, 0.0],
            ..Default::default()
        };
        let camera = Camera::new(&config, 800.0, 600.0);

        let (x, _) = project_axis(&camera, Vec3::X, 30.0);
        let (y, _) = project_axis(&camera, Vec3::Y, 30.0);
        let (_, z_depth) = project_axis(&camera, Vec3::Z, 30.0);

        assert!((x - egui::vec2(30.0, 0.0)).length() < 1e-4);
        assert!((y - egui::vec2(0.0, -30.0)).length() < 1e-4);
        // +Z points at the viewer
        assert!(z_depth < 0.0);
    }
}
