//! Orbit camera controls
//!
//! The camera sits on a sphere around a target point. Azimuth spins around
//! the world +Y axis, polar is the angle from +Y, distance is the radius.
//! Primary-button drags rotate, secondary-button drags pan the target, the
//! wheel scales the distance.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::config::CameraConfig;
use crate::input::PointerButtons;

/// Spherical camera parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Orbit center
    pub target: Vec3,
    /// Rotation around +Y in radians
    pub azimuth: f32,
    /// Angle from +Y in radians
    pub polar: f32,
    /// Distance from the target
    pub distance: f32,
    /// Lower bound for `distance`
    pub min_distance: f32,
    /// Upper bound for `distance`
    pub max_distance: f32,
}

impl OrbitState {
    /// Derive spherical parameters from an eye position and target
    pub fn from_pose(position: Vec3, target: Vec3, min_distance: f32, max_distance: f32) -> Self {
        let offset = position - target;
        let distance = offset.length();
        let (azimuth, polar) = if distance > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / distance).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };

        Self {
            target,
            azimuth,
            polar,
            distance,
            min_distance,
            max_distance,
        }
    }

    /// Eye position relative to the target
    pub fn offset(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        Vec3::new(
            self.distance * sin_polar * self.azimuth.sin(),
            self.distance * self.polar.cos(),
            self.distance * sin_polar * self.azimuth.cos(),
        )
    }

    /// Eye position in world space
    pub fn position(&self) -> Vec3 {
        self.target + self.offset()
    }
}

/// Drag bookkeeping, reset on pointer-up
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerDragState {
    /// Whether a drag is in progress
    pub active: bool,
    /// Pointer position at the previous drag event
    pub last_pointer_pos: Vec2,
}

/// Converts pointer and wheel input into an orbiting camera pose
#[derive(Debug, Clone)]
pub struct OrbitController {
    state: OrbitState,
    drag: PointerDragState,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_out_factor: f32,
    zoom_in_factor: f32,
    polar_epsilon: f32,
}

impl OrbitController {
    /// Create a controller from the camera's current pose and apply the
    /// clamped result back to the camera.
    ///
    /// Non-finite settings fall back to their defaults.
    pub fn new(config: &CameraConfig, camera: &mut Camera) -> Self {
        let defaults = CameraConfig::default();
        let finite = |value: f32, default: f32| if value.is_finite() { value } else { default };

        let min_distance = finite(config.min_distance, defaults.min_distance).max(f32::EPSILON);
        let max_distance = finite(config.max_distance, defaults.max_distance).max(min_distance);
        let state =
            OrbitState::from_pose(camera.position, camera.target, min_distance, max_distance);

        let mut controller = Self {
            state,
            drag: PointerDragState::default(),
            rotate_speed: finite(config.rotate_speed, defaults.rotate_speed),
            pan_speed: finite(config.pan_speed, defaults.pan_speed),
            zoom_out_factor: finite(config.zoom_out_factor, defaults.zoom_out_factor),
            zoom_in_factor: finite(config.zoom_in_factor, defaults.zoom_in_factor),
            polar_epsilon: finite(config.polar_epsilon, defaults.polar_epsilon)
                .clamp(0.0, PI / 2.0 - 0.001),
        };
        controller.clamp();
        controller.apply(camera);
        controller
    }

    /// Current orbit parameters
    pub fn state(&self) -> &OrbitState {
        &self.state
    }

    /// Current drag bookkeeping
    pub fn drag_state(&self) -> &PointerDragState {
        &self.drag
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag.active
    }

    /// Allowed polar range
    pub fn polar_limits(&self) -> (f32, f32) {
        (self.polar_epsilon, PI - self.polar_epsilon)
    }

    /// Begin a drag at `pos`
    pub fn drag_start(&mut self, pos: Vec2) {
        if !pos.is_finite() {
            return;
        }
        self.drag = PointerDragState {
            active: true,
            last_pointer_pos: pos,
        };
    }

    /// Continue a drag: primary button rotates, secondary pans
    pub fn drag_move(&mut self, pos: Vec2, buttons: PointerButtons, camera: &mut Camera) {
        if !self.drag.active || !pos.is_finite() {
            return;
        }

        let delta = pos - self.drag.last_pointer_pos;
        if buttons.contains(PointerButtons::PRIMARY) {
            self.rotate(
                -delta.x * self.rotate_speed,
                delta.y * self.rotate_speed,
                camera,
            );
        } else if buttons.contains(PointerButtons::SECONDARY) {
            self.pan(delta, camera);
        }

        self.drag.last_pointer_pos = pos;
    }

    /// End the current drag
    pub fn drag_end(&mut self) {
        self.drag.active = false;
    }

    /// Zoom: positive `delta_y` moves away from the target, negative closer.
    /// A zero or non-finite delta leaves the distance unchanged.
    pub fn wheel(&mut self, delta_y: f32, camera: &mut Camera) {
        if !delta_y.is_finite() || delta_y == 0.0 {
            return;
        }
        let factor = if delta_y > 0.0 {
            self.zoom_out_factor
        } else {
            self.zoom_in_factor
        };
        self.state.distance *= factor;
        self.clamp();
        self.apply(camera);
    }

    /// Per-frame update hook; the controller has no easing so this does nothing
    pub fn tick(&mut self) {}

    /// Rotate by angle deltas in radians
    pub fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32, camera: &mut Camera) {
        if !delta_azimuth.is_finite() || !delta_polar.is_finite() {
            return;
        }
        self.state.azimuth += delta_azimuth;
        self.state.polar += delta_polar;
        self.clamp();
        self.apply(camera);
    }

    /// Move the target by a pixel delta along the camera's right and up axes.
    ///
    /// World units per pixel grow with distance so the scene follows the
    /// cursor at any zoom level.
    pub fn pan(&mut self, delta: Vec2, camera: &mut Camera) {
        let forward = -self.state.offset().normalize_or(Vec3::Z);
        let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);
        let up = right.cross(forward).normalize_or(Vec3::Y);

        let half_height = self.state.distance * (camera.fov / 2.0).tan();
        let units_per_pixel = 2.0 * half_height / camera.viewport().y * self.pan_speed;

        self.state.target +=
            right * (-delta.x * units_per_pixel) + up * (delta.y * units_per_pixel);
        self.apply(camera);
    }

    /// Restore the configured initial pose
    pub fn reset(&mut self, config: &CameraConfig, camera: &mut Camera) {
        camera.position = Vec3::from(config.position);
        camera.target = Vec3::from(config.target);
        *self = Self::new(config, camera);
    }

    fn clamp(&mut self) {
        let (min_polar, max_polar) = self.polar_limits();
        self.state.polar = self.state.polar.clamp(min_polar, max_polar);
        self.state.distance = self
            .state
            .distance
            .clamp(self.state.min_distance, self.state.max_distance);
    }

    /// Write the pose derived from the orbit state into the camera
    fn apply(&self, camera: &mut Camera) {
        camera.target = self.state.target;
        camera.position = self.state.position();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn setup() -> (OrbitController, Camera) {
        let config = CameraConfig::default();
        let mut camera = Camera::new(&config, 800.0, 600.0);
        let controller = OrbitController::new(&config, &mut camera);
        (controller, camera)
    }

    fn assert_on_sphere(controller: &OrbitController, camera: &Camera) {
        let state = controller.state();
        assert_relative_eq!(
            (camera.position - state.target).length(),
            state.distance,
            epsilon = 1e-4
        );
        assert_eq!(camera.target, state.target);
    }

    #[test]
    fn test_initial_pose_matches_config() {
        let (controller, camera) = setup();
        assert_relative_eq!(camera.position.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(camera.position.y, 5.0, epsilon = 1e-4);
        assert_relative_eq!(camera.position.z, 15.0, epsilon = 1e-4);
        assert_relative_eq!(controller.state().distance, 229.0_f32.sqrt(), epsilon = 1e-4);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_primary_drag_rotates_azimuth() {
        let (mut controller, mut camera) = setup();
        let before = controller.state().azimuth;

        controller.drag_start(Vec2::new(100.0, 100.0));
        controller.drag_move(Vec2::new(200.0, 100.0), PointerButtons::PRIMARY, &mut camera);

        assert_relative_eq!(controller.state().azimuth, before - 1.0, epsilon = 1e-5);
        assert_eq!(controller.drag_state().last_pointer_pos, Vec2::new(200.0, 100.0));
        assert_on_sphere(&controller, &camera);
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let (mut controller, mut camera) = setup();
        let before = *controller.state();
        controller.drag_move(Vec2::new(500.0, 500.0), PointerButtons::PRIMARY, &mut camera);
        assert_eq!(*controller.state(), before);

        controller.drag_start(Vec2::ZERO);
        controller.drag_end();
        controller.drag_move(Vec2::new(500.0, 500.0), PointerButtons::PRIMARY, &mut camera);
        assert_eq!(*controller.state(), before);
    }

    #[test]
    fn test_polar_stays_clamped() {
        let (mut controller, mut camera) = setup();
        let (min_polar, max_polar) = controller.polar_limits();
        controller.drag_start(Vec2::ZERO);

        let deltas = [5000.0, -12000.0, 37.0, 900.0, -3.0, 25000.0, -25000.0];
        let mut y = 0.0;
        for dy in deltas {
            y += dy;
            controller.drag_move(Vec2::new(0.0, y), PointerButtons::PRIMARY, &mut camera);
            let polar = controller.state().polar;
            assert!(polar >= min_polar && polar <= max_polar, "polar {polar} escaped");
            assert_on_sphere(&controller, &camera);
        }
    }

    #[test]
    fn test_wheel_zoom_out_scenario() {
        let (mut controller, mut camera) = setup();
        controller.state.distance = 20.0;
        controller.wheel(1.0, &mut camera);
        assert_relative_eq!(controller.state().distance, 22.0, epsilon = 1e-4);
        assert_on_sphere(&controller, &camera);
    }

    #[test]
    fn test_wheel_stays_in_bounds() {
        let (mut controller, mut camera) = setup();
        for _ in 0..100 {
            controller.wheel(120.0, &mut camera);
            let d = controller.state().distance;
            assert!((5.0..=50.0).contains(&d));
        }
        assert_relative_eq!(controller.state().distance, 50.0);

        for _ in 0..100 {
            controller.wheel(-120.0, &mut camera);
            let d = controller.state().distance;
            assert!((5.0..=50.0).contains(&d));
        }
        assert_relative_eq!(controller.state().distance, 5.0);
        assert_on_sphere(&controller, &camera);
    }

    #[test]
    fn test_wheel_ignores_zero_and_nan() {
        let (mut controller, mut camera) = setup();
        let before = *controller.state();
        controller.wheel(0.0, &mut camera);
        controller.wheel(f32::NAN, &mut camera);
        assert_eq!(*controller.state(), before);
    }

    #[test]
    fn test_secondary_drag_pans_target() {
        let (mut controller, mut camera) = setup();
        let before = controller.state().target;
        let distance = controller.state().distance;

        controller.drag_start(Vec2::new(400.0, 300.0));
        controller.drag_move(Vec2::new(300.0, 300.0), PointerButtons::SECONDARY, &mut camera);

        // Dragging left moves the target right by the on-screen amount
        let expected = 100.0 * 2.0 * distance * (camera.fov / 2.0).tan() / 600.0;
        let moved = controller.state().target - before;
        assert_relative_eq!(moved.length(), expected, epsilon = 1e-4);
        assert!(moved.dot(camera.right()) > 0.0);
        assert_relative_eq!(controller.state().distance, distance);
        assert_on_sphere(&controller, &camera);
    }

    #[test]
    fn test_pan_scales_with_distance() {
        let (mut near, mut near_camera) = setup();
        let (mut far, mut far_camera) = setup();
        near.state.distance = 10.0;
        far.state.distance = 40.0;

        near.pan(Vec2::new(10.0, 0.0), &mut near_camera);
        far.pan(Vec2::new(10.0, 0.0), &mut far_camera);

        let near_moved = (near.state().target - Vec3::new(0.0, 3.0, 0.0)).length();
        let far_moved = (far.state().target - Vec3::new(0.0, 3.0, 0.0)).length();
        assert_relative_eq!(far_moved, near_moved * 4.0, epsilon = 1e-4);
    }

    #[test]
    fn test_non_finite_pointer_is_ignored() {
        let (mut controller, mut camera) = setup();
        controller.drag_start(Vec2::new(f32::NAN, 0.0));
        assert!(!controller.is_dragging());

        controller.drag_start(Vec2::ZERO);
        let before = *controller.state();
        controller.drag_move(Vec2::new(f32::INFINITY, 0.0), PointerButtons::PRIMARY, &mut camera);
        assert_eq!(*controller.state(), before);
        assert_eq!(controller.drag_state().last_pointer_pos, Vec2::ZERO);
    }

    #[test]
    fn test_tick_changes_nothing() {
        let (mut controller, _camera) = setup();
        let before = *controller.state();
        controller.tick();
        controller.tick();
        assert_eq!(*controller.state(), before);
    }

    #[test]
    fn test_reset_restores_config_pose() {
        let config = CameraConfig::default();
        let (mut controller, mut camera) = setup();
        controller.rotate(1.0, 0.5, &mut camera);
        controller.wheel(1.0, &mut camera);
        controller.reset(&config, &mut camera);
        assert_relative_eq!(camera.position.z, 15.0, epsilon = 1e-4);
        assert_eq!(controller.state().target, Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_non_finite_settings_fall_back_to_defaults() {
        let config = CameraConfig {
            polar_epsilon: f32::NAN,
            zoom_out_factor: f32::NAN,
            zoom_in_factor: f32::INFINITY,
            rotate_speed: f32::NAN,
            ..Default::default()
        };
        let mut camera = Camera::new(&config, 800.0, 600.0);
        let mut controller = OrbitController::new(&config, &mut camera);
        assert_eq!(controller.polar_limits(), (0.1, PI - 0.1));

        controller.wheel(1.0, &mut camera);
        let distance = controller.state().distance;
        assert!(distance.is_finite());
        assert!((5.0..=50.0).contains(&distance));

        controller.drag_start(Vec2::ZERO);
        controller.drag_move(Vec2::new(0.0, 1000.0), PointerButtons::PRIMARY, &mut camera);
        assert_relative_eq!(controller.state().polar, PI - 0.1, epsilon = 1e-5);

        controller.rotate(f32::NAN, 0.0, &mut camera);
        assert!(controller.state().azimuth.is_finite());
        assert!(camera.position.is_finite());
    }
}
