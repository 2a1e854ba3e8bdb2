//! Perspective camera for the 3D viewport

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::config::CameraConfig;
use crate::ray::Ray;

/// Camera pose and projection.
///
/// The camera always looks at `target` with +Y up. Pose changes come from
/// [`crate::OrbitController`]; projection changes from [`Camera::resize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// World up direction
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Viewport width / height
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    viewport: Vec2,
}

impl Camera {
    /// Create a camera for a viewport of the given size in pixels
    pub fn new(config: &CameraConfig, width: f32, height: f32) -> Self {
        let mut camera = Self {
            position: Vec3::from(config.position),
            target: Vec3::from(config.target),
            up: Vec3::Y,
            fov: config.fov_degrees.clamp(10.0, 120.0).to_radians(),
            aspect: 1.0,
            near: config.near_plane.max(0.001),
            far: config.far_plane.max(config.near_plane + 1.0),
            viewport: Vec2::ONE,
        };
        camera.resize(width, height);
        camera
    }

    /// Update the viewport size.
    ///
    /// Zero, negative or non-finite sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return;
        }
        self.viewport = Vec2::new(width, height);
        self.aspect = width / height;
    }

    /// Viewport size in pixels
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Set field of view in degrees
    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.fov = fov_degrees.clamp(10.0, 120.0).to_radians();
    }

    /// Get field of view in degrees
    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }

    /// Unit vector from the eye towards the target
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Z)
    }

    /// Camera-space +X in world coordinates
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize_or(Vec3::X)
    }

    /// Camera-space +Y in world coordinates
    pub fn up_axis(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize_or(Vec3::Y)
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined projection * view
    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Convert a pixel position (origin top-left, y down) to normalized
    /// device coordinates (y up).
    pub fn screen_to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            (2.0 * screen.x / self.viewport.x) - 1.0,
            1.0 - (2.0 * screen.y / self.viewport.y),
        )
    }

    /// Convert screen coordinates to a world ray through the pixel.
    ///
    /// Returns `None` for non-finite input.
    pub fn screen_to_ray(&self, screen: Vec2) -> Option<Ray> {
        if !screen.is_finite() {
            return None;
        }
        let ndc = self.screen_to_ndc(screen);
        let inv_view_proj = self.view_proj().inverse();

        // glam projections map depth to [0, 1]
        let near = inv_view_proj * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let far = inv_view_proj * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        Ray::new(near, far - near)
    }

    /// Project a world point to pixel coordinates.
    ///
    /// Returns `None` for points behind the camera.
    pub fn world_to_screen(&self, point: Vec3) -> Option<Vec2> {
        let clip = self.view_proj() * point.extend(1.0);
        if clip.w <= self.near * 0.5 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }

    /// Distance of a point in front of the camera along the view direction
    pub fn view_depth(&self, point: Vec3) -> f32 {
        (point - self.position).dot(self.forward())
    }
}
