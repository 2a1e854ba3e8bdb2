//! Curved connection paths

use glam::Vec3;

/// Quadratic Bézier curve in 3D
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier {
    pub start: Vec3,
    pub control: Vec3,
    pub end: Vec3,
}

impl QuadraticBezier {
    /// Create a curve from its three control points
    pub fn new(start: Vec3, control: Vec3, end: Vec3) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    /// Arc between two points that bulges upward (+Y).
    ///
    /// The control point sits above the horizontal midpoint, `lift` units
    /// over the higher of the two endpoints.
    pub fn arc(from: Vec3, to: Vec3, lift: f32) -> Self {
        let control = Vec3::new(
            (from.x + to.x) / 2.0,
            from.y.max(to.y) + lift,
            (from.z + to.z) / 2.0,
        );
        Self::new(from, control, to)
    }

    /// Point on the curve at parameter `t` (clamped to `[0, 1]`)
    pub fn point_at(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        self.start * (u * u) + self.control * (2.0 * u * t) + self.end * (t * t)
    }

    /// Sample `segments + 1` evenly spaced points, endpoints included
    pub fn sample(&self, segments: usize) -> Vec<Vec3> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point_at(i as f32 / segments as f32))
            .collect()
    }
}
