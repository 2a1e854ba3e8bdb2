//! Axis-aligned bounding boxes used as pick geometry.

use glam::Vec3;

use crate::ray::Ray;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner of the bounding box.
    pub min: Vec3,
    /// Maximum corner of the bounding box.
    pub max: Vec3,
}

impl BoundingBox {
    /// Creates a new bounding box from min and max points.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates a box centered on `center` with full extents `size`.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Returns the center of the bounding box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the size (full extents) of the bounding box.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns true if any extent is zero, negative or non-finite.
    ///
    /// Degenerate boxes never intersect anything.
    pub fn is_degenerate(&self) -> bool {
        let size = self.size();
        !size.is_finite() || size.min_element() <= 0.0
    }

    /// Returns true if the bounding box contains the given point.
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// The eight corners, bottom face (-Y) first.
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(b.x, b.y, b.z),
            Vec3::new(a.x, b.y, b.z),
        ]
    }

    /// Ray parameter of the nearest intersection in front of the ray origin.
    ///
    /// Uses the slab method. When the origin is inside the box the exit
    /// point is returned. Returns `None` on a miss, for hits behind the
    /// origin, and for degenerate boxes.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        if self.is_degenerate() {
            return None;
        }

        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];

            if direction.abs() < 1e-8 {
                // Parallel to the slab
                if origin < self.min[axis] || origin > self.max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / direction;
            let mut t1 = (self.min[axis] - origin) * inv;
            let mut t2 = (self.max[axis] - origin) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        if t_min > 0.0 {
            Some(t_min)
        } else if t_max > 0.0 {
            Some(t_max)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn test_bounding_box_center_and_size() {
        let bbox =
            BoundingBox::from_center_size(Vec3::new(0.0, 4.0, 0.0), Vec3::new(1.8, 1.2, 1.0));
        assert_eq!(bbox.center(), Vec3::new(0.0, 4.0, 0.0));
        assert!(bbox.size().abs_diff_eq(Vec3::new(1.8, 1.2, 1.0), 1e-6));
    }

    #[test]
    fn test_bounding_box_contains_point() {
        let bbox = unit_box();
        assert!(bbox.contains_point(Vec3::ZERO));
        assert!(bbox.contains_point(Vec3::new(0.5, 0.5, 0.5)));
        assert!(!bbox.contains_point(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_ray_hits_front_face() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z).unwrap();
        assert_eq!(unit_box().intersect_ray(&ray), Some(4.0));
    }

    #[test]
    fn test_ray_misses() {
        let ray = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z).unwrap();
        assert_eq!(unit_box().intersect_ray(&ray), None);
    }

    #[test]
    fn test_box_behind_ray() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z).unwrap();
        assert_eq!(unit_box().intersect_ray(&ray), None);
    }

    #[test]
    fn test_origin_inside_returns_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X).unwrap();
        assert_eq!(unit_box().intersect_ray(&ray), Some(1.0));
    }

    #[test]
    fn test_oblique_hit() {
        let ray = Ray::new(Vec3::new(-5.0, -5.0, 0.0), Vec3::new(1.0, 1.0, 0.0)).unwrap();
        let t = unit_box().intersect_ray(&ray).unwrap();
        let hit = ray.at(t);
        assert!(hit.abs_diff_eq(Vec3::new(-1.0, -1.0, 0.0), 1e-4));
    }

    #[test]
    fn test_degenerate_box_never_hits() {
        let flat = BoundingBox::from_center_size(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0));
        assert!(flat.is_degenerate());
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y).unwrap();
        assert_eq!(flat.intersect_ray(&ray), None);
    }

    #[test]
    fn test_corners() {
        let corners = unit_box().corners();
        assert_eq!(corners[0], Vec3::splat(-1.0));
        assert_eq!(corners[6], Vec3::splat(1.0));
    }
}
