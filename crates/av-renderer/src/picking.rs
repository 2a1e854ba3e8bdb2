//! Click-to-select picking
//!
//! A click is turned into a world ray through the camera, tested against the
//! bounding box of every registered component, and the nearest hit becomes
//! the single selected component.

use std::collections::HashMap;

use glam::Vec2;

use crate::camera::Camera;
use crate::config::MissPolicy;
use crate::ray::Ray;
use crate::scene::BoundingBox;

/// Picking errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PickError {
    /// A pickable with this id is already registered
    #[error("Duplicate pickable id: {0}")]
    DuplicateId(String),
}

/// An object eligible for selection
#[derive(Debug, Clone, PartialEq)]
pub struct Pickable {
    id: String,
    bounds: BoundingBox,
    selected: bool,
}

impl Pickable {
    /// Unique id (the component name)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Geometry used for ray tests
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Whether this object is the current selection
    pub fn is_selected(&self) -> bool {
        self.selected
    }
}

/// Registered pickables in registration order
#[derive(Debug, Clone, Default)]
pub struct PickRegistry {
    objects: Vec<Pickable>,
    index: HashMap<String, usize>,
}

impl PickRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object; ids must be unique
    pub fn register(
        &mut self,
        id: impl Into<String>,
        bounds: BoundingBox,
    ) -> Result<(), PickError> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(PickError::DuplicateId(id));
        }
        self.index.insert(id.clone(), self.objects.len());
        self.objects.push(Pickable {
            id,
            bounds,
            selected: false,
        });
        Ok(())
    }

    /// Look up an object by id
    pub fn get(&self, id: &str) -> Option<&Pickable> {
        self.index.get(id).map(|&i| &self.objects[i])
    }

    /// All objects, in registration order
    pub fn objects(&self) -> &[Pickable] {
        &self.objects
    }

    /// Number of registered objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Remove every object
    pub fn clear(&mut self) {
        self.objects.clear();
        self.index.clear();
    }
}

/// Nearest candidate hit by `ray`.
///
/// Ties go to the earliest candidate.
pub fn pick_ray<'a>(ray: &Ray, candidates: &'a [Pickable]) -> Option<&'a Pickable> {
    let mut nearest: Option<(f32, &Pickable)> = None;
    for candidate in candidates {
        let Some(t) = candidate.bounds.intersect_ray(ray) else {
            continue;
        };
        if nearest.is_none_or(|(best, _)| t < best) {
            nearest = Some((t, candidate));
        }
    }
    nearest.map(|(_, candidate)| candidate)
}

/// Nearest candidate under a pointer position in screen pixels
pub fn pick<'a>(
    pointer: Vec2,
    camera: &Camera,
    candidates: &'a [Pickable],
) -> Option<&'a Pickable> {
    let ray = camera.screen_to_ray(pointer)?;
    pick_ray(&ray, candidates)
}

/// Result of a click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click hit an object, which is now selected
    Selected(String),
    /// Nothing was hit and the selection was cleared
    Cleared,
    /// Nothing changed
    Unchanged,
}

/// Owns the registry and keeps at most one object selected
#[derive(Debug, Clone, Default)]
pub struct PickSelector {
    registry: PickRegistry,
    selected: Option<usize>,
    miss_policy: MissPolicy,
}

impl PickSelector {
    /// Create a selector over a populated registry
    pub fn new(registry: PickRegistry, miss_policy: MissPolicy) -> Self {
        Self {
            registry,
            selected: None,
            miss_policy,
        }
    }

    /// Registered objects
    pub fn registry(&self) -> &PickRegistry {
        &self.registry
    }

    /// What a click on empty space does
    pub fn miss_policy(&self) -> MissPolicy {
        self.miss_policy
    }

    /// Change the miss policy
    pub fn set_miss_policy(&mut self, policy: MissPolicy) {
        self.miss_policy = policy;
    }

    /// The selected object, if any
    pub fn selected(&self) -> Option<&Pickable> {
        self.selected.map(|i| &self.registry.objects[i])
    }

    /// Id of the selected object, if any
    pub fn selected_id(&self) -> Option<&str> {
        self.selected().map(Pickable::id)
    }

    /// Nearest registered object under the pointer
    pub fn pick(&self, pointer: Vec2, camera: &Camera) -> Option<&Pickable> {
        pick(pointer, camera, self.registry.objects())
    }

    /// Make `id` the only selected object.
    ///
    /// Every flag is reset before the new one is set. Unknown ids leave the
    /// selection untouched and return `false`.
    pub fn select(&mut self, id: &str) -> bool {
        let Some(&index) = self.registry.index.get(id) else {
            return false;
        };
        for object in &mut self.registry.objects {
            object.selected = false;
        }
        self.registry.objects[index].selected = true;
        self.selected = Some(index);
        true
    }

    /// Deselect everything
    pub fn clear_selection(&mut self) {
        for object in &mut self.registry.objects {
            object.selected = false;
        }
        self.selected = None;
    }

    /// Pick under the pointer and update the selection.
    ///
    /// A miss follows the configured [`MissPolicy`].
    pub fn click(&mut self, pointer: Vec2, camera: &Camera) -> ClickOutcome {
        if !pointer.is_finite() {
            return ClickOutcome::Unchanged;
        }

        let hit = self.pick(pointer, camera).map(|p| p.id.clone());
        match hit {
            Some(id) => {
                self.select(&id);
                ClickOutcome::Selected(id)
            }
            None => match self.miss_policy {
                MissPolicy::ClearSelection if self.selected.is_some() => {
                    self.clear_selection();
                    ClickOutcome::Cleared
                }
                _ => ClickOutcome::Unchanged,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;
    use glam::Vec3;

    /// Camera at z = 10 looking down -Z at the origin, 800x600 viewport
    fn camera() -> Camera {
        let config = CameraConfig {
            position: [0.0, 0.0, 10.0],
            target: [0.0, 0.0, 0.0],
            ..Default::default()
        };
        Camera::new(&config, 800.0, 600.0)
    }

    const CENTER: Vec2 = Vec2::new(400.0, 300.0);
    const CORNER: Vec2 = Vec2::new(2.0, 2.0);

    fn cube(center: Vec3) -> BoundingBox {
        BoundingBox::from_center_size(center, Vec3::ONE)
    }

    fn selector(objects: &[(&str, BoundingBox)]) -> PickSelector {
        let mut registry = PickRegistry::new();
        for (id, bounds) in objects {
            registry.register(*id, *bounds).unwrap();
        }
        PickSelector::new(registry, MissPolicy::KeepSelection)
    }

    fn selected_count(selector: &PickSelector) -> usize {
        selector
            .registry()
            .objects()
            .iter()
            .filter(|p| p.is_selected())
            .count()
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = PickRegistry::new();
        registry.register("HSM", cube(Vec3::ZERO)).unwrap();
        assert_eq!(
            registry.register("HSM", cube(Vec3::X)),
            Err(PickError::DuplicateId("HSM".to_string()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_empty_candidates() {
        assert!(pick(CENTER, &camera(), &[]).is_none());
    }

    #[test]
    fn test_nearest_wins_when_occluded() {
        let s = selector(&[
            ("far", cube(Vec3::new(0.0, 0.0, -5.0))),
            ("near", cube(Vec3::ZERO)),
        ]);
        assert_eq!(s.pick(CENTER, &camera()).unwrap().id(), "near");
    }

    #[test]
    fn test_tie_goes_to_first() {
        let s = selector(&[("first", cube(Vec3::ZERO)), ("second", cube(Vec3::ZERO))]);
        assert_eq!(s.pick(CENTER, &camera()).unwrap().id(), "first");
    }

    #[test]
    fn test_pick_is_idempotent() {
        let s = selector(&[("a", cube(Vec3::ZERO)), ("b", cube(Vec3::new(0.0, 0.0, 2.0)))]);
        let cam = camera();
        let first = s.pick(CENTER, &cam).map(|p| p.id().to_string());
        let second = s.pick(CENTER, &cam).map(|p| p.id().to_string());
        assert_eq!(first, second);
        assert_eq!(first.as_deref(), Some("b"));
    }

    #[test]
    fn test_degenerate_geometry_is_a_miss() {
        let flat = BoundingBox::from_center_size(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0));
        let s = selector(&[("flat", flat)]);
        assert!(s.pick(CENTER, &camera()).is_none());
    }

    #[test]
    fn test_select_is_exclusive() {
        let mut s = selector(&[("A", cube(Vec3::ZERO)), ("B", cube(Vec3::X * 3.0))]);
        assert!(s.select("A"));
        assert!(s.select("B"));
        assert_eq!(selected_count(&s), 1);
        assert_eq!(s.selected_id(), Some("B"));
        assert!(!s.registry().get("A").unwrap().is_selected());
    }

    #[test]
    fn test_select_unknown_keeps_selection() {
        let mut s = selector(&[("A", cube(Vec3::ZERO))]);
        s.select("A");
        assert!(!s.select("Z"));
        assert_eq!(s.selected_id(), Some("A"));
    }

    #[test]
    fn test_click_miss_keeps_selection() {
        let mut s = selector(&[("A", cube(Vec3::ZERO))]);
        let cam = camera();
        assert_eq!(s.click(CENTER, &cam), ClickOutcome::Selected("A".to_string()));
        assert_eq!(s.click(CORNER, &cam), ClickOutcome::Unchanged);
        assert_eq!(s.selected_id(), Some("A"));
    }

    #[test]
    fn test_click_miss_clears_when_configured() {
        let mut s = selector(&[("A", cube(Vec3::ZERO))]);
        s.set_miss_policy(MissPolicy::ClearSelection);
        let cam = camera();
        s.click(CENTER, &cam);
        assert_eq!(s.click(CORNER, &cam), ClickOutcome::Cleared);
        assert_eq!(s.selected_id(), None);
        assert_eq!(selected_count(&s), 0);
        assert_eq!(s.click(CORNER, &cam), ClickOutcome::Unchanged);
    }

    #[test]
    fn test_click_with_nan_pointer() {
        let mut s = selector(&[("A", cube(Vec3::ZERO))]);
        assert_eq!(
            s.click(Vec2::new(f32::NAN, 0.0), &camera()),
            ClickOutcome::Unchanged
        );
    }
}
