//! Retained scene graph
//!
//! Everything the host draws each frame: component boxes, connection
//! curves with their flow particles, and decorations (grid, layer rings,
//! legend). The scene also carries the lights and fog the host shades with.

mod bounds;
mod factory;

pub use bounds::BoundingBox;
pub use factory::{BoxVisualFactory, Label, VisualFactory};

use glam::Vec3;

use av_core::{ComponentKind, ConnectionKind, FlowParticle, QuadraticBezier, ResolvedConnection};

use crate::camera::Camera;
use crate::config::{FogConfig, GridConfig, LightingConfig, VisualConfig};

/// Handle to an object in a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

/// A component box with its glow shell, edge outline and label
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentVisual {
    /// Component name
    pub name: String,
    /// Component layer
    pub kind: ComponentKind,
    /// Box center
    pub position: Vec3,
    /// Box extents
    pub size: Vec3,
    /// Base color (RGBA)
    pub color: [f32; 4],
    /// Current box opacity; changed by selection
    pub opacity: f32,
    /// Glow shell size relative to the box
    pub glow_scale: f32,
    /// Glow shell opacity
    pub glow_opacity: f32,
    /// Edge outline opacity
    pub edge_opacity: f32,
    /// Text label above the box
    pub label: Label,
}

impl ComponentVisual {
    /// Box bounds in world space
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_center_size(self.position, self.size)
    }

    /// Glow shell bounds in world space
    pub fn glow_bounds(&self) -> BoundingBox {
        BoundingBox::from_center_size(self.position, self.size * self.glow_scale)
    }

    /// World position of the label center
    pub fn label_position(&self) -> Vec3 {
        self.position + Vec3::Y * (self.size.y / 2.0 + self.label.offset)
    }
}

/// A curved line between two components
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionVisual {
    /// Source component
    pub from: String,
    /// Destination component
    pub to: String,
    /// Traffic kind
    pub kind: ConnectionKind,
    /// Path of the line
    pub curve: QuadraticBezier,
    /// Sampled polyline of `curve`
    pub points: Vec<Vec3>,
    /// Line color (RGBA)
    pub color: [f32; 4],
    /// Line opacity
    pub opacity: f32,
    /// Particles travelling along the curve
    pub particles: Vec<FlowParticle>,
    /// Particle sphere radius
    pub particle_radius: f32,
}

impl ConnectionVisual {
    /// Build the visual for a resolved connection.
    ///
    /// `seed` varies particle speeds between connections.
    pub fn new(resolved: &ResolvedConnection<'_>, config: &VisualConfig, seed: usize) -> Self {
        let style = resolved.connection.kind.style();
        let curve = QuadraticBezier::arc(resolved.from, resolved.to, config.curve_lift);
        Self {
            from: resolved.connection.from.clone(),
            to: resolved.connection.to.clone(),
            kind: resolved.connection.kind,
            curve,
            points: curve.sample(config.curve_segments),
            color: style.color,
            opacity: style.opacity,
            particles: FlowParticle::spread(
                config.particles_per_connection,
                seed,
                config.particle_min_speed,
                config.particle_max_speed,
            ),
            particle_radius: config.particle_radius,
        }
    }

    /// Current particle positions
    pub fn particle_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.particles.iter().map(|p| self.curve.point_at(p.progress))
    }

    /// Move every particle one frame along the curve
    pub fn advance(&mut self) {
        for particle in &mut self.particles {
            particle.advance();
        }
    }
}

/// Square floor grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridVisual {
    /// Full width
    pub size: f32,
    /// Cells per side
    pub divisions: u32,
    /// Plane height
    pub height: f32,
    /// Color of the center lines (RGBA)
    pub center_color: [f32; 4],
    /// Color of the other lines (RGBA)
    pub line_color: [f32; 4],
    /// Line opacity
    pub opacity: f32,
}

impl GridVisual {
    /// Grid from configuration
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            size: config.size,
            divisions: config.divisions.max(1),
            height: config.height,
            center_color: config.center_color,
            line_color: config.line_color,
            opacity: config.opacity,
        }
    }

    /// Line segments as `(start, end, is_center_line)`
    pub fn lines(&self) -> Vec<(Vec3, Vec3, bool)> {
        let half = self.size / 2.0;
        let step = self.size / self.divisions as f32;
        let center = self.divisions / 2;
        let mut lines = Vec::with_capacity((self.divisions as usize + 1) * 2);
        for i in 0..=self.divisions {
            let k = -half + i as f32 * step;
            let is_center = self.divisions % 2 == 0 && i == center;
            lines.push((
                Vec3::new(-half, self.height, k),
                Vec3::new(half, self.height, k),
                is_center,
            ));
            lines.push((
                Vec3::new(k, self.height, -half),
                Vec3::new(k, self.height, half),
                is_center,
            ));
        }
        lines
    }
}

/// Flat horizontal ring marking a layer height
#[derive(Debug, Clone, PartialEq)]
pub struct RingVisual {
    /// Inner radius
    pub inner_radius: f32,
    /// Outer radius
    pub outer_radius: f32,
    /// Ring height
    pub height: f32,
    /// Ring color (RGBA)
    pub color: [f32; 4],
    /// Ring opacity
    pub opacity: f32,
}

impl RingVisual {
    /// One ring per configured layer height
    pub fn from_config(config: &GridConfig) -> Vec<Self> {
        config
            .ring_heights
            .iter()
            .enumerate()
            .map(|(i, height)| Self {
                inner_radius: config.ring_inner_radius,
                outer_radius: config.ring_outer_radius,
                height: height - 0.5,
                color: config
                    .ring_colors
                    .get(i % config.ring_colors.len().max(1))
                    .copied()
                    .unwrap_or([1.0; 4]),
                opacity: config.ring_opacity,
            })
            .collect()
    }

    /// Points on a circle of `radius` at the ring height, closed loop
    pub fn circle(&self, radius: f32, segments: usize) -> Vec<Vec3> {
        let segments = segments.max(3);
        (0..=segments)
            .map(|i| {
                let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
                Vec3::new(radius * angle.cos(), self.height, radius * angle.sin())
            })
            .collect()
    }
}

/// One swatch of the legend
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Layer title
    pub label: String,
    /// Swatch color (RGBA)
    pub color: [f32; 4],
    /// Swatch center
    pub position: Vec3,
}

/// Color legend for the component layers
#[derive(Debug, Clone, PartialEq)]
pub struct LegendVisual {
    /// Entries, top to bottom
    pub entries: Vec<LegendEntry>,
    /// Swatch cube size
    pub swatch_size: f32,
}

impl LegendVisual {
    /// One entry per component kind, stacked downwards from the origin
    pub fn from_config(config: &VisualConfig) -> Self {
        let origin = Vec3::from(config.legend_origin);
        let entries = ComponentKind::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| LegendEntry {
                label: kind.layer_label().to_string(),
                color: kind.legend_color(),
                position: origin - Vec3::Y * (i as f32 * config.legend_spacing),
            })
            .collect();
        Self {
            entries,
            swatch_size: 0.6,
        }
    }
}

/// Drawable scene objects
#[derive(Debug, Clone, PartialEq)]
pub enum SceneObject {
    /// A component box
    Component(ComponentVisual),
    /// A connection curve
    Connection(ConnectionVisual),
    /// The floor grid
    Grid(GridVisual),
    /// A layer ring
    Ring(RingVisual),
    /// The layer legend
    Legend(LegendVisual),
}

/// Scene light
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Uniform light from everywhere
    Ambient {
        /// Light color (RGB)
        color: Vec3,
        /// Strength
        intensity: f32,
    },
    /// Parallel light shining towards the origin
    Directional {
        /// Light color (RGB)
        color: Vec3,
        /// Strength
        intensity: f32,
        /// Unit vector pointing at the light
        direction: Vec3,
    },
    /// Light radiating from a point, fading to zero at `range`
    Point {
        /// Light color (RGB)
        color: Vec3,
        /// Strength
        intensity: f32,
        /// Fade-out distance
        range: f32,
        /// World position
        position: Vec3,
    },
}

impl Light {
    /// Lights from configuration
    pub fn from_config(config: &LightingConfig) -> Vec<Self> {
        let mut lights = vec![
            Light::Ambient {
                color: Vec3::from(config.ambient_color),
                intensity: config.ambient_strength,
            },
            Light::Directional {
                color: Vec3::from(config.directional_color),
                intensity: config.directional_intensity,
                direction: Vec3::from(config.directional_position).normalize_or(Vec3::Y),
            },
        ];
        lights.extend(config.point_lights.iter().map(|p| Light::Point {
            color: Vec3::from(p.color),
            intensity: p.intensity,
            range: p.range,
            position: Vec3::from(p.position),
        }));
        lights
    }

    /// Diffuse contribution at a surface point with unit `normal`
    pub fn irradiance(&self, point: Vec3, normal: Vec3) -> Vec3 {
        match *self {
            Light::Ambient { color, intensity } => color * intensity,
            Light::Directional {
                color,
                intensity,
                direction,
            } => color * intensity * normal.dot(direction).max(0.0),
            Light::Point {
                color,
                intensity,
                range,
                position,
            } => {
                let to_light = position - point;
                let distance = to_light.length();
                if range <= 0.0 || distance >= range || distance == 0.0 {
                    return Vec3::ZERO;
                }
                let falloff = (1.0 - distance / range).powi(2);
                color * intensity * falloff * normal.dot(to_light / distance).max(0.0)
            }
        }
    }
}

/// Linear distance fog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    /// Fog color (RGBA)
    pub color: [f32; 4],
    /// Distance where fog starts
    pub near: f32,
    /// Distance where fog is total
    pub far: f32,
}

impl Fog {
    /// Fog from configuration, `None` when disabled
    pub fn from_config(config: &FogConfig) -> Option<Self> {
        config.enabled.then_some(Self {
            color: config.color,
            near: config.near,
            far: config.far.max(config.near + f32::EPSILON),
        })
    }

    /// Fog amount in `[0, 1]` at a view distance
    pub fn factor(&self, distance: f32) -> f32 {
        ((distance - self.near) / (self.far - self.near)).clamp(0.0, 1.0)
    }

    /// Blend an RGBA color towards the fog color
    pub fn apply(&self, color: [f32; 4], distance: f32) -> [f32; 4] {
        let f = self.factor(distance);
        [
            color[0] + (self.color[0] - color[0]) * f,
            color[1] + (self.color[1] - color[1]) * f,
            color[2] + (self.color[2] - color[2]) * f,
            color[3],
        ]
    }
}

/// Scene contents in insertion order
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<(ObjectId, SceneObject)>,
    next_id: u64,
    /// Lights used for shading
    pub lights: Vec<Light>,
    /// Distance fog
    pub fog: Option<Fog>,
    /// Background color (RGBA)
    pub background: [f32; 4],
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and return its handle
    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push((id, object));
        id
    }

    /// Remove an object
    pub fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject> {
        let index = self.objects.iter().position(|(oid, _)| *oid == id)?;
        Some(self.objects.remove(index).1)
    }

    /// Get an object
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects
            .iter()
            .find(|(oid, _)| *oid == id)
            .map(|(_, object)| object)
    }

    /// Get a mutable object
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects
            .iter_mut()
            .find(|(oid, _)| *oid == id)
            .map(|(_, object)| object)
    }

    /// Iterate over objects in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter().map(|(id, object)| (*id, object))
    }

    /// Iterate mutably over objects in insertion order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectId, &mut SceneObject)> {
        self.objects.iter_mut().map(|(id, object)| (*id, object))
    }

    /// Component visuals in insertion order
    pub fn components(&self) -> impl Iterator<Item = &ComponentVisual> {
        self.objects.iter().filter_map(|(_, object)| match object {
            SceneObject::Component(c) => Some(c),
            _ => None,
        })
    }

    /// Connection visuals in insertion order
    pub fn connections(&self) -> impl Iterator<Item = &ConnectionVisual> {
        self.objects.iter().filter_map(|(_, object)| match object {
            SceneObject::Connection(c) => Some(c),
            _ => None,
        })
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the scene has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Remove every object; lights and fog stay
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Flat-shade a surface color with the scene lights
    pub fn shade(&self, color: [f32; 4], point: Vec3, normal: Vec3) -> [f32; 4] {
        if self.lights.is_empty() {
            return color;
        }
        let light: Vec3 = self
            .lights
            .iter()
            .map(|l| l.irradiance(point, normal))
            .sum();
        let lit = (Vec3::new(color[0], color[1], color[2]) * light).min(Vec3::ONE);
        [lit.x, lit.y, lit.z, color[3]]
    }
}

/// Draws a scene; implemented by the host
pub trait SceneRenderer {
    /// Draw one frame
    fn render(&mut self, scene: &Scene, camera: &Camera);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_remove_objects() {
        let mut scene = Scene::new();
        let grid = scene.add_object(SceneObject::Grid(GridVisual::from_config(
            &GridConfig::default(),
        )));
        let legend = scene.add_object(SceneObject::Legend(LegendVisual::from_config(
            &VisualConfig::default(),
        )));
        assert_ne!(grid, legend);
        assert_eq!(scene.len(), 2);

        assert!(matches!(scene.remove_object(grid), Some(SceneObject::Grid(_))));
        assert!(scene.get(grid).is_none());
        assert!(scene.remove_object(grid).is_none());
        assert!(scene.get(legend).is_some());

        // Handles are never reused
        let again = scene.add_object(SceneObject::Grid(GridVisual::from_config(
            &GridConfig::default(),
        )));
        assert_ne!(again, grid);
    }

    #[test]
    fn test_grid_lines() {
        let grid = GridVisual::from_config(&GridConfig::default());
        let lines = grid.lines();
        assert_eq!(lines.len(), 82);
        assert_eq!(lines.iter().filter(|(_, _, center)| *center).count(), 2);
        assert!(lines.iter().all(|(a, b, _)| a.y == -5.0 && b.y == -5.0));
    }

    #[test]
    fn test_rings_sit_below_layer_heights() {
        let rings = RingVisual::from_config(&GridConfig::default());
        let heights: Vec<f32> = rings.iter().map(|r| r.height).collect();
        assert_eq!(heights, [9.5, 6.5, 3.5, 0.5, -2.5]);
        assert_eq!(rings[0].color, rings[2].color);
        assert_ne!(rings[0].color, rings[1].color);

        let circle = rings[0].circle(8.0, 32);
        assert_eq!(circle.len(), 33);
        assert_relative_eq!(circle[8].length(), Vec3::new(0.0, 9.5, 8.0).length(), epsilon = 1e-4);
    }

    #[test]
    fn test_legend_entries() {
        let legend = LegendVisual::from_config(&VisualConfig::default());
        assert_eq!(legend.entries.len(), 6);
        assert_eq!(legend.entries[0].label, "Client Layer");
        assert_eq!(legend.entries[1].position, Vec3::new(-14.5, 6.5, 0.0));
    }

    #[test]
    fn test_fog_factor() {
        let fog = Fog::from_config(&FogConfig::default()).unwrap();
        assert_eq!(fog.factor(10.0), 0.0);
        assert_relative_eq!(fog.factor(42.5), 0.5);
        assert_eq!(fog.factor(100.0), 1.0);
        let fogged = fog.apply([1.0, 1.0, 1.0, 0.5], 100.0);
        for channel in 0..3 {
            assert_relative_eq!(fogged[channel], fog.color[channel], epsilon = 1e-6);
        }
        assert_eq!(fogged[3], 0.5);
        assert!(Fog::from_config(&FogConfig {
            enabled: false,
            ..Default::default()
        })
        .is_none());
    }

    #[test]
    fn test_directional_light_faces() {
        let light = Light::Directional {
            color: Vec3::ONE,
            intensity: 1.0,
            direction: Vec3::Y,
        };
        assert_eq!(light.irradiance(Vec3::ZERO, Vec3::Y), Vec3::ONE);
        assert_eq!(light.irradiance(Vec3::ZERO, Vec3::NEG_Y), Vec3::ZERO);
    }

    #[test]
    fn test_point_light_range() {
        let light = Light::Point {
            color: Vec3::ONE,
            intensity: 1.0,
            range: 10.0,
            position: Vec3::new(0.0, 5.0, 0.0),
        };
        let near = light.irradiance(Vec3::ZERO, Vec3::Y);
        assert_relative_eq!(near.x, 0.25);
        assert_eq!(light.irradiance(Vec3::new(0.0, -20.0, 0.0), Vec3::Y), Vec3::ZERO);
    }

    #[test]
    fn test_shade_clamps() {
        let mut scene = Scene::new();
        scene.lights = vec![Light::Ambient {
            color: Vec3::ONE,
            intensity: 3.0,
        }];
        let shaded = scene.shade([0.5, 0.2, 0.0, 0.9], Vec3::ZERO, Vec3::Y);
        assert_eq!(shaded[0], 1.0);
        assert_relative_eq!(shaded[1], 0.6, epsilon = 1e-6);
        assert_eq!(shaded[2], 0.0);
        assert_eq!(shaded[3], 0.9);
    }
}
