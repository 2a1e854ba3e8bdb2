//! Renderer configuration structures
//!
//! This module provides configurable settings for the camera, picking and
//! scene decoration that can be serialized and loaded from RON files.

use std::path::Path;

use av_core::rgb_u32;
use serde::{Deserialize, Serialize};

/// Configuration loading errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("IO error: {0}")]
    Io(String),
    /// The configuration could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// The file is not valid configuration RON
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    /// A value parsed but is unusable
    #[error("Invalid value: {0}")]
    Invalid(String),
}

/// Camera and orbit control configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane distance
    pub near_plane: f32,
    /// Far clipping plane distance
    pub far_plane: f32,
    /// Initial camera position
    pub position: [f32; 3],
    /// Initial orbit target
    pub target: [f32; 3],
    /// Closest allowed orbit distance
    pub min_distance: f32,
    /// Farthest allowed orbit distance
    pub max_distance: f32,
    /// Radians of rotation per dragged pixel
    pub rotate_speed: f32,
    /// Pan multiplier; 1.0 keeps the point under the cursor fixed on the target plane
    pub pan_speed: f32,
    /// Distance multiplier for a wheel step away from the target
    pub zoom_out_factor: f32,
    /// Distance multiplier for a wheel step towards the target
    pub zoom_in_factor: f32,
    /// Minimum angle kept between the camera and either pole, in radians
    pub polar_epsilon: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            position: [0.0, 5.0, 15.0],
            target: [0.0, 3.0, 0.0],
            min_distance: 5.0,
            max_distance: 50.0,
            rotate_speed: 0.01,
            pan_speed: 1.0,
            zoom_out_factor: 1.1,
            zoom_in_factor: 0.9,
            polar_epsilon: 0.1,
        }
    }
}

impl CameraConfig {
    /// Reject non-finite numbers, which would defeat the orbit clamps
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("fov_degrees", self.fov_degrees),
            ("near_plane", self.near_plane),
            ("far_plane", self.far_plane),
            ("min_distance", self.min_distance),
            ("max_distance", self.max_distance),
            ("rotate_speed", self.rotate_speed),
            ("pan_speed", self.pan_speed),
            ("zoom_out_factor", self.zoom_out_factor),
            ("zoom_in_factor", self.zoom_in_factor),
            ("polar_epsilon", self.polar_epsilon),
        ];
        if let Some((name, value)) = scalars.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("camera.{name} = {value}")));
        }
        for (name, value) in [("position", self.position), ("target", self.target)] {
            if value.iter().any(|v| !v.is_finite()) {
                return Err(ConfigError::Invalid(format!("camera.{name} = {value:?}")));
            }
        }
        Ok(())
    }
}

/// What a click on empty space does to the current selection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum MissPolicy {
    /// Keep the previous selection
    #[default]
    KeepSelection,
    /// Clear the selection
    ClearSelection,
}

/// Picking and selection highlight configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PickingConfig {
    /// Behaviour when a click hits nothing
    pub miss_policy: MissPolicy,
    /// Component opacity while nothing has been selected
    pub default_opacity: f32,
    /// Opacity of the selected component
    pub selected_opacity: f32,
    /// Opacity of every other component once something is selected
    pub unselected_opacity: f32,
}

impl Default for PickingConfig {
    fn default() -> Self {
        Self {
            miss_policy: MissPolicy::KeepSelection,
            default_opacity: 0.9,
            selected_opacity: 1.0,
            unselected_opacity: 0.8,
        }
    }
}

/// Viewport rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Background clear color (RGBA)
    pub background_color: [f32; 4],
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            background_color: rgb_u32(0x1a1a1a, 1.0),
        }
    }
}

/// Floor grid and layer ring configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Whether the grid is drawn
    pub enabled: bool,
    /// Full width of the grid
    pub size: f32,
    /// Number of cells along each side
    pub divisions: u32,
    /// Height of the grid plane
    pub height: f32,
    /// Color of the two center lines (RGBA)
    pub center_color: [f32; 4],
    /// Color of the other lines (RGBA)
    pub line_color: [f32; 4],
    /// Grid line opacity
    pub opacity: f32,
    /// Heights of the layer separator rings (each ring sits 0.5 below)
    pub ring_heights: Vec<f32>,
    /// Inner ring radius
    pub ring_inner_radius: f32,
    /// Outer ring radius
    pub ring_outer_radius: f32,
    /// Ring colors, cycled by ring index (RGBA)
    pub ring_colors: Vec<[f32; 4]>,
    /// Ring opacity
    pub ring_opacity: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 40.0,
            divisions: 40,
            height: -5.0,
            center_color: rgb_u32(0x00aaff, 1.0),
            line_color: rgb_u32(0x003366, 1.0),
            opacity: 0.6,
            ring_heights: vec![10.0, 7.0, 4.0, 1.0, -2.0],
            ring_inner_radius: 8.0,
            ring_outer_radius: 12.0,
            ring_colors: vec![rgb_u32(0x0088ff, 1.0), rgb_u32(0x00ff88, 1.0)],
            ring_opacity: 0.15,
        }
    }
}

/// Linear distance fog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FogConfig {
    /// Whether fog is applied
    pub enabled: bool,
    /// Fog color (RGBA)
    pub color: [f32; 4],
    /// Distance where fog starts
    pub near: f32,
    /// Distance where fog is opaque
    pub far: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: rgb_u32(0x0a0a0a, 1.0),
            near: 25.0,
            far: 60.0,
        }
    }
}

/// A point light
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointLightConfig {
    /// Light color (RGB)
    pub color: [f32; 3],
    /// Intensity at the light position
    pub intensity: f32,
    /// Distance where the light fades to zero
    pub range: f32,
    /// World position
    pub position: [f32; 3],
}

/// Lighting configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    /// Ambient light color (RGB)
    pub ambient_color: [f32; 3],
    /// Ambient light strength
    pub ambient_strength: f32,
    /// Directional light color (RGB)
    pub directional_color: [f32; 3],
    /// Directional light intensity
    pub directional_intensity: f32,
    /// Directional light position; the light shines from here towards the origin
    pub directional_position: [f32; 3],
    /// Colored fill lights
    pub point_lights: Vec<PointLightConfig>,
}

impl Default for LightingConfig {
    fn default() -> Self {
        let rgb = |value| {
            let [r, g, b, _] = rgb_u32(value, 1.0);
            [r, g, b]
        };
        Self {
            ambient_color: rgb(0x404040),
            ambient_strength: 0.6,
            directional_color: [1.0, 1.0, 1.0],
            directional_intensity: 0.8,
            directional_position: [10.0, 10.0, 5.0],
            point_lights: vec![
                PointLightConfig {
                    color: rgb(0x4caf50),
                    intensity: 0.5,
                    range: 20.0,
                    position: [-5.0, 5.0, 5.0],
                },
                PointLightConfig {
                    color: rgb(0x2196f3),
                    intensity: 0.5,
                    range: 20.0,
                    position: [5.0, 5.0, 5.0],
                },
            ],
        }
    }
}

/// Component, connection and legend geometry settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VisualConfig {
    /// Glow shell size relative to the box
    pub glow_scale: f32,
    /// Glow shell opacity
    pub glow_opacity: f32,
    /// Box edge outline opacity
    pub edge_opacity: f32,
    /// Gap between the box top and the label center
    pub label_offset: f32,
    /// Label plane width
    pub label_width: f32,
    /// Label plane height
    pub label_height: f32,
    /// Segments per connection curve
    pub curve_segments: usize,
    /// Curve control point lift above the higher endpoint
    pub curve_lift: f32,
    /// Particles per connection
    pub particles_per_connection: usize,
    /// Slowest particle speed (curve progress per frame)
    pub particle_min_speed: f32,
    /// Fastest particle speed (exclusive)
    pub particle_max_speed: f32,
    /// Particle sphere radius
    pub particle_radius: f32,
    /// Whether the legend is built
    pub legend_enabled: bool,
    /// Position of the first legend swatch
    pub legend_origin: [f32; 3],
    /// Vertical distance between legend entries
    pub legend_spacing: f32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        use av_core::constants::*;

        Self {
            glow_scale: 1.05,
            glow_opacity: 0.15,
            edge_opacity: 0.6,
            label_offset: 0.8,
            label_width: 3.0,
            label_height: 0.75,
            curve_segments: CURVE_SEGMENTS,
            curve_lift: CURVE_LIFT,
            particles_per_connection: PARTICLES_PER_CONNECTION,
            particle_min_speed: PARTICLE_MIN_SPEED,
            particle_max_speed: PARTICLE_MAX_SPEED,
            particle_radius: 0.05,
            legend_enabled: true,
            legend_origin: [-14.5, 8.0, 0.0],
            legend_spacing: 1.5,
        }
    }
}

/// Complete renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RendererConfig {
    /// Camera settings
    #[serde(default)]
    pub camera: CameraConfig,
    /// Picking settings
    #[serde(default)]
    pub picking: PickingConfig,
    /// Viewport settings
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Grid settings
    #[serde(default)]
    pub grid: GridConfig,
    /// Fog settings
    #[serde(default)]
    pub fog: FogConfig,
    /// Lighting settings
    #[serde(default)]
    pub lighting: LightingConfig,
    /// Visual settings
    #[serde(default)]
    pub visuals: VisualConfig,
}

impl RendererConfig {
    /// Create a new renderer configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Parse configuration from RON text
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but cannot drive the camera
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()
    }

    /// Serialize to pretty RON
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}
