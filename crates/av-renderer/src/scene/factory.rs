//! Builds component visuals from topology descriptors

use av_core::constants::DEFAULT_COLOR;
use av_core::{ComponentDescriptor, parse_hex_color};

use super::ComponentVisual;
use crate::config::VisualConfig;

/// Text label floating above a component
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Main line (component name)
    pub title: String,
    /// Second line, e.g. `[service]`
    pub caption: String,
    /// Gap between the box top and the label center
    pub offset: f32,
    /// Label plane width in world units
    pub width: f32,
    /// Label plane height in world units
    pub height: f32,
}

/// Turns a component descriptor into something drawable
pub trait VisualFactory {
    /// Build the visual for one component
    fn build_visual(&self, descriptor: &ComponentDescriptor) -> ComponentVisual;
}

/// Glowing translucent boxes with a two-line label
#[derive(Debug, Clone)]
pub struct BoxVisualFactory {
    visuals: VisualConfig,
    opacity: f32,
}

impl BoxVisualFactory {
    /// Create a factory; `opacity` is the box opacity before any selection
    pub fn new(visuals: VisualConfig, opacity: f32) -> Self {
        Self { visuals, opacity }
    }
}

impl VisualFactory for BoxVisualFactory {
    fn build_visual(&self, descriptor: &ComponentDescriptor) -> ComponentVisual {
        let color = parse_hex_color(&descriptor.color).unwrap_or_else(|e| {
            tracing::warn!("Component {}: {}", descriptor.name, e);
            DEFAULT_COLOR
        });

        ComponentVisual {
            name: descriptor.name.clone(),
            kind: descriptor.kind,
            position: descriptor.position(),
            size: descriptor.size(),
            color,
            opacity: self.opacity,
            glow_scale: self.visuals.glow_scale,
            glow_opacity: self.visuals.glow_opacity,
            edge_opacity: self.visuals.edge_opacity,
            label: Label {
                title: descriptor.name.clone(),
                caption: format!("[{}]", descriptor.kind),
                offset: self.visuals.label_offset,
                width: self.visuals.label_width,
                height: self.visuals.label_height,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use av_core::ComponentKind;
    use glam::Vec3;

    fn factory() -> BoxVisualFactory {
        BoxVisualFactory::new(VisualConfig::default(), 0.9)
    }

    #[test]
    fn test_build_visual() {
        let descriptor = ComponentDescriptor::new(
            "Auth Service",
            [0.0, 4.0, 0.0],
            "#2196F3",
            [1.8, 1.2, 1.0],
            ComponentKind::Service,
        );
        let visual = factory().build_visual(&descriptor);

        assert_eq!(visual.label.title, "Auth Service");
        assert_eq!(visual.label.caption, "[service]");
        assert_eq!(visual.opacity, 0.9);
        assert_eq!(visual.color, parse_hex_color("#2196F3").unwrap());
        assert!(
            visual
                .label_position()
                .abs_diff_eq(Vec3::new(0.0, 4.0 + 0.6 + 0.8, 0.0), 1e-5)
        );
        assert!(
            visual
                .glow_bounds()
                .size()
                .abs_diff_eq(Vec3::new(1.8, 1.2, 1.0) * 1.05, 1e-5)
        );
    }

    #[test]
    fn test_bad_color_falls_back() {
        let descriptor = ComponentDescriptor::new(
            "Odd",
            [0.0; 3],
            "teal",
            [1.0; 3],
            ComponentKind::Client,
        );
        assert_eq!(factory().build_visual(&descriptor).color, DEFAULT_COLOR);
    }
}
