//! egui painter backend for the diagram scene
//!
//! Projects the retained scene through the session camera and draws it with
//! 2D shapes: boxes become flat-shaded, back-face culled quads, curves become
//! polylines. Everything is sorted back to front so translucent faces blend
//! in a stable order.

use egui::{Align2, Color32, FontId, Pos2, Rect, Shape, Stroke};
use glam::Vec3;

use av_renderer::scene::{GridVisual, LegendVisual, RingVisual};
use av_renderer::{
    BoundingBox, Camera, ComponentVisual, ConnectionVisual, Scene, SceneObject, SceneRenderer,
};

use crate::state::ViewOptions;
use crate::theme::palette;

/// Segments per grid line, so lines crossing the camera plane still draw
const GRID_LINE_SUBDIVISIONS: usize = 8;
/// Segments per ring
const RING_SEGMENTS: usize = 64;
/// Connection line width in pixels
const CONNECTION_WIDTH: f32 = 2.0;
/// Smallest particle radius in pixels
const MIN_PARTICLE_RADIUS: f32 = 1.5;

/// Corner indices and outward normal of each box face
const BOX_FACES: [([usize; 4], Vec3); 6] = [
    ([0, 1, 2, 3], Vec3::NEG_Y),
    ([4, 7, 6, 5], Vec3::Y),
    ([0, 4, 5, 1], Vec3::NEG_Z),
    ([3, 2, 6, 7], Vec3::Z),
    ([0, 3, 7, 4], Vec3::NEG_X),
    ([1, 5, 6, 2], Vec3::X),
];

/// Corner index pairs of the twelve box edges
const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// A shape tagged with its distance from the camera
struct DepthShape {
    depth: f32,
    shape: Shape,
}

/// Text drawn over the geometry
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub pos: Pos2,
    pub text: String,
    pub color: Color32,
    pub align: Align2,
    pub size: f32,
}

/// Projected frame contents
#[derive(Default)]
pub struct ProjectedFrame {
    /// Geometry, back to front
    pub shapes: Vec<Shape>,
    /// Labels, drawn after the geometry
    pub texts: Vec<TextItem>,
}

/// Turns a scene into egui shapes for one viewport rectangle
pub struct ShapeBuilder<'a> {
    scene: &'a Scene,
    camera: &'a Camera,
    rect: Rect,
    view: ViewOptions,
    shapes: Vec<DepthShape>,
    texts: Vec<TextItem>,
}

impl<'a> ShapeBuilder<'a> {
    pub fn new(scene: &'a Scene, camera: &'a Camera, rect: Rect, view: ViewOptions) -> Self {
        Self {
            scene,
            camera,
            rect,
            view,
            shapes: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// Project every visible object
    pub fn build(mut self) -> ProjectedFrame {
        let scene = self.scene;
        for (_, object) in scene.iter() {
            match object {
                SceneObject::Grid(grid) if self.view.show_grid => self.add_grid(grid),
                SceneObject::Ring(ring) if self.view.show_rings => self.add_ring(ring),
                SceneObject::Legend(legend) if self.view.show_legend => self.add_legend(legend),
                SceneObject::Connection(connection) => self.add_connection(connection),
                SceneObject::Component(component) => self.add_component(component),
                _ => {}
            }
        }

        // Far first
        self.shapes.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        ProjectedFrame {
            shapes: self.shapes.into_iter().map(|s| s.shape).collect(),
            texts: self.texts,
        }
    }

    fn project(&self, point: Vec3) -> Option<Pos2> {
        self.camera
            .world_to_screen(point)
            .map(|p| self.rect.min + egui::vec2(p.x, p.y))
    }

    fn depth(&self, point: Vec3) -> f32 {
        self.camera.view_depth(point)
    }

    fn fogged(&self, color: [f32; 4], point: Vec3) -> [f32; 4] {
        match &self.scene.fog {
            Some(fog) => fog.apply(color, self.depth(point)),
            None => color,
        }
    }

    fn push(&mut self, depth: f32, shape: Shape) {
        self.shapes.push(DepthShape { depth, shape });
    }

    fn add_segment(&mut self, a: Vec3, b: Vec3, color: [f32; 4], opacity: f32, width: f32) {
        let (Some(pa), Some(pb)) = (self.project(a), self.project(b)) else {
            return;
        };
        let mid = (a + b) * 0.5;
        let color = palette::rgba(self.fogged(color, mid), opacity);
        self.push(
            self.depth(mid),
            Shape::line_segment([pa, pb], Stroke::new(width, color)),
        );
    }

    fn add_quad(&mut self, corners: [Vec3; 4], fill: Color32) {
        let points: Option<Vec<Pos2>> = corners.iter().map(|&c| self.project(c)).collect();
        let Some(points) = points else {
            return;
        };
        let center = corners.iter().copied().sum::<Vec3>() / 4.0;
        self.push(
            self.depth(center),
            Shape::convex_polygon(points, fill, Stroke::NONE),
        );
    }

    /// Faces of `bounds` facing the camera, lit or flat
    fn add_box(&mut self, bounds: &BoundingBox, color: [f32; 4], opacity: f32, lit: bool) {
        let corners = bounds.corners();
        for (indices, normal) in BOX_FACES {
            let quad = indices.map(|i| corners[i]);
            let center = quad.iter().copied().sum::<Vec3>() / 4.0;
            if normal.dot(self.camera.position - center) <= 0.0 {
                continue;
            }
            let shaded = if lit {
                self.scene.shade(color, center, normal)
            } else {
                color
            };
            let fill = palette::rgba(self.fogged(shaded, center), opacity);
            self.add_quad(quad, fill);
        }
    }

    fn add_grid(&mut self, grid: &GridVisual) {
        for (start, end, is_center) in grid.lines() {
            let color = if is_center {
                grid.center_color
            } else {
                grid.line_color
            };
            for i in 0..GRID_LINE_SUBDIVISIONS {
                let t0 = i as f32 / GRID_LINE_SUBDIVISIONS as f32;
                let t1 = (i + 1) as f32 / GRID_LINE_SUBDIVISIONS as f32;
                self.add_segment(
                    start.lerp(end, t0),
                    start.lerp(end, t1),
                    color,
                    grid.opacity,
                    1.0,
                );
            }
        }
    }

    fn add_ring(&mut self, ring: &RingVisual) {
        let inner = ring.circle(ring.inner_radius, RING_SEGMENTS);
        let outer = ring.circle(ring.outer_radius, RING_SEGMENTS);
        for i in 0..RING_SEGMENTS {
            let quad = [inner[i], outer[i], outer[i + 1], inner[i + 1]];
            let center = quad.iter().copied().sum::<Vec3>() / 4.0;
            let fill = palette::rgba(self.fogged(ring.color, center), ring.opacity);
            self.add_quad(quad, fill);
        }
    }

    fn add_legend(&mut self, legend: &LegendVisual) {
        for entry in &legend.entries {
            let bounds =
                BoundingBox::from_center_size(entry.position, Vec3::splat(legend.swatch_size));
            self.add_box(&bounds, entry.color, 1.0, false);

            let anchor = entry.position + Vec3::X * (legend.swatch_size * 0.5 + 0.4);
            if let Some(pos) = self.project(anchor) {
                self.texts.push(TextItem {
                    pos,
                    text: entry.label.clone(),
                    color: palette::TEXT_PRIMARY,
                    align: Align2::LEFT_CENTER,
                    size: 13.0,
                });
            }
        }
    }

    fn add_connection(&mut self, connection: &ConnectionVisual) {
        for pair in connection.points.windows(2) {
            self.add_segment(
                pair[0],
                pair[1],
                connection.color,
                connection.opacity,
                CONNECTION_WIDTH,
            );
        }

        if !self.view.show_particles {
            return;
        }
        let up = self.camera.up_axis() * connection.particle_radius;
        let positions: Vec<Vec3> = connection.particle_positions().collect();
        for position in positions {
            let (Some(center), Some(edge)) = (self.project(position), self.project(position + up))
            else {
                continue;
            };
            let radius = center.distance(edge).max(MIN_PARTICLE_RADIUS);
            let fill = palette::rgba(self.fogged(connection.color, position), 1.0);
            self.push(
                self.depth(position),
                Shape::circle_filled(center, radius, fill),
            );
        }
    }

    fn add_component(&mut self, component: &ComponentVisual) {
        self.add_box(
            &component.glow_bounds(),
            component.color,
            component.glow_opacity,
            false,
        );
        let bounds = component.bounds();
        self.add_box(&bounds, component.color, component.opacity, true);

        let corners = bounds.corners();
        for (a, b) in BOX_EDGES {
            self.add_segment(corners[a], corners[b], [1.0; 4], component.edge_opacity, 1.0);
        }

        if !self.view.show_labels {
            return;
        }
        let anchor = component.label_position();
        if let Some(pos) = self.project(anchor) {
            let color = palette::rgba(self.fogged([1.0; 4], anchor), 1.0);
            self.texts.push(TextItem {
                pos,
                text: format!("{}\n{}", component.label.title, component.label.caption),
                color,
                align: Align2::CENTER_BOTTOM,
                size: 12.0,
            });
        }
    }
}

/// Draws the scene into an egui painter
pub struct PainterRenderer<'a> {
    painter: &'a egui::Painter,
    rect: Rect,
    view: ViewOptions,
}

impl<'a> PainterRenderer<'a> {
    pub fn new(painter: &'a egui::Painter, rect: Rect, view: ViewOptions) -> Self {
        Self {
            painter,
            rect,
            view,
        }
    }
}

impl SceneRenderer for PainterRenderer<'_> {
    fn render(&mut self, scene: &Scene, camera: &Camera) {
        self.painter
            .rect_filled(self.rect, 0.0, palette::rgba(scene.background, 1.0));

        let frame = ShapeBuilder::new(scene, camera, self.rect, self.view).build();
        self.painter.extend(frame.shapes);
        for text in frame.texts {
            self.painter.text(
                text.pos,
                text.align,
                text.text,
                FontId::proportional(text.size),
                text.color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use av_core::Topology;
    use av_renderer::config::CameraConfig;
    use av_renderer::{DiagramSession, RendererConfig};

    fn session() -> DiagramSession {
        let config = RendererConfig {
            camera: CameraConfig {
                position: [0.0, 4.0, 10.0],
                target: [0.0, 4.0, 0.0],
                ..Default::default()
            },
            ..Default::default()
        };
        DiagramSession::with_topology(config, 800.0, 600.0, &Topology::builtin()).unwrap()
    }

    fn rect() -> Rect {
        Rect::from_min_size(Pos2::new(100.0, 50.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn test_box_faces_point_outwards() {
        let bounds = BoundingBox::from_center_size(Vec3::ZERO, Vec3::ONE);
        let corners = bounds.corners();
        for (indices, normal) in BOX_FACES {
            let center = indices.iter().map(|&i| corners[i]).sum::<Vec3>() / 4.0;
            assert!((center - normal * 0.5).length() < 1e-6);
        }
    }

    #[test]
    fn test_labels_follow_view_options() {
        let session = session();
        let all = ShapeBuilder::new(
            session.scene(),
            session.camera(),
            rect(),
            ViewOptions::default(),
        )
        .build();
        // 19 component labels and 6 legend rows, minus anything behind the camera
        assert!(all.texts.len() > 19);

        let view = ViewOptions {
            show_labels: false,
            show_legend: false,
            ..Default::default()
        };
        let bare = ShapeBuilder::new(session.scene(), session.camera(), rect(), view).build();
        assert!(bare.texts.is_empty());
        assert!(bare.shapes.len() < all.shapes.len());
    }

    #[test]
    fn test_label_is_offset_into_rect() {
        let session = session();
        let view = ViewOptions {
            show_legend: false,
            ..Default::default()
        };
        let frame = ShapeBuilder::new(session.scene(), session.camera(), rect(), view).build();
        let auth = frame
            .texts
            .iter()
            .find(|t| t.text.starts_with("Auth Service"))
            .unwrap();
        // Centered horizontally, above the middle of the viewport
        assert!((auth.pos.x - 500.0).abs() < 1e-3);
        assert!(auth.pos.y < 350.0);
        assert!(auth.text.ends_with("[service]"));
    }

    #[test]
    fn test_particles_toggle() {
        let session = session();
        let view = ViewOptions {
            show_grid: false,
            show_rings: false,
            show_legend: false,
            ..Default::default()
        };
        let with = ShapeBuilder::new(session.scene(), session.camera(), rect(), view).build();
        let without = ShapeBuilder::new(
            session.scene(),
            session.camera(),
            rect(),
            ViewOptions {
                show_particles: false,
                ..view
            },
        )
        .build();
        let circles = |frame: &ProjectedFrame| {
            frame
                .shapes
                .iter()
                .filter(|s| matches!(s, Shape::Circle(_)))
                .count()
        };
        assert_eq!(circles(&without), 0);
        assert!(circles(&with) > 0);
    }
}
