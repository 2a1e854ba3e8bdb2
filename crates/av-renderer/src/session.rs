//! Diagram session
//!
//! Owns every piece of mutable per-session state: the camera, the orbit
//! controls, the scene and the selection. Hosts feed it input events and
//! call [`DiagramSession::tick`] once per frame before rendering.

use std::collections::{HashMap, VecDeque};

use glam::Vec2;

use av_core::{TopologyError, TopologySource};

use crate::camera::Camera;
use crate::config::{MissPolicy, RendererConfig};
use crate::input::InputEvent;
use crate::orbit::OrbitController;
use crate::picking::{ClickOutcome, PickError, PickRegistry, PickSelector};
use crate::scene::{
    BoxVisualFactory, ConnectionVisual, Fog, GridVisual, LegendVisual, Light, ObjectId, RingVisual,
    Scene, SceneObject, SceneRenderer, VisualFactory,
};

/// Session errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// The topology could not be used
    #[error(transparent)]
    Topology(#[from] TopologyError),
    /// Component names collide
    #[error(transparent)]
    Pick(#[from] PickError),
}

/// Interactive diagram state
pub struct DiagramSession {
    config: RendererConfig,
    camera: Camera,
    controls: OrbitController,
    scene: Scene,
    selector: PickSelector,
    components: HashMap<String, ObjectId>,
    events: VecDeque<InputEvent>,
}

impl DiagramSession {
    /// Create an empty session for a viewport of the given size
    pub fn new(config: RendererConfig, width: f32, height: f32) -> Self {
        let mut camera = Camera::new(&config.camera, width, height);
        let controls = OrbitController::new(&config.camera, &mut camera);
        let selector = PickSelector::new(PickRegistry::new(), config.picking.miss_policy);

        Self {
            config,
            camera,
            controls,
            scene: Scene::new(),
            selector,
            components: HashMap::new(),
            events: VecDeque::new(),
        }
    }

    /// Create a session and build it from `source` with the default box visuals
    pub fn with_topology(
        config: RendererConfig,
        width: f32,
        height: f32,
        source: &dyn TopologySource,
    ) -> Result<Self, SessionError> {
        let factory = BoxVisualFactory::new(config.visuals.clone(), config.picking.default_opacity);
        let mut session = Self::new(config, width, height);
        session.build(source, &factory)?;
        Ok(session)
    }

    /// Replace the scene and pick registry with the contents of `source`.
    ///
    /// On error the previous scene is kept.
    pub fn build(
        &mut self,
        source: &dyn TopologySource,
        factory: &dyn VisualFactory,
    ) -> Result<(), SessionError> {
        let mut scene = Scene::new();
        scene.lights = Light::from_config(&self.config.lighting);
        scene.fog = Fog::from_config(&self.config.fog);
        scene.background = self.config.viewport.background_color;

        if self.config.grid.enabled {
            scene.add_object(SceneObject::Grid(GridVisual::from_config(&self.config.grid)));
            for ring in RingVisual::from_config(&self.config.grid) {
                scene.add_object(SceneObject::Ring(ring));
            }
        }

        for (seed, resolved) in source.resolved_connections().iter().enumerate() {
            let visual = ConnectionVisual::new(resolved, &self.config.visuals, seed);
            scene.add_object(SceneObject::Connection(visual));
        }

        let mut registry = PickRegistry::new();
        let mut components = HashMap::new();
        for descriptor in source.components() {
            let visual = factory.build_visual(descriptor);
            registry.register(descriptor.name.clone(), visual.bounds())?;
            let id = scene.add_object(SceneObject::Component(visual));
            components.insert(descriptor.name.clone(), id);
        }

        if self.config.visuals.legend_enabled {
            scene.add_object(SceneObject::Legend(LegendVisual::from_config(
                &self.config.visuals,
            )));
        }

        tracing::debug!(
            "Built diagram: {} components, {} connections, {} scene objects",
            components.len(),
            scene.connections().count(),
            scene.len()
        );

        self.scene = scene;
        self.components = components;
        self.selector = PickSelector::new(registry, self.selector.miss_policy());
        self.apply_selection_visuals();
        Ok(())
    }

    /// Active configuration
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Current camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Orbit controls
    pub fn controls(&self) -> &OrbitController {
        &self.controls
    }

    /// Scene contents
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Selection state
    pub fn selector(&self) -> &PickSelector {
        &self.selector
    }

    /// Scene handle of a component
    pub fn component_handle(&self, name: &str) -> Option<ObjectId> {
        self.components.get(name).copied()
    }

    /// Name of the selected component
    pub fn selected(&self) -> Option<&str> {
        self.selector.selected_id()
    }

    /// Queue an event for the next [`tick`](Self::tick)
    pub fn push_event(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Number of queued events
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Apply one event immediately
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { pos, .. } => self.controls.drag_start(pos),
            InputEvent::PointerMove { pos, buttons } => {
                self.controls.drag_move(pos, buttons, &mut self.camera)
            }
            InputEvent::PointerUp => self.controls.drag_end(),
            InputEvent::Wheel { delta_y } => self.controls.wheel(delta_y, &mut self.camera),
            InputEvent::Click { pos } => self.click(pos),
            InputEvent::Resize { width, height } => self.camera.resize(width, height),
        }
    }

    /// Per-frame update: drain queued events in order, then animate
    pub fn tick(&mut self) {
        while let Some(event) = self.events.pop_front() {
            self.handle_event(event);
        }
        self.controls.tick();

        for (_, object) in self.scene.iter_mut() {
            if let SceneObject::Connection(connection) = object {
                connection.advance();
            }
        }
    }

    /// Draw the current frame
    pub fn render(&self, renderer: &mut dyn SceneRenderer) {
        renderer.render(&self.scene, &self.camera);
    }

    /// Select a component by name; unknown names are ignored
    pub fn select_by_name(&mut self, name: &str) -> bool {
        let changed = self.selector.select(name);
        if changed {
            self.log_selection();
            self.apply_selection_visuals();
        }
        changed
    }

    /// Deselect everything
    pub fn clear_selection(&mut self) {
        self.selector.clear_selection();
        self.apply_selection_visuals();
    }

    /// What a click on empty space does
    pub fn miss_policy(&self) -> MissPolicy {
        self.selector.miss_policy()
    }

    /// Change what a click on empty space does
    pub fn set_miss_policy(&mut self, policy: MissPolicy) {
        self.selector.set_miss_policy(policy);
    }

    /// Return the camera to its configured pose
    pub fn reset_camera(&mut self) {
        self.controls.reset(&self.config.camera, &mut self.camera);
    }

    fn click(&mut self, pos: Vec2) {
        match self.selector.click(pos, &self.camera) {
            ClickOutcome::Selected(_) => {
                self.log_selection();
                self.apply_selection_visuals();
            }
            ClickOutcome::Cleared => {
                tracing::info!("Selection cleared");
                self.apply_selection_visuals();
            }
            ClickOutcome::Unchanged => {}
        }
    }

    fn log_selection(&self) {
        let Some(name) = self.selector.selected_id() else {
            return;
        };
        let kind = self
            .component_handle(name)
            .and_then(|id| self.scene.get(id))
            .and_then(|object| match object {
                SceneObject::Component(c) => Some(c.kind.as_str()),
                _ => None,
            })
            .unwrap_or("unknown");
        tracing::info!("Selected: {} ({})", name, kind);
    }

    /// Reset every component opacity, then highlight the selection
    fn apply_selection_visuals(&mut self) {
        let picking = &self.config.picking;
        let selected = self.selector.selected_id();

        for (_, object) in self.scene.iter_mut() {
            let SceneObject::Component(component) = object else {
                continue;
            };
            component.opacity = match selected {
                None => picking.default_opacity,
                Some(name) if name == component.name => picking.selected_opacity,
                Some(_) => picking.unselected_opacity,
            };
        }
    }
}
