//! Application state module

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use av_core::Topology;
use av_renderer::{DiagramSession, MissPolicy, SessionError};

use crate::config::AppConfig;

/// Viewport size used until the first frame reports the real one
const INITIAL_VIEWPORT: (f32, f32) = (1400.0, 900.0);

/// Actions that can be performed on the app state
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // File actions
    /// Open a topology file (native only)
    LoadTopology(PathBuf),
    /// Open a topology from bytes (WASM)
    LoadTopologyBytes { name: String, data: Vec<u8> },
    /// Go back to the built-in diagram
    LoadBuiltin,

    // Selection actions
    /// Select a component by name
    SelectComponent(String),
    /// Deselect everything
    ClearSelection,
    /// Change what clicking empty space does
    SetMissPolicy(MissPolicy),

    // Camera actions
    /// Return the camera to its configured pose
    ResetCamera,
}

/// Which scene layers the viewport draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub show_grid: bool,
    pub show_rings: bool,
    pub show_legend: bool,
    pub show_labels: bool,
    pub show_particles: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_rings: true,
            show_legend: true,
            show_labels: true,
            show_particles: true,
        }
    }
}

/// Application state
pub struct AppState {
    /// Camera, scene and selection
    pub session: DiagramSession,
    /// Topology currently shown
    pub topology: Topology,
    /// File the topology came from, `None` for the built-in diagram
    pub topology_path: Option<PathBuf>,
    /// Viewport layer toggles
    pub view: ViewOptions,
    /// Last error shown in the status bar
    pub last_error: Option<String>,
    /// Pending actions
    pending_actions: Vec<AppAction>,
}

impl AppState {
    /// Create the state with the built-in diagram
    pub fn new(config: &AppConfig) -> Self {
        let (width, height) = INITIAL_VIEWPORT;
        let topology = Topology::builtin();
        let session =
            match DiagramSession::with_topology(config.renderer.clone(), width, height, &topology)
            {
                Ok(session) => session,
                Err(e) => {
                    tracing::error!("Failed to build built-in diagram: {}", e);
                    DiagramSession::new(config.renderer.clone(), width, height)
                }
            };

        Self {
            session,
            topology,
            topology_path: None,
            view: ViewOptions::default(),
            last_error: None,
            pending_actions: Vec::new(),
        }
    }

    /// Queue an action
    pub fn queue_action(&mut self, action: AppAction) {
        self.pending_actions.push(action);
    }

    /// Take pending actions
    pub fn take_pending_actions(&mut self) -> Vec<AppAction> {
        std::mem::take(&mut self.pending_actions)
    }

    /// Replace the shown topology.
    ///
    /// The topology is validated first; on error nothing changes.
    pub fn set_topology(
        &mut self,
        topology: Topology,
        path: Option<PathBuf>,
    ) -> Result<(), SessionError> {
        topology.validate()?;
        let factory = av_renderer::BoxVisualFactory::new(
            self.session.config().visuals.clone(),
            self.session.config().picking.default_opacity,
        );
        self.session.build(&topology, &factory)?;

        tracing::info!(
            "Showing {} ({} components, {} connections)",
            path.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in diagram".to_string()),
            topology.components.len(),
            topology.connections.len()
        );
        self.topology = topology;
        self.topology_path = path;
        self.last_error = None;
        Ok(())
    }

    /// Window title suffix for the current topology
    pub fn topology_name(&self) -> String {
        self.topology_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Built-in".to_string())
    }
}

pub type SharedAppState = Arc<Mutex<AppState>>;

/// Create a new shared app state
pub fn create_shared_state(config: &AppConfig) -> SharedAppState {
    Arc::new(Mutex::new(AppState::new(config)))
}
