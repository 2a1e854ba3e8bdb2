//! Architecture Diagram Renderer
//!
//! Camera, input and selection logic for the interactive diagram, kept free
//! of any windowing or GPU dependency so it can be driven by any host.
//!
//! # Architecture
//!
//! - [`session::DiagramSession`] - Owns all per-session state and consumes input events
//! - [`orbit::OrbitController`] - Spherical orbit camera driven by pointer and wheel
//! - [`picking::PickSelector`] - Ray picking and single selection
//! - [`scene::Scene`] - Retained scene drawn through [`scene::SceneRenderer`]
//!
//! # Module Structure
//!
//! ```text
//! av-renderer/
//! ├── camera.rs        # Perspective camera and screen/world projection
//! ├── config.rs        # Renderer configuration (RON)
//! ├── input.rs         # Host-independent input events
//! ├── orbit.rs         # Orbit controls
//! ├── picking.rs       # Pick registry and selector
//! ├── ray.rs           # Rays
//! ├── scene/           # Scene graph, bounds, visual factory
//! └── session.rs       # Diagram session
//! ```

pub mod camera;
pub mod config;
pub mod input;
pub mod orbit;
pub mod picking;
pub mod ray;
pub mod scene;
pub mod session;

pub use camera::Camera;
pub use config::{ConfigError, MissPolicy, RendererConfig};
pub use input::{InputEvent, PointerButtons};
pub use orbit::{OrbitController, OrbitState, PointerDragState};
pub use picking::{ClickOutcome, PickError, PickRegistry, PickSelector, Pickable};
pub use ray::Ray;
pub use scene::{
    BoundingBox, BoxVisualFactory, ComponentVisual, ConnectionVisual, ObjectId, Scene,
    SceneObject, SceneRenderer, VisualFactory,
};
pub use session::{DiagramSession, SessionError};
