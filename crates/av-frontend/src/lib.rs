//! Architecture Diagram Viewer
//!
//! egui application hosting an interactive 3D architecture diagram: orbit
//! the camera with the mouse, click components to select them.

pub mod actions;
pub mod app;
pub mod config;
pub mod panels;
pub mod render;
pub mod state;
pub mod theme;

// Re-exports for convenience
pub use app::ArchVizApp;
pub use config::AppConfig;
pub use state::{AppAction, AppState, SharedAppState};
