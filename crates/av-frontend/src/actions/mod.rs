//! Action handling module
//!
//! Actions are queued in AppState by the menu and panels and processed
//! once per frame, before the viewport is drawn.

mod file;

use crate::state::{AppAction, SharedAppState};

pub use file::handle_file_action;

/// Dispatch an action to the appropriate handler
pub fn dispatch_action(action: AppAction, app_state: &SharedAppState) {
    match action {
        AppAction::LoadTopology(_)
        | AppAction::LoadTopologyBytes { .. }
        | AppAction::LoadBuiltin => {
            handle_file_action(action, app_state);
        }

        AppAction::SelectComponent(name) => {
            if !app_state.lock().session.select_by_name(&name) {
                tracing::warn!("No component named {}", name);
            }
        }
        AppAction::ClearSelection => app_state.lock().session.clear_selection(),
        AppAction::SetMissPolicy(policy) => {
            tracing::debug!("Miss policy: {:?}", policy);
            app_state.lock().session.set_miss_policy(policy);
        }
        AppAction::ResetCamera => app_state.lock().session.reset_camera(),
    }
}
