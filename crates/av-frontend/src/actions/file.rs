//! Topology file action handlers

use std::path::PathBuf;

use av_core::{Topology, TopologyError};

use crate::state::{AppAction, SharedAppState};

/// Handle topology loading actions
pub fn handle_file_action(action: AppAction, app_state: &SharedAppState) {
    match action {
        AppAction::LoadTopology(path) => handle_load_topology(path, app_state),
        AppAction::LoadTopologyBytes { name, data } => {
            handle_load_topology_bytes(name, data, app_state)
        }
        AppAction::LoadBuiltin => apply(Ok(Topology::builtin()), None, app_state),
        _ => {}
    }
}

fn handle_load_topology(path: PathBuf, app_state: &SharedAppState) {
    let result = Topology::load(&path);
    apply(result, Some(path), app_state);
}

fn handle_load_topology_bytes(name: String, data: Vec<u8>, app_state: &SharedAppState) {
    let result = String::from_utf8(data)
        .map_err(|e| TopologyError::Deserialize(e.to_string()))
        .and_then(|content| Topology::from_ron_str(&content));
    apply(result, Some(PathBuf::from(name)), app_state);
}

fn apply(
    result: Result<Topology, TopologyError>,
    path: Option<PathBuf>,
    app_state: &SharedAppState,
) {
    let label = path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in diagram".to_string());

    let mut state = app_state.lock();
    let result = result
        .map_err(Into::into)
        .and_then(|topology| state.set_topology(topology, path));

    if let Err(e) = result {
        tracing::error!("Failed to load {}: {}", label, e);
        state.last_error = Some(format!("Failed to load {}: {}", label, e));
    }
}
