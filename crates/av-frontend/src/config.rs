//! Application configuration
//!
//! Read once at startup from `archviz.ron` in the working directory
//! (native builds only). A missing file gives the defaults; a malformed
//! one is reported and also gives the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use av_renderer::{ConfigError, RendererConfig};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "archviz.ron";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Camera, picking and scene settings
    pub renderer: RendererConfig,
    /// Topology file to open at startup instead of the built-in diagram
    pub topology: Option<PathBuf>,
}

impl AppConfig {
    /// Parse a configuration from RON text
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        config.renderer.validate()?;
        Ok(config)
    }

    /// Load `path`, falling back to defaults when it is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_ron_str(&content) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Invalid config {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Configuration for this platform
    pub fn startup() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::load_or_default(CONFIG_FILE_NAME)
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use av_renderer::MissPolicy;

    #[test]
    fn test_partial_config() {
        let config = AppConfig::from_ron_str(
            "(renderer: (picking: (miss_policy: ClearSelection)), topology: Some(\"diagram.ron\"))",
        )
        .unwrap();
        assert_eq!(config.renderer.picking.miss_policy, MissPolicy::ClearSelection);
        assert_eq!(config.renderer.camera.fov_degrees, 75.0);
        assert_eq!(config.topology, Some(PathBuf::from("diagram.ron")));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = AppConfig::load_or_default("/nonexistent/archviz.ron");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "(renderer: (camera: oops").unwrap();

        assert_eq!(AppConfig::load_or_default(&path), AppConfig::default());
    }

    #[test]
    fn test_nan_camera_value_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "(renderer: (camera: (polar_epsilon: NaN)))").unwrap();

        assert_eq!(AppConfig::load_or_default(&path), AppConfig::default());
    }
}
