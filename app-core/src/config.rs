//! # App Configuration
//!
//! Desktop settings read from a single YAML file `config.yaml` inside the
//! platform config directory (`~/.config/my-finance/` on Linux).
//!
//! ## YAML Format
//!
//! ```yaml
//! window:
//!   title: "My Finance"
//!   width: 900.0
//!   height: 640.0
//! add_goal_title: "New Goal"
//! log_filter: "info"
//! simulated_latency_ms: 300
//! ```
//!
//! Every key is optional; missing keys take their default. A missing file
//! means "all defaults".

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIRECTORY: &str = "my-finance";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "My Finance".to_string(),
            width: 900.0,
            height: 640.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    /// Header of the add-goal screen
    pub add_goal_title: String,
    /// env_logger filter used when RUST_LOG is not set
    pub log_filter: String,
    /// Artificial delay of goal creation in the in-memory store
    pub simulated_latency_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            add_goal_title: "New Goal".to_string(),
            log_filter: "info".to_string(),
            simulated_latency_ms: 300,
        }
    }
}

impl AppConfig {
    /// `<config_dir>/my-finance/config.yaml`, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIRECTORY).join(CONFIG_FILE))
    }

    /// Load the config from the default location, falling back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                info!("No platform config directory; using default config");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No config file at {:?}; using defaults", path);
            return Ok(Self::default());
        }

        let yaml_content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = serde_yaml::from_str(&yaml_content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {:?}: {:?}", path, config);
        Ok(config)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}
