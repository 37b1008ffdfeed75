// ABOUTME: YAML session configuration model for muxdev
// Defines the session -> windows -> panes tree and loads it from disk

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse session YAML: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// One pane within a window, in declared order.
///
/// The `horizontal` flag decides how this pane is split off from the
/// previous one: `true` gives a side-by-side split, `false` a stacked one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaneConfig {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub cmd: String,
    #[serde(default)]
    pub horizontal: bool,
}

/// One window within a session.
///
/// When `panes` is non-empty, the window-level `path` and `cmd` are ignored;
/// the first pane's path becomes the window's launch directory and commands
/// are injected per pane.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowConfig {
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub cmd: String,
    #[serde(default)]
    pub panes: Vec<PaneConfig>,
}

impl WindowConfig {
    pub fn has_panes(&self) -> bool {
        !self.panes.is_empty()
    }
}

/// Top-level session description decoded from the YAML config file.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub name: String,
    #[serde(default)]
    pub root: String,
    #[serde(default)]
    pub windows: Vec<WindowConfig>,
}

impl SessionConfig {
    /// Load and decode a session config from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Ok(serde_yaml_ng::from_str(&data)?)
    }
}
