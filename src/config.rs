//! Wrap configuration persistence
//!
//! Library embedders pass the config file location explicitly; missing or
//! malformed files fall back to defaults rather than failing layout.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::util::text::TABULATOR_WIDTH;

/// Soft-wrap settings that persist across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapConfig {
    /// Tab stop width in columns
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,
    /// Whether soft wrapping starts enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Lower bound on the column budget, so a sliver of a viewport still
    /// makes wrapping progress
    #[serde(default = "default_min_wrap_columns")]
    pub min_wrap_columns: usize,
}

fn default_tab_width() -> usize {
    TABULATOR_WIDTH
}

fn default_enabled() -> bool {
    true
}

fn default_min_wrap_columns() -> usize {
    1
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            tab_width: default_tab_width(),
            enabled: default_enabled(),
            min_wrap_columns: default_min_wrap_columns(),
        }
    }
}

impl WrapConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WrapConfig::default();
        assert_eq!(config.tab_width, 4);
        assert!(config.enabled);
        assert_eq!(config.min_wrap_columns, 1);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = WrapConfig::load(&dir.path().join("missing.yaml"));
        assert_eq!(config, WrapConfig::default());
    }

    #[test]
    fn test_malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "tab_width: [not a number").unwrap();
        assert_eq!(WrapConfig::load(&path), WrapConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = WrapConfig {
            tab_width: 8,
            enabled: false,
            min_wrap_columns: 2,
        };
        config.save(&path).unwrap();
        assert_eq!(WrapConfig::load(&path), config);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "tab_width: 2\n").unwrap();

        let config = WrapConfig::load(&path);
        assert_eq!(config.tab_width, 2);
        assert!(config.enabled);
    }
}
