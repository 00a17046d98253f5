//! World configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! `#[derive(Serialize, Deserialize)]` generates the TOML conversion;
//! `#[serde(default)]` fills missing fields from `Default`, so a config
//! file only needs to mention what it changes.
//!
//! ```toml
//! [world]
//! event_capacity = 64
//!
//! [[entries]]
//! path = "notes"
//! kind = "directory"
//!
//! [[entries]]
//! path = "notes/todo.txt"
//! content = "buy milk\ncall bob"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main world configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Runtime settings
    pub world: WorldConfig,

    /// Items created under the root when bootstrapping
    pub entries: Vec<EntryConfig>,
}

impl Config {
    /// Loads config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from_default_path().unwrap_or_default()
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("textworld").join("config.toml"))
    }

    /// Saves the config to a file, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Events buffered per subscriber before it starts lagging
    pub event_capacity: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            event_capacity: 256,
        }
    }
}

/// One item to create at bootstrap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryConfig {
    /// Slash-separated path from the root; missing directories are created
    pub path: String,

    /// Item kind
    #[serde(default)]
    pub kind: EntryKind,

    /// File content, lines separated by `\n`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl EntryConfig {
    /// A directory entry.
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
            content: None,
        }
    }

    /// A file entry with content.
    pub fn file(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            content: Some(content.into()),
        }
    }
}

/// Kind of a bootstrap entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    #[default]
    File,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
