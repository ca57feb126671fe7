//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 3004;

/// Paths to all Touchline data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// SQLite database directory (`data/db/`).
    pub db: PathBuf,
    /// Parser keyword/threshold overrides (`data/parser-config.json`).
    pub parser_config_file: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            db: root.join("db"),
            parser_config_file: root.join("parser-config.json"),
            root,
        };
        std::fs::create_dir_all(&paths.db)?;
        Ok(paths)
    }
}

/// Top-level Touchline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouchlineConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
}

impl TouchlineConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self { port, data_paths })
    }
}
