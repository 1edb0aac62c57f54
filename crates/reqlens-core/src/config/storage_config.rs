//! Storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_DB_PATH: &str = "requirements_analyst.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

/// Configuration for the SQLite database.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path. Default: `requirements_analyst.db`.
    pub db_path: Option<String>,
    /// Number of read-only connections. Default: 4.
    pub read_pool_size: Option<usize>,
}

impl StorageConfig {
    pub fn effective_db_path(&self) -> PathBuf {
        PathBuf::from(self.db_path.as_deref().unwrap_or(DEFAULT_DB_PATH))
    }

    pub fn effective_read_pool_size(&self) -> usize {
        self.read_pool_size.unwrap_or(DEFAULT_READ_POOL_SIZE)
    }
}
