//! HTTP server configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";

/// Configuration for the HTTP listener.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind. Default: `0.0.0.0:5000`.
    pub bind_address: Option<String>,
}

impl ServerConfig {
    pub fn effective_bind_address(&self) -> &str {
        self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS)
    }
}
