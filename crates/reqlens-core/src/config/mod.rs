//! Configuration system for reqlens.
//! TOML-based, layered resolution: CLI > env > project file > defaults.

pub mod logging_config;
pub mod reqlens_config;
pub mod server_config;
pub mod storage_config;

pub use logging_config::LoggingConfig;
pub use reqlens_config::{CliOverrides, ReqlensConfig};
pub use server_config::ServerConfig;
pub use storage_config::StorageConfig;
