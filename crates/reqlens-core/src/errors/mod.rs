//! Error handling for reqlens.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod service_error;
pub mod storage_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use error_code::ReqErrorCode;
pub use service_error::ServiceError;
pub use storage_error::StorageError;
pub use validation_error::ValidationError;
