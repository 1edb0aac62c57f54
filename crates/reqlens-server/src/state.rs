//! Shared application state.

use std::sync::Arc;

use reqlens_core::errors::ReqErrorCode;
use reqlens_core::events::ErrorEvent;
use reqlens_storage::ReqStorageEngine;

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    engine: Arc<ReqStorageEngine>,
}

impl AppState {
    pub fn new(engine: ReqStorageEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Run a blocking storage call off the async executor.
    /// Server-side failures are also reported through the event dispatcher.
    pub async fn run<F, T, E>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&ReqStorageEngine) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Into<ApiError> + Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        let task = tokio::task::spawn_blocking(move || -> Result<T, ApiError> {
            f(engine.as_ref()).map_err(Into::into)
        });
        let result = task
            .await
            .map_err(|e| ApiError::Internal(format!("storage task failed: {e}")))
            .and_then(|inner| inner);

        if let Err(ref e) = result {
            if e.is_server_error() {
                self.engine.events().emit_error(&ErrorEvent {
                    message: e.to_string(),
                    error_code: e.error_code().to_string(),
                });
            }
        }
        result
    }
}
