//! Classification of rusqlite failures into `StorageError`.

use reqlens_core::errors::StorageError;
use rusqlite::ErrorCode;

/// Lock contention that outlasted the busy timeout becomes
/// `StorageError::Busy`; everything else is a generic SQLite error.
pub(crate) fn sqlite_err(e: rusqlite::Error) -> StorageError {
    match e.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => StorageError::Busy {
            message: e.to_string(),
        },
        _ => StorageError::sqlite(e),
    }
}
