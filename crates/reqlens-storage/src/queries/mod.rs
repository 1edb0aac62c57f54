//! Query modules for each domain table.
//!
//! Every function takes a borrowed connection so callers decide whether it
//! runs on the writer, a pooled reader or inside a transaction.

pub mod milestones;
pub mod projects;
pub mod requirements;
pub mod stakeholders;

use reqlens_core::errors::StorageError;

use crate::errors::sqlite_err;

/// Map `QueryReturnedNoRows` to `Ok(None)`.
pub(crate) fn optional<T>(result: rusqlite::Result<T>) -> Result<Option<T>, StorageError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(sqlite_err(e)),
    }
}

/// Rows touched by a statement, as reported by SQLite.
pub(crate) fn affected(result: rusqlite::Result<usize>) -> Result<usize, StorageError> {
    result.map_err(sqlite_err)
}
