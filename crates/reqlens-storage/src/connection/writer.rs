//! Write connection utilities: BEGIN IMMEDIATE transactions.

use reqlens_core::errors::StorageError;
use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::errors::sqlite_err;

/// Execute a write operation inside a BEGIN IMMEDIATE transaction.
/// The write lock is taken at transaction start; any error rolls back.
/// Failing to get that lock within the busy timeout is `StorageError::Busy`.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> Result<T, StorageError>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, StorageError>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate).map_err(sqlite_err)?;
    let result = f(&tx)?;
    tx.commit().map_err(sqlite_err)?;
    Ok(result)
}
