//! ReadPool: read-only connections handed out to concurrent readers.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, TryLockError};

use reqlens_core::errors::StorageError;
use rusqlite::{Connection, OpenFlags};

use super::pragmas::apply_read_pragmas;
use crate::errors::sqlite_err;

const MAX_POOL_SIZE: usize = 8;

/// Read-only SQLite connections. A reader takes the first idle connection
/// after a rotating cursor and only waits when every connection is busy.
pub struct ReadPool {
    slots: Vec<Mutex<Connection>>,
    cursor: AtomicUsize,
}

impl ReadPool {
    /// Open `pool_size` read-only connections (clamped to 1..=8) to an
    /// existing database file.
    pub fn open(path: &Path, pool_size: usize) -> Result<Self, StorageError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let slots = (0..pool_size.clamp(1, MAX_POOL_SIZE))
            .map(|_| {
                let conn = Connection::open_with_flags(path, flags).map_err(sqlite_err)?;
                apply_read_pragmas(&conn)?;
                Ok(Mutex::new(conn))
            })
            .collect::<Result<Vec<_>, StorageError>>()?;
        Ok(Self {
            slots,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Run `f` on an idle reader, or wait on the cursor's reader if none is idle.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let start = self.cursor.fetch_add(1, Ordering::Relaxed);
        let guard = self.idle_slot(start).unwrap_or_else(|| self.wait_for(start));
        f(&guard)
    }

    fn idle_slot(&self, start: usize) -> Option<MutexGuard<'_, Connection>> {
        let len = self.slots.len();
        (0..len).find_map(|offset| {
            let slot = &self.slots[(start + offset) % len];
            match slot.try_lock() {
                Ok(guard) => Some(guard),
                Err(TryLockError::Poisoned(poisoned)) => Some(recover(slot, poisoned.into_inner())),
                Err(TryLockError::WouldBlock) => None,
            }
        })
    }

    fn wait_for(&self, start: usize) -> MutexGuard<'_, Connection> {
        let slot = &self.slots[start % self.slots.len()];
        match slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => recover(slot, poisoned.into_inner()),
        }
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }
}

/// Readers never hold a transaction, so a poisoned reader is safe to reuse.
fn recover<'a>(
    slot: &Mutex<Connection>,
    guard: MutexGuard<'a, Connection>,
) -> MutexGuard<'a, Connection> {
    tracing::warn!("read connection lock was poisoned, recovering");
    slot.clear_poison();
    guard
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use tempfile::tempdir;

    use super::*;

    fn pool(size: usize) -> (tempfile::TempDir, ReadPool) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pool.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE t (v INTEGER); INSERT INTO t VALUES (7);")
            .unwrap();
        let pool = ReadPool::open(&path, size).unwrap();
        (dir, pool)
    }

    fn read(pool: &ReadPool) -> i64 {
        pool.with_conn(|conn| {
            conn.query_row("SELECT v FROM t", [], |row| row.get(0))
                .map_err(sqlite_err)
        })
        .unwrap()
    }

    #[test]
    fn size_is_clamped() {
        assert_eq!(pool(0).1.size(), 1);
        assert_eq!(pool(50).1.size(), MAX_POOL_SIZE);
    }

    #[test]
    fn busy_readers_are_skipped() {
        let (_dir, pool) = pool(2);
        let _held = pool.slots[0].lock().unwrap();
        for _ in 0..4 {
            assert_eq!(read(&pool), 7);
        }
    }

    #[test]
    fn poisoned_reader_is_reused() {
        let (_dir, pool) = pool(1);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = pool.slots[0].lock().unwrap();
            panic!("reader blew up");
        }));
        assert!(result.is_err());
        assert!(pool.slots[0].is_poisoned());

        assert_eq!(read(&pool), 7);
        assert!(!pool.slots[0].is_poisoned());
    }
}
