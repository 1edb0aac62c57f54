//! File-backed persistence: data survives reopen, WAL is on, reads come from
//! the pool, and migrations are idempotent.

use reqlens_core::errors::ReqErrorCode;
use reqlens_core::model::{NewProject, NewRequirement};
use reqlens_storage::connection::pragmas;
use reqlens_storage::migrations::{self, LATEST_VERSION};
use reqlens_storage::ReqStorageEngine;
use rusqlite::Connection;
use serde_json::json;
use tempfile::tempdir;

#[test]
fn data_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("requirements.db");

    let (pid, rid) = {
        let engine = ReqStorageEngine::open(&path, 2).unwrap();
        let new: NewProject = serde_json::from_value(json!({ "name": "Portal" })).unwrap();
        let pid = engine.create_project(&new).unwrap().id;
        let r: NewRequirement = serde_json::from_value(json!({
            "title": "Login",
            "smart_timebound": "2025-03-31",
        }))
        .unwrap();
        (pid, engine.create_requirement(pid, r).unwrap().id)
    };

    let engine = ReqStorageEngine::open(&path, 2).unwrap();
    assert_eq!(engine.get_project(pid).unwrap().name, "Portal");
    let r = engine.get_requirement(rid).unwrap();
    assert_eq!(r.title, "Login");
    assert_eq!(
        r.analysis.smart.smart_timebound.map(|d| d.to_string()).as_deref(),
        Some("2025-03-31")
    );
    assert_eq!(engine.schema_version().unwrap(), LATEST_VERSION);
}

#[test]
fn file_database_uses_wal_and_read_pool() {
    let dir = tempdir().unwrap();
    let engine = ReqStorageEngine::open(&dir.path().join("wal.db"), 3).unwrap();
    assert_eq!(engine.db().reader_count(), 3);
    let wal = engine.db().with_writer(pragmas::verify_wal_mode).unwrap();
    assert!(wal);
    let fk = engine.db().with_writer(pragmas::foreign_keys_enabled).unwrap();
    assert!(fk);

    // Writes are visible to pooled readers once committed.
    let new: NewProject = serde_json::from_value(json!({ "name": "Visible" })).unwrap();
    engine.create_project(&new).unwrap();
    for _ in 0..3 {
        assert_eq!(engine.list_projects(None).unwrap().len(), 1);
    }
}

#[test]
fn readers_reject_writes() {
    let dir = tempdir().unwrap();
    let engine = ReqStorageEngine::open(&dir.path().join("ro.db"), 1).unwrap();
    let result = engine.db().with_reader(|conn| {
        conn.execute(
            "INSERT INTO projects (name, created_at, updated_at) VALUES ('x', 'now', 'now')",
            [],
        )
        .map_err(reqlens_core::StorageError::sqlite)
    });
    assert!(result.is_err());
}

#[test]
fn in_memory_has_no_pool() {
    let engine = ReqStorageEngine::open_in_memory().unwrap();
    assert_eq!(engine.db().reader_count(), 0);
    assert!(engine.db().path().is_none());
}

#[test]
fn migrations_are_idempotent() {
    let conn = Connection::open_in_memory().unwrap();
    migrations::run_migrations(&conn).unwrap();
    migrations::run_migrations(&conn).unwrap();
    assert_eq!(migrations::current_version(&conn).unwrap(), LATEST_VERSION);
}

#[test]
fn stakeholder_requires_existing_project_row() {
    let conn = Connection::open_in_memory().unwrap();
    pragmas::apply_pragmas(&conn).unwrap();
    migrations::run_migrations(&conn).unwrap();
    let result = conn.execute(
        "INSERT INTO stakeholders (project_id, name, created_at, updated_at) \
         VALUES (5, 'x', 'now', 'now')",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn write_blocked_past_busy_timeout_reports_busy() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("busy.db");
    let engine = ReqStorageEngine::open(&path, 1).unwrap();
    let new: NewProject = serde_json::from_value(json!({ "name": "Portal" })).unwrap();

    let other = Connection::open(&path).unwrap();
    other.execute_batch("BEGIN IMMEDIATE;").unwrap();
    let err = engine.create_project(&new).unwrap_err();
    assert_eq!(err.error_code(), "DB_BUSY");

    other.execute_batch("ROLLBACK;").unwrap();
    engine.create_project(&new).unwrap();
}
