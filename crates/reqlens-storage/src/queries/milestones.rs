//! milestones table. The requirement id list is stored comma-joined.

use chrono::{DateTime, Utc};
use reqlens_core::errors::StorageError;
use reqlens_core::idlist::{join_ids, split_ids};
use reqlens_core::model::Milestone;
use rusqlite::{params, Connection, Row};

use super::{affected, optional};
use crate::errors::sqlite_err;

const COLUMNS: &str = "id, project_id, title, description, deadline, status, requirements, \
                       created_at, updated_at";

fn map_row(row: &Row<'_>) -> rusqlite::Result<Milestone> {
    let ids: String = row.get(6)?;
    Ok(Milestone {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        deadline: row.get(4)?,
        status: row.get(5)?,
        requirements: split_ids(&ids),
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

/// Insert a milestone and return its new id. `m.id` is ignored.
pub fn insert_milestone(conn: &Connection, m: &Milestone) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO milestones
           (project_id, title, description, deadline, status, requirements, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            m.project_id,
            m.title,
            m.description,
            m.deadline,
            m.status,
            join_ids(&m.requirements),
            m.created_at,
            m.updated_at,
        ],
    )
    .map_err(sqlite_err)?;
    Ok(conn.last_insert_rowid())
}

pub fn update_milestone(conn: &Connection, m: &Milestone) -> Result<(), StorageError> {
    let n = affected(conn.execute(
        "UPDATE milestones SET
           title = ?2, description = ?3, deadline = ?4, status = ?5, requirements = ?6,
           updated_at = ?7
         WHERE id = ?1",
        params![
            m.id,
            m.title,
            m.description,
            m.deadline,
            m.status,
            join_ids(&m.requirements),
            m.updated_at,
        ],
    ))?;
    if n == 0 {
        return Err(StorageError::not_found("milestone", m.id));
    }
    Ok(())
}

/// Replace only the requirement id list.
pub fn set_requirement_ids(
    conn: &Connection,
    id: i64,
    ids: &[i64],
    now: DateTime<Utc>,
) -> Result<(), StorageError> {
    let n = affected(conn.execute(
        "UPDATE milestones SET requirements = ?2, updated_at = ?3 WHERE id = ?1",
        params![id, join_ids(ids), now],
    ))?;
    if n == 0 {
        return Err(StorageError::not_found("milestone", id));
    }
    Ok(())
}

pub fn get_milestone(conn: &Connection, id: i64) -> Result<Option<Milestone>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {COLUMNS} FROM milestones WHERE id = ?1"))
        .map_err(sqlite_err)?;
    optional(stmt.query_row(params![id], map_row))
}

/// Milestones of a project by deadline, undated ones last.
pub fn list_milestones(conn: &Connection, project_id: i64) -> Result<Vec<Milestone>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM milestones WHERE project_id = ?1
             ORDER BY deadline IS NULL, deadline, id"
        ))
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![project_id], map_row)
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// Delete a milestone and clear every requirement assignment pointing at it.
/// Must run inside a transaction. Returns true if a row was deleted.
pub fn delete_milestone(conn: &Connection, id: i64) -> Result<bool, StorageError> {
    affected(conn.execute(
        "UPDATE requirements SET assigned_milestone_id = NULL WHERE assigned_milestone_id = ?1",
        params![id],
    ))?;
    let n = affected(conn.execute("DELETE FROM milestones WHERE id = ?1", params![id]))?;
    Ok(n > 0)
}
