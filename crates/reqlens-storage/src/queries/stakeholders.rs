//! stakeholders table.

use reqlens_core::errors::StorageError;
use reqlens_core::model::Stakeholder;
use rusqlite::{params, Connection, Row};

use super::{affected, optional};
use crate::errors::sqlite_err;

const COLUMNS: &str = "id, project_id, name, role, influence, interest, requirements, \
                       contact_info, notes, created_at, updated_at";

fn map_row(row: &Row<'_>) -> rusqlite::Result<Stakeholder> {
    Ok(Stakeholder {
        id: row.get(0)?,
        project_id: row.get(1)?,
        name: row.get(2)?,
        role: row.get(3)?,
        influence: row.get(4)?,
        interest: row.get(5)?,
        requirements: row.get(6)?,
        contact_info: row.get(7)?,
        notes: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

/// Insert a stakeholder and return its new id. `s.id` is ignored.
pub fn insert_stakeholder(conn: &Connection, s: &Stakeholder) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO stakeholders
           (project_id, name, role, influence, interest, requirements, contact_info, notes,
            created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            s.project_id,
            s.name,
            s.role,
            s.influence,
            s.interest,
            s.requirements,
            s.contact_info,
            s.notes,
            s.created_at,
            s.updated_at,
        ],
    )
    .map_err(sqlite_err)?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite every mutable column of an existing stakeholder.
pub fn update_stakeholder(conn: &Connection, s: &Stakeholder) -> Result<(), StorageError> {
    let n = affected(conn.execute(
        "UPDATE stakeholders SET
           name = ?2, role = ?3, influence = ?4, interest = ?5, requirements = ?6,
           contact_info = ?7, notes = ?8, updated_at = ?9
         WHERE id = ?1",
        params![
            s.id,
            s.name,
            s.role,
            s.influence,
            s.interest,
            s.requirements,
            s.contact_info,
            s.notes,
            s.updated_at,
        ],
    ))?;
    if n == 0 {
        return Err(StorageError::not_found("stakeholder", s.id));
    }
    Ok(())
}

/// A stakeholder, only if it belongs to `project_id`.
pub fn get_stakeholder(
    conn: &Connection,
    project_id: i64,
    id: i64,
) -> Result<Option<Stakeholder>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM stakeholders WHERE id = ?1 AND project_id = ?2"
        ))
        .map_err(sqlite_err)?;
    optional(stmt.query_row(params![id, project_id], map_row))
}

pub fn list_stakeholders(
    conn: &Connection,
    project_id: i64,
) -> Result<Vec<Stakeholder>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM stakeholders WHERE project_id = ?1 ORDER BY id"
        ))
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![project_id], map_row)
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// Returns true if a row was deleted.
pub fn delete_stakeholder(
    conn: &Connection,
    project_id: i64,
    id: i64,
) -> Result<bool, StorageError> {
    let n = affected(conn.execute(
        "DELETE FROM stakeholders WHERE id = ?1 AND project_id = ?2",
        params![id, project_id],
    ))?;
    Ok(n > 0)
}
