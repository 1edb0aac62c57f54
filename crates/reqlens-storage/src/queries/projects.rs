//! projects table: CRUD, child counts and the cascading delete.

use chrono::{DateTime, Utc};
use reqlens_core::errors::StorageError;
use reqlens_core::model::{CascadeCounts, NewProject, Project};
use rusqlite::{params, Connection, Row};

use super::{affected, optional};
use crate::errors::sqlite_err;

const COLUMNS: &str = "id, name, description, creator, created_at, updated_at";

fn map_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        creator: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// Insert a project and return it with its new id.
pub fn insert_project(
    conn: &Connection,
    new: &NewProject,
    now: DateTime<Utc>,
) -> Result<Project, StorageError> {
    conn.execute(
        "INSERT INTO projects (name, description, creator, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?4)",
        params![new.name.trim(), new.description, new.creator, now],
    )
    .map_err(sqlite_err)?;
    Ok(Project {
        id: conn.last_insert_rowid(),
        name: new.name.trim().to_string(),
        description: new.description.clone(),
        creator: new.creator.clone(),
        created_at: now,
        updated_at: now,
    })
}

pub fn get_project(conn: &Connection, id: i64) -> Result<Option<Project>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {COLUMNS} FROM projects WHERE id = ?1"))
        .map_err(sqlite_err)?;
    optional(stmt.query_row(params![id], map_row))
}

/// Projects newest first, optionally restricted to one creator.
pub fn list_projects(
    conn: &Connection,
    creator: Option<&str>,
) -> Result<Vec<Project>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ?1 IS NULL OR creator = ?1
             ORDER BY created_at DESC, id DESC"
        ))
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![creator], map_row)
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// Ids of every stored project.
pub fn list_project_ids(conn: &Connection) -> Result<Vec<i64>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT id FROM projects ORDER BY id")
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map([], |row| row.get(0))
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// Stakeholder, requirement and milestone counts for one project.
pub fn child_counts(conn: &Connection, project_id: i64) -> Result<CascadeCounts, StorageError> {
    let count = |table: &str| -> Result<usize, StorageError> {
        let n: i64 = conn
            .query_row(
                &format!("SELECT COUNT(*) FROM {table} WHERE project_id = ?1"),
                params![project_id],
                |row| row.get(0),
            )
            .map_err(sqlite_err)?;
        Ok(n as usize)
    };
    Ok(CascadeCounts {
        stakeholders: count("stakeholders")?,
        requirements: count("requirements")?,
        milestones: count("milestones")?,
    })
}

/// Delete a project and everything that belongs to it. Must run inside a
/// transaction. Requirements of other projects that were assigned to one of
/// the deleted milestones lose that assignment.
pub fn delete_project_cascade(
    conn: &Connection,
    project_id: i64,
) -> Result<CascadeCounts, StorageError> {
    affected(conn.execute(
        "UPDATE requirements SET assigned_milestone_id = NULL
         WHERE assigned_milestone_id IN (SELECT id FROM milestones WHERE project_id = ?1)",
        params![project_id],
    ))?;
    let requirements = affected(conn.execute(
        "DELETE FROM requirements WHERE project_id = ?1",
        params![project_id],
    ))?;
    let milestones = affected(conn.execute(
        "DELETE FROM milestones WHERE project_id = ?1",
        params![project_id],
    ))?;
    let stakeholders = affected(conn.execute(
        "DELETE FROM stakeholders WHERE project_id = ?1",
        params![project_id],
    ))?;
    let deleted = affected(conn.execute(
        "DELETE FROM projects WHERE id = ?1",
        params![project_id],
    ))?;
    if deleted == 0 {
        return Err(StorageError::not_found("project", project_id));
    }
    Ok(CascadeCounts {
        stakeholders,
        requirements,
        milestones,
    })
}
