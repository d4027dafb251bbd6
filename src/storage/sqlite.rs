//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the ProjectStore trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{ProjectStore, StorageError, StorageResult};
use crate::storage::{ProjectRecord, StoredProject};
use crate::HarvestError;
use rusqlite::{params, Connection, Row};
use std::path::Path;

const PROJECT_COLUMNS: &str = "id, uuid, name, title, description, url, category, tags, \
     status, is_featured, created_at, updated_at, author_name, target, sort";

/// SQLite-backed project store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens or creates the projects database at the given path
    pub fn new(path: &Path) -> Result<Self, HarvestError> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database, used by tests and throwaway probes
    pub fn new_in_memory() -> Result<Self, HarvestError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn row_to_project(row: &Row<'_>) -> rusqlite::Result<StoredProject> {
        Ok(StoredProject {
            id: row.get(0)?,
            record: ProjectRecord {
                uuid: row.get(1)?,
                name: row.get(2)?,
                title: row.get(3)?,
                description: row.get(4)?,
                url: row.get(5)?,
                category: row.get(6)?,
                tags: row.get(7)?,
                status: row.get(8)?,
                is_featured: row.get(9)?,
                created_at: row.get(10)?,
                updated_at: row.get(11)?,
                author_name: row.get(12)?,
                target: row.get(13)?,
                sort: row.get(14)?,
            },
        })
    }

    fn map_insert_error(error: rusqlite::Error) -> StorageError {
        match error {
            rusqlite::Error::SqliteFailure(e, Some(message))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StorageError::ConstraintViolation(message)
            }
            other => StorageError::Sqlite(other),
        }
    }
}

impl ProjectStore for SqliteStore {
    fn insert_project(&mut self, record: &ProjectRecord) -> StorageResult<i64> {
        self.conn
            .execute(
                "INSERT INTO projects (uuid, name, title, description, url, category, tags, \
                 status, is_featured, created_at, updated_at, author_name, target, sort) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                params![
                    record.uuid,
                    record.name,
                    record.title,
                    record.description,
                    record.url,
                    record.category,
                    record.tags,
                    record.status,
                    record.is_featured,
                    record.created_at,
                    record.updated_at,
                    record.author_name,
                    record.target,
                    record.sort,
                ],
            )
            .map_err(Self::map_insert_error)?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_project(&mut self, id: i64, record: &ProjectRecord) -> StorageResult<()> {
        let updated = self.conn.execute(
            "UPDATE projects SET uuid = ?1, name = ?2, title = ?3, description = ?4, url = ?5, \
             category = ?6, tags = ?7, status = ?8, is_featured = ?9, created_at = ?10, \
             updated_at = ?11, author_name = ?12, target = ?13, sort = ?14 WHERE id = ?15",
            params![
                record.uuid,
                record.name,
                record.title,
                record.description,
                record.url,
                record.category,
                record.tags,
                record.status,
                record.is_featured,
                record.created_at,
                record.updated_at,
                record.author_name,
                record.target,
                record.sort,
                id,
            ],
        )?;

        if updated == 0 {
            return Err(StorageError::ProjectNotFound(id));
        }
        Ok(())
    }

    fn delete_project(&mut self, id: i64) -> StorageResult<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM projects WHERE id = ?1", params![id])?;

        if deleted == 0 {
            return Err(StorageError::ProjectNotFound(id));
        }
        Ok(())
    }

    fn get_project(&self, id: i64) -> StorageResult<StoredProject> {
        let sql = format!("SELECT {} FROM projects WHERE id = ?1", PROJECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;

        stmt.query_row(params![id], Self::row_to_project)
            .map_err(|_| StorageError::ProjectNotFound(id))
    }

    fn list_projects(&self) -> StorageResult<Vec<StoredProject>> {
        let sql = format!(
            "SELECT {} FROM projects ORDER BY created_at DESC, id DESC",
            PROJECT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let projects = stmt
            .query_map([], Self::row_to_project)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(projects)
    }

    fn count_projects(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM projects", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_by_category(&self) -> StorageResult<Vec<(String, u64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT category, COUNT(*) FROM projects GROUP BY category \
             ORDER BY COUNT(*) DESC, category ASC",
        )?;

        let counts = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get::<_, i64>(1)? as u64)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(counts)
    }
}
