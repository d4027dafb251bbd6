//! Storage traits and error types
//!
//! This module defines the trait interface for project stores and
//! associated error types.

use crate::storage::{ProjectRecord, StoredProject};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(i64),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for project store implementations
///
/// The importer only ever inserts; update and delete back the probe flow and
/// administrative corrections, and the listing/count queries back stats output.
pub trait ProjectStore {
    /// Inserts a project and returns the new row id
    fn insert_project(&mut self, record: &ProjectRecord) -> StorageResult<i64>;

    /// Replaces the stored record for an existing project
    fn update_project(&mut self, id: i64, record: &ProjectRecord) -> StorageResult<()>;

    /// Deletes a project by id
    fn delete_project(&mut self, id: i64) -> StorageResult<()>;

    /// Gets a project by id
    fn get_project(&self, id: i64) -> StorageResult<StoredProject>;

    /// Lists all projects ordered by creation time, newest first
    fn list_projects(&self) -> StorageResult<Vec<StoredProject>>;

    /// Total number of stored projects
    fn count_projects(&self) -> StorageResult<u64>;

    /// Project counts grouped by category, largest first
    fn count_by_category(&self) -> StorageResult<Vec<(String, u64)>>;
}
