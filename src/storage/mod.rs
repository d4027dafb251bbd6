//! Storage module for the projects database
//!
//! This module handles all database operations for imported projects:
//! - SQLite database initialization and schema management
//! - Insert-returning-id, update, delete, and creation-time-ordered listing
//! - Count queries backing the stats output

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{ProjectStore, StorageError, StorageResult};

/// A normalized project row as written to the store
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    pub uuid: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub category: String,
    pub tags: String,
    pub status: String,
    pub is_featured: bool,
    pub created_at: String,
    pub updated_at: String,
    pub author_name: String,
    pub target: String,
    pub sort: Option<i64>,
}

/// A project row together with its database identity
#[derive(Debug, Clone, PartialEq)]
pub struct StoredProject {
    pub id: i64,
    pub record: ProjectRecord,
}
