//! Mcp-Harvest: a batch importer for MCP server listings
//!
//! This crate pulls paginated listings from a remote MCP directory API,
//! keeps the ones whose provenance marks them as scraped from GitHub, and
//! imports them as project records into a local SQLite database. Progress
//! is streamed to the caller over a channel; failures are reported through
//! the run summary rather than raised.

pub mod config;
pub mod import;
pub mod source;
pub mod storage;

use thiserror::Error;

/// Main error type for harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Source error: {0}")]
    Source(#[from] source::SourceError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use import::{CancelHandle, Harvester, ImportProgress, ImportSummary, ProbeReport};
pub use source::{DirectoryClient, SourceListing, GITHUB_PROVENANCE, PAGE_SIZE};
pub use storage::{ProjectRecord, ProjectStore, SqliteStore, StoredProject};
