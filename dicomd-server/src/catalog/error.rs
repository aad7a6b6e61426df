//! Error types for the catalog module.

use thiserror::Error;

/// Errors that can occur when interacting with the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Database connection failed
    #[error("database connection error: {0}")]
    Connection(String),

    /// Migration execution failed
    #[error("migration error: {0}")]
    Migration(String),

    /// A uniqueness constraint rejected the insert
    #[error("{0} already exists")]
    Conflict(&'static str),

    /// Lookup against a nonexistent key
    #[error("{0} not found")]
    NotFound(&'static str),

    /// SQL query execution failed
    #[error("query error: {0}")]
    Query(String),
}

impl From<sqlx::Error> for CatalogError {
    fn from(e: sqlx::Error) -> Self {
        Self::Query(e.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for CatalogError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        Self::Migration(e.to_string())
    }
}
