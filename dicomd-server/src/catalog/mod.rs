//! Relational catalog: records, metadata tag rows, and the join between
//! them.
//!
//! The catalog exclusively owns all three entities. Operations are
//! single-row and atomic; no multi-row transaction spans an ingestion.

pub mod error;
pub mod sqlite;

pub use error::CatalogError;
pub use sqlite::SqliteCatalog;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// One ingested file's identity and image location.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Record {
    /// Internal sequential key; never reused.
    pub id: i64,
    /// Short client-facing identifier; immutable once assigned.
    pub external_id: String,
    /// Where the rendered image is (or will be) stored. Reserved at record
    /// creation, before the blob itself exists.
    pub image_location: String,
    pub created_at: DateTime<Utc>,
}

/// One decoded tag/value pair, as persisted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TagEntry {
    pub id: i64,
    /// Independently generated short identifier for the row itself.
    pub uid: String,
    /// Canonical `(GGGG,EEEE)` tag code.
    pub tag: String,
    /// Two-letter value-representation code.
    pub vr: String,
    /// Rendered value; backslash-delimited when multi-valued.
    pub value: String,
    /// Dictionary name for the tag; empty when unresolvable.
    pub name: String,
}

/// Input for inserting a tag row.
#[derive(Debug, Clone)]
pub struct NewTag {
    pub tag: String,
    pub vr: String,
    pub value: String,
    pub name: String,
}
