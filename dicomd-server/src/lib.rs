//! dicomd server library - ingestion and retrieval of DICOM imaging records.
//!
//! Exposes the server components for use in integration tests; the `dicomd`
//! binary wires these same components together.

pub mod blob;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod handlers;
pub mod ingest;
pub mod routes;
pub mod state;

pub use blob::{BlobError, BlobStore};
pub use catalog::{CatalogError, NewTag, Record, SqliteCatalog, TagEntry};
pub use config::Config;
pub use error::ApiError;
pub use fetch::{FetchError, Fetcher};
pub use ingest::{IngestError, Ingestor};
pub use routes::{create_router, create_router_with_config};
pub use state::AppState;
