//! Application state module.
//!
//! Defines shared state accessible across all request handlers.

use std::sync::Arc;

use crate::fetch::Fetcher;
use crate::ingest::Ingestor;

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Ingestion coordinator
    pub ingestor: Arc<Ingestor>,
    /// Retrieval service
    pub fetcher: Arc<Fetcher>,
}
