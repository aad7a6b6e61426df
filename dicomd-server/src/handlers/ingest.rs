//! Ingestion handler.

use std::path::Path;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /dicom
#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    #[serde(default)]
    pub path: String,
}

/// Response for a successful ingestion
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    /// Client-facing identifier for all subsequent retrieval
    pub id: String,
}

/// POST /dicom - ingest a DICOM file from a local path.
///
/// Decodes the file, registers a catalog record, stores its rendered image,
/// and extracts its metadata elements. Returns the record's external
/// identifier.
pub async fn ingest_handler(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    if request.path.is_empty() {
        return Err(ApiError::bad_request("file path is empty"));
    }

    let id = state.ingestor.ingest(Path::new(&request.path)).await?;
    Ok(Json(IngestResponse { id }))
}
