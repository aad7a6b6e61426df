//! API error handling module.
//!
//! Provides a unified error type for all API endpoints, mapping pipeline
//! failures to HTTP statuses and stable machine-readable codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::blob::BlobError;
use crate::catalog::CatalogError;
use crate::fetch::FetchError;
use crate::ingest::IngestError;

/// API error type with structured variants for the different failure
/// categories.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client provided an invalid request envelope
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Identifier or location collision at insert
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The referenced file could not be decoded
    #[error("Undecodable file: {0}")]
    Undecodable(String),

    /// Unexpected server-side failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Undecodable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for programmatic error handling
    fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Undecodable(_) => "DECODE_FAILED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Decode(e) => Self::Undecodable(e.to_string()),
            IngestError::Catalog(CatalogError::Conflict(what)) => {
                Self::Conflict(format!("{what} already exists"))
            }
            IngestError::Catalog(e) => Self::Internal(e.to_string()),
            IngestError::Blob(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Catalog(CatalogError::NotFound(what)) => {
                Self::NotFound(format!("{what} not found"))
            }
            FetchError::Blob(BlobError::NotFound(_)) => Self::NotFound("image not found".into()),
            FetchError::Catalog(e) => Self::Internal(e.to_string()),
            FetchError::Blob(e) => Self::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let message = self.to_string();

        match &self {
            Self::BadRequest(_) | Self::NotFound(_) | Self::Conflict(_) | Self::Undecodable(_) => {
                tracing::warn!(status = %status, code, error = %message, "client error");
            }
            Self::Internal(_) => {
                tracing::error!(status = %status, code, error = %message, "server error");
            }
        }

        let body = serde_json::json!({
            "error": message,
            "code": code,
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use dicomd_core::DecodeError;

    #[test]
    fn ingest_errors_map_to_statuses() {
        let decode: ApiError = IngestError::Decode(DecodeError::Read("truncated".into())).into();
        assert_eq!(decode.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let conflict: ApiError = IngestError::Catalog(CatalogError::Conflict("record")).into();
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);

        let query: ApiError = IngestError::Catalog(CatalogError::Query("locked".into())).into();
        assert_eq!(query.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn fetch_errors_map_to_statuses() {
        let record: ApiError = FetchError::Catalog(CatalogError::NotFound("record")).into();
        assert_eq!(record.status_code(), StatusCode::NOT_FOUND);

        let blob: ApiError = FetchError::Blob(BlobError::NotFound("x.png".into())).into();
        assert_eq!(blob.status_code(), StatusCode::NOT_FOUND);
    }
}
