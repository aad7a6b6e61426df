//! Image retrieval handler.

use std::io::Cursor;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use image::ImageFormat;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    #[serde(default)]
    pub id: Option<String>,
}

/// GET /image?id= - return a record's stored image as PNG bytes.
pub async fn image_handler(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> Result<Response, ApiError> {
    let id = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("id parameter is required"))?;

    let raster = state.fetcher.get_image(&id).await?;

    let mut png = Cursor::new(Vec::new());
    raster
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|e| ApiError::internal(format!("failed to encode image: {e}")))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png.into_inner()).into_response())
}
