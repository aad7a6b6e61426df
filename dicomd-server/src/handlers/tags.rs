//! Metadata retrieval handler.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TagsQuery {
    #[serde(default)]
    pub id: Option<String>,
}

/// Response for GET /tags
#[derive(Debug, Serialize)]
pub struct TagsResponse {
    /// The record's external identifier, echoed back
    pub uuid: String,
    /// Metadata elements in extraction order
    pub tags: Vec<TagDto>,
}

/// One metadata element as exposed over the API
#[derive(Debug, Serialize)]
pub struct TagDto {
    pub tag: String,
    pub vr: String,
    pub value: String,
    pub name: String,
}

/// GET /tags?id= - list the metadata elements linked to a record.
///
/// A record with no elements yields an empty list, not an error.
pub async fn tags_handler(
    State(state): State<AppState>,
    Query(query): Query<TagsQuery>,
) -> Result<Json<TagsResponse>, ApiError> {
    let id = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("id parameter is required"))?;

    let tags = state
        .fetcher
        .get_tags(&id)
        .await?
        .into_iter()
        .map(|entry| TagDto {
            tag: entry.tag,
            vr: entry.vr,
            value: entry.value,
            name: entry.name,
        })
        .collect();

    Ok(Json(TagsResponse { uuid: id, tags }))
}
