use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use companion_core::{Error, gallery, user_id_or_default};
use serde::Deserialize;
use serde_json::{Value, json};

use super::UserQuery;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveArtRequest {
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
}

/// POST /api/gallery/save
pub async fn save(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SaveArtRequest>,
) -> Result<Json<Value>, ApiError> {
    let user_id = user_id_or_default(req.user_id.as_deref());
    let art = gallery::save_art(
        state.gallery.as_ref(),
        user_id,
        req.image.as_deref(),
        req.prompt.as_deref(),
        req.style.as_deref(),
    )
    .await
    .map_err(state.fail("Failed to save art to gallery"))?;
    Ok(Json(json!({
        "success": true,
        "art": art,
        "message": "Art saved to gallery successfully",
    })))
}

/// GET /api/gallery/list
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Value>, ApiError> {
    let arts = state
        .gallery
        .list_art(query.user_id())
        .await
        .map_err(|e| state.fail("Failed to retrieve gallery")(Error::from(e)))?;
    Ok(Json(json!({
        "success": true,
        "arts": arts,
        "message": "Gallery list retrieved",
    })))
}

/// GET /api/gallery/{id}
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Value>, ApiError> {
    let art = gallery::get_art(state.gallery.as_ref(), query.user_id(), &id)
        .await
        .map_err(state.fail("Failed to retrieve art"))?;
    Ok(Json(json!({ "success": true, "art": art })))
}

/// DELETE /api/gallery/{id}
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Value>, ApiError> {
    gallery::delete_art(state.gallery.as_ref(), query.user_id(), &id)
        .await
        .map_err(state.fail("Failed to delete art"))?;
    Ok(Json(json!({ "success": true, "message": "Art deleted" })))
}
