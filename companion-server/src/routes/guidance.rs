use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use companion_core::SceneDescription;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Image fields stay untyped so a non-string is a validation error, not a
/// body rejection
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRequest {
    #[serde(default)]
    image_data: Option<Value>,
    #[serde(default)]
    previous_context: Option<Value>,
}

/// POST /api/guidance/realtime
pub async fn realtime(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<FrameRequest>,
) -> Result<Json<Value>, ApiError> {
    let guidance = state
        .guidance
        .generate_real_time_guidance(req.image_data.as_ref(), req.previous_context.as_ref())
        .await
        .map_err(state.fail("Failed to generate guidance"))?;
    Ok(Json(guidance))
}

/// POST /api/vision/analyze
pub async fn describe(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<FrameRequest>,
) -> Result<Json<SceneDescription>, ApiError> {
    let description = state
        .guidance
        .describe_scene(req.image_data.as_ref())
        .await
        .map_err(state.fail("Failed to analyze image"))?;
    Ok(Json(description))
}
