use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use companion_core::FeedbackResult;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    /// Kept loose so a non-string reads as missing text
    #[serde(default)]
    text: Option<Value>,
    #[serde(default)]
    audio_data: Option<String>,
    #[serde(default)]
    target_language: Option<String>,
}

/// POST /api/feedback/analyze
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<FeedbackRequest>,
) -> Result<Json<FeedbackResult>, ApiError> {
    let result = state
        .feedback
        .analyze_and_format(
            req.text.as_ref().and_then(Value::as_str),
            req.target_language.as_deref(),
            req.audio_data.as_deref(),
        )
        .await
        .map_err(state.fail("Failed to analyze feedback"))?;
    Ok(Json(result))
}
