use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use companion_core::FeedbackResult;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageRequest {
    #[serde(default)]
    text: Option<Value>,
    #[serde(default)]
    target_language: Option<String>,
}

impl LanguageRequest {
    fn text(&self) -> Option<&str> {
        self.text.as_ref().and_then(Value::as_str)
    }
}

/// POST /api/language/analyze
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LanguageRequest>,
) -> Result<Json<FeedbackResult>, ApiError> {
    let result = state
        .feedback
        .analyze_and_format(req.text(), req.target_language.as_deref(), None)
        .await
        .map_err(state.fail("Failed to analyze language"))?;
    Ok(Json(result))
}

/// POST /api/language/cultural
pub async fn cultural(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LanguageRequest>,
) -> Result<Json<Value>, ApiError> {
    let context = state
        .feedback
        .cultural_context(req.text(), req.target_language.as_deref())
        .await
        .map_err(state.fail("Failed to provide cultural context"))?;
    Ok(Json(json!({ "context": context })))
}
