use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use companion_core::{ConversationOutcome, ProgressFields, ProgressRecord, user_id_or_default};
use serde::Deserialize;
use serde_json::Value;

use super::UserQuery;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRequest {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(flatten)]
    outcome: ConversationOutcome,
}

/// GET /api/progress
pub async fn get_progress(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ProgressRecord>, ApiError> {
    let record = state
        .progress
        .get_progress(query.user_id())
        .await
        .map_err(|e| state.fail("Failed to get progress")(e.into()))?;
    Ok(Json(record))
}

/// POST /api/progress
pub async fn update_progress(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<ProgressRecord>, ApiError> {
    let (user_id, updates) = split_user_id(body);
    let record = state
        .progress
        .update_progress(&user_id, updates)
        .await
        .map_err(|e| state.fail("Failed to update progress")(e.into()))?;
    Ok(Json(record))
}

/// POST /api/progress/conversation
pub async fn record_conversation(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ConversationRequest>,
) -> Result<Json<ProgressRecord>, ApiError> {
    let user_id = user_id_or_default(req.user_id.as_deref());
    let record = companion_core::record_conversation(state.progress.as_ref(), user_id, &req.outcome)
        .await
        .map_err(state.fail("Failed to record conversation"))?;
    Ok(Json(record))
}

/// The body minus `userId`, which only selects the record. Anything but an
/// object carries no updates.
fn split_user_id(body: Value) -> (String, ProgressFields) {
    let mut fields = match body {
        Value::Object(fields) => fields,
        _ => ProgressFields::new(),
    };
    let user_id = fields
        .remove("userId")
        .and_then(|v| v.as_str().map(str::to_string));
    (user_id_or_default(user_id.as_deref()).to_string(), fields)
}
