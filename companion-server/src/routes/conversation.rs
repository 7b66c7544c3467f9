use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use clients::ChatTurn;
use companion_core::ConversationReply;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRequest {
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    image_data: Option<Value>,
    #[serde(default)]
    conversation_history: Vec<ChatTurn>,
}

/// POST /api/conversation
pub async fn converse(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ConversationRequest>,
) -> Result<Json<ConversationReply>, ApiError> {
    let reply = state
        .conversation
        .respond(
            req.message.as_ref(),
            req.image_data.as_ref(),
            &req.conversation_history,
        )
        .await
        .map_err(state.fail("Failed to process conversation"))?;
    Ok(Json(reply))
}
