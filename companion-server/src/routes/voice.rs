use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::response::IntoResponse;
use companion_core::Error;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechRequest {
    /// Kept loose so a non-string reads as missing text
    #[serde(default)]
    text: Option<Value>,
    #[serde(default)]
    voice_id: Option<String>,
}

/// POST /api/voice/tts and POST /api/text-to-speech/generate
pub async fn text_to_speech(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SpeechRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let text = match req.text.as_ref().and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(ApiError::bad_request("Text is required")),
    };
    let voice_id = req.voice_id.as_deref().filter(|v| !v.is_empty());

    let audio = state
        .speech
        .text_to_speech(text, voice_id)
        .await
        .map_err(|e| state.fail("Failed to generate speech")(Error::Collaborator(e)))?;

    tracing::debug!(bytes = audio.len(), "Generated speech");
    Ok((
        [
            (CONTENT_TYPE, "audio/mpeg".to_string()),
            (CONTENT_LENGTH, audio.len().to_string()),
            (CONTENT_DISPOSITION, r#"inline; filename="speech.mp3""#.to_string()),
        ],
        audio,
    ))
}

/// GET /api/voice/voices
pub async fn voices(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let voices = state
        .speech
        .list_voices()
        .await
        .map_err(|e| state.fail("Failed to fetch voices")(Error::Collaborator(e)))?;
    Ok(Json(json!({ "voices": voices })))
}
