use serde::{Deserialize, Serialize};

use crate::api::Voice;

#[derive(Clone, Debug, Serialize)]
pub(crate) struct VoiceSettings {
    pub(crate) stability: f32,
    pub(crate) similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        VoiceSettings {
            stability: 0.5,
            similarity_boost: 0.75,
        }
    }
}

/// Body of `POST /v1/text-to-speech/{voice_id}`. The model is left to the
/// account default, which every tier can use.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct TextToSpeechRequest<'a> {
    pub(crate) text: &'a str,
    pub(crate) voice_settings: VoiceSettings,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub(crate) struct ListVoicesResponse {
    #[serde(default)]
    pub(crate) voices: Vec<Voice>,
}

/// Pull a readable message out of an ElevenLabs error body.
/// Errors come as `{"detail": {"message": ...}}`, `{"detail": "..."}` or `{"message": ...}`.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    let detail = json.get("detail");
    detail
        .and_then(|d| d.get("message"))
        .or_else(|| detail.filter(|d| d.is_string()))
        .or_else(|| json.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}
