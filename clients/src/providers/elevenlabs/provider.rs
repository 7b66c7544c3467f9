use super::api::{self, ListVoicesResponse, TextToSpeechRequest, VoiceSettings};
use crate::client::{Client, HttpError};
use crate::traffic_log;
use crate::{SpeechSynthesizer, Voice};
use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use config::Settings;
use reqwest::StatusCode;
use reqwest::header::{self, HeaderMap, HeaderValue};

const API_VERSION: &str = "v1";
const SERVICE: &str = "elevenlabs";

pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";

#[derive(Clone)]
pub struct ElevenLabsProvider {
    client: Client,
    base_url: String,
}

impl ElevenLabsProvider {
    /// The API version path (/v1) is automatically appended to `base_url`.
    pub fn new(base_url: &str, api_key: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(api_key).context("Invalid ElevenLabs API key format")?;
        key.set_sensitive(true);
        headers.insert("xi-api-key", key);

        let base_url = base_url.trim_end_matches('/');
        Ok(ElevenLabsProvider {
            client: Client::with_headers(headers)?,
            base_url: format!("{}/{}", base_url, API_VERSION),
        })
    }

    /// `Ok(None)` when no API key is configured
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Option<Self>> {
        settings
            .elevenlabs_api_key
            .as_deref()
            .map(|key| Self::new(&settings.elevenlabs_base_url, key))
            .transpose()
    }

    fn tts_url(&self, voice_id: &str) -> String {
        format!("{}/text-to-speech/{}", self.base_url, voice_id)
    }

    fn voices_url(&self) -> String {
        format!("{}/voices", self.base_url)
    }
}

/// Turn an upstream failure into the message shown to clients
fn speech_error(err: anyhow::Error) -> anyhow::Error {
    let Some(http) = err.downcast_ref::<HttpError>() else {
        return anyhow::anyhow!("Failed to generate speech: {}", err);
    };
    match http.status {
        StatusCode::UNAUTHORIZED => anyhow::anyhow!(
            "ElevenLabs API key is invalid or expired. Please verify your API key is correct and active."
        ),
        StatusCode::TOO_MANY_REQUESTS => {
            anyhow::anyhow!("ElevenLabs API rate limit exceeded. Please try again later.")
        }
        status => {
            let message = api::error_message(&http.body).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            anyhow::anyhow!("Failed to generate speech: {}", message)
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsProvider {
    async fn text_to_speech(&self, text: &str, voice_id: Option<&str>) -> anyhow::Result<Bytes> {
        let voice_id = voice_id.filter(|v| !v.is_empty()).unwrap_or(DEFAULT_VOICE_ID);
        let request = TextToSpeechRequest {
            text,
            voice_settings: VoiceSettings::default(),
        };
        traffic_log::log_request(SERVICE, &request);

        match self
            .client
            .post_for_bytes(self.tts_url(voice_id), &request, "audio/mpeg")
            .await
        {
            Ok(audio) => {
                traffic_log::log_binary_response(SERVICE, audio.len());
                Ok(audio)
            }
            Err(e) => {
                traffic_log::log_error(SERVICE, &e.to_string());
                Err(speech_error(e))
            }
        }
    }

    async fn list_voices(&self) -> anyhow::Result<Vec<Voice>> {
        let response: ListVoicesResponse = self
            .client
            .get(self.voices_url())
            .await
            .context("Failed to fetch voices")?;
        traffic_log::log_response(SERVICE, &response);
        Ok(response.voices)
    }
}
