//! Stand-in collaborator used when a provider's API key is missing.
//!
//! The server still starts and every other route keeps working; calls that
//! need the missing provider fail with a message naming the variable to set.

use crate::{
    ChatTurn, ConversationPartner, InlineImage, LanguageAnalyzer, SceneGuide, SpeechSynthesizer,
    Voice,
};
use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug, Clone, Copy)]
pub struct Unconfigured {
    provider: &'static str,
    env_var: &'static str,
}

impl Unconfigured {
    pub fn gemini() -> Self {
        Unconfigured {
            provider: "Gemini",
            env_var: "GEMINI_API_KEY",
        }
    }

    pub fn elevenlabs() -> Self {
        Unconfigured {
            provider: "ElevenLabs",
            env_var: "ELEVENLABS_API_KEY",
        }
    }

    fn error(&self) -> anyhow::Error {
        anyhow::anyhow!(
            "{} API not configured. Please set {} in environment variables.",
            self.provider,
            self.env_var
        )
    }
}

#[async_trait]
impl LanguageAnalyzer for Unconfigured {
    async fn analyze_language(&self, _text: &str, _target_language: &str) -> anyhow::Result<serde_json::Value> {
        Err(self.error())
    }
}

#[async_trait]
impl ConversationPartner for Unconfigured {
    async fn generate_response(
        &self,
        _message: &str,
        _image: Option<&InlineImage>,
        _history: &[ChatTurn],
    ) -> anyhow::Result<String> {
        Err(self.error())
    }
}

#[async_trait]
impl SceneGuide for Unconfigured {
    async fn real_time_guidance(
        &self,
        _image: &InlineImage,
        _previous_context: Option<&serde_json::Value>,
    ) -> anyhow::Result<serde_json::Value> {
        Err(self.error())
    }

    async fn describe_scene(&self, _image: &InlineImage) -> anyhow::Result<String> {
        Err(self.error())
    }
}

#[async_trait]
impl SpeechSynthesizer for Unconfigured {
    async fn text_to_speech(&self, _text: &str, _voice_id: Option<&str>) -> anyhow::Result<Bytes> {
        Err(self.error())
    }

    /// No key means no voices, not a failure
    async fn list_voices(&self) -> anyhow::Result<Vec<Voice>> {
        Ok(Vec::new())
    }
}
