//! Clients for the external collaborators behind the companion backend
//!
//! This crate provides:
//! - **Traits**: `LanguageAnalyzer`, `SceneGuide`, `ConversationPartner`,
//!   `SpeechSynthesizer`
//! - **Providers**: `GeminiProvider` (language analysis, scene guidance,
//!   conversation replies) and
//!   `ElevenLabsProvider` (speech synthesis, voice listing)
//! - **Fallback**: `Unconfigured`, used when an API key is missing
use async_trait::async_trait;
use bytes::Bytes;

pub mod api;
mod client;
pub mod providers;
mod traffic_log;
mod unconfigured;

pub use api::{ChatRole, ChatTurn, InlineImage, Voice};
pub use providers::{ElevenLabsProvider, GeminiProvider};
pub use unconfigured::Unconfigured;

/// Structured language assessment (grammar, vocabulary, pronunciation, cultural notes)
#[async_trait]
pub trait LanguageAnalyzer: Send + Sync {
    async fn analyze_language(
        &self,
        text: &str,
        target_language: &str,
    ) -> anyhow::Result<serde_json::Value>;
}

/// Vision/language collaborator that looks at a single frame
#[async_trait]
pub trait SceneGuide: Send + Sync {
    /// Navigation guidance for one camera frame. `previous_context` is whatever
    /// the caller got back from the previous call and is passed along untouched.
    async fn real_time_guidance(
        &self,
        image: &InlineImage,
        previous_context: Option<&serde_json::Value>,
    ) -> anyhow::Result<serde_json::Value>;

    /// Free-text scene description
    async fn describe_scene(&self, image: &InlineImage) -> anyhow::Result<String>;
}

/// Assistant replies for the voice conversation screen
#[async_trait]
pub trait ConversationPartner: Send + Sync {
    /// Reply to `message`, optionally looking at `image`. Only the most recent
    /// turns of `history` are taken into account.
    async fn generate_response(
        &self,
        message: &str,
        image: Option<&InlineImage>,
        history: &[ChatTurn],
    ) -> anyhow::Result<String>;
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` to MPEG audio. `None` selects the provider's default voice.
    async fn text_to_speech(&self, text: &str, voice_id: Option<&str>) -> anyhow::Result<Bytes>;

    async fn list_voices(&self) -> anyhow::Result<Vec<Voice>>;
}
