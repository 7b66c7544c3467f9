//! Spoken conversation turns: a text reply plus, when speech works, its audio

use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD};
use clients::{ChatTurn, ConversationPartner, InlineImage, SpeechSynthesizer};
use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationReply {
    pub response: String,
    /// `data:audio/mpeg;base64,...`, absent when speech synthesis failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

pub struct ConversationService {
    partner: Arc<dyn ConversationPartner>,
    speech: Arc<dyn SpeechSynthesizer>,
}

impl ConversationService {
    pub fn new(partner: Arc<dyn ConversationPartner>, speech: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { partner, speech }
    }

    /// Reply to `message`. Speech is best effort: a synthesis failure is
    /// logged and the reply goes out without audio.
    pub async fn respond(
        &self,
        message: Option<&Value>,
        image_data: Option<&Value>,
        history: &[ChatTurn],
    ) -> Result<ConversationReply> {
        let message = match message.and_then(Value::as_str) {
            Some(m) if !m.trim().is_empty() => m,
            _ => return Err(Error::validation("Message is required")),
        };
        let image = image_data
            .and_then(Value::as_str)
            .filter(|d| !d.is_empty())
            .map(InlineImage::from_data_url);

        let response = self
            .partner
            .generate_response(message, image.as_ref(), history)
            .await
            .map_err(Error::Collaborator)?;

        let audio_url = match self.speech.text_to_speech(&response, None).await {
            Ok(audio) => Some(format!("data:audio/mpeg;base64,{}", STANDARD.encode(&audio))),
            Err(e) => {
                tracing::warn!("Audio generation failed, continuing without audio: {:#}", e);
                None
            }
        };

        Ok(ConversationReply { response, audio_url })
    }
}
