use super::api::{GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};
use super::prompts;
use crate::client::Client;
use crate::traffic_log;
use crate::{ChatTurn, ConversationPartner, InlineImage, LanguageAnalyzer, SceneGuide};
use anyhow::Context;
use async_trait::async_trait;
use config::Settings;
use reqwest::header::{self, HeaderMap, HeaderValue};

const API_VERSION: &str = "v1beta";
const SERVICE: &str = "gemini";

#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    model_name: String,
}

impl GeminiProvider {
    /// Create a provider against `base_url` (e.g., for proxying).
    /// The API version path (/v1beta) is automatically appended.
    pub fn new(base_url: &str, api_key: &str, model_name: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(api_key).context("Invalid Gemini API key format")?;
        key.set_sensitive(true);
        headers.insert("x-goog-api-key", key);

        let base_url = base_url.trim_end_matches('/');
        Ok(GeminiProvider {
            client: Client::with_headers(headers)?,
            base_url: format!("{}/{}", base_url, API_VERSION),
            model_name: model_name.to_string(),
        })
    }

    /// `Ok(None)` when no API key is configured
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Option<Self>> {
        settings
            .gemini_api_key
            .as_deref()
            .map(|key| Self::new(&settings.gemini_base_url, key, &settings.gemini_model))
            .transpose()
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model_name)
    }

    async fn generate(&self, request: &GenerateContentRequest) -> anyhow::Result<GenerateContentResponse> {
        traffic_log::log_request(SERVICE, request);
        match self.client.post(self.generate_url(), request).await {
            Ok(response) => {
                let response: GenerateContentResponse = response;
                traffic_log::log_response(SERVICE, &response);
                Ok(response)
            }
            Err(e) => {
                traffic_log::log_error(SERVICE, &e.to_string());
                Err(e)
            }
        }
    }
}

#[async_trait]
impl LanguageAnalyzer for GeminiProvider {
    async fn analyze_language(
        &self,
        text: &str,
        target_language: &str,
    ) -> anyhow::Result<serde_json::Value> {
        let request = GenerateContentRequest::single_turn(
            vec![Part::text(prompts::language_analysis(text, target_language))],
            Some(GenerationConfig::json()),
        );
        let response = self.generate(&request).await.context("Failed to analyze language")?;
        response.json().context("Failed to analyze language")
    }
}

#[async_trait]
impl SceneGuide for GeminiProvider {
    async fn real_time_guidance(
        &self,
        image: &InlineImage,
        previous_context: Option<&serde_json::Value>,
    ) -> anyhow::Result<serde_json::Value> {
        let request = GenerateContentRequest::single_turn(
            vec![
                Part::text(prompts::real_time_guidance(previous_context)),
                Part::image(image),
            ],
            Some(GenerationConfig::json()),
        );
        let response = self.generate(&request).await.context("Failed to generate guidance")?;
        response.json().context("Failed to generate guidance")
    }

    async fn describe_scene(&self, image: &InlineImage) -> anyhow::Result<String> {
        let request = GenerateContentRequest::single_turn(
            vec![Part::text(prompts::DESCRIBE_SCENE), Part::image(image)],
            None,
        );
        let response = self.generate(&request).await.context("Failed to describe scene")?;
        response.text().context("Failed to describe scene")
    }
}

#[async_trait]
impl ConversationPartner for GeminiProvider {
    async fn generate_response(
        &self,
        message: &str,
        image: Option<&InlineImage>,
        history: &[ChatTurn],
    ) -> anyhow::Result<String> {
        let mut parts = vec![Part::text(prompts::conversation(message, history))];
        if let Some(image) = image {
            parts.push(Part::image(image));
        }
        let request = GenerateContentRequest::single_turn(parts, None);
        let response = self.generate(&request).await.context("Failed to generate response")?;
        response.text().context("Failed to generate response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_url_appends_version_and_model() {
        let provider =
            GeminiProvider::new("https://example.test/", "key", "gemini-1.5-pro").unwrap();
        assert_eq!(
            provider.generate_url(),
            "https://example.test/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn test_from_settings_without_key_is_none() {
        let settings = Settings::default();
        assert!(GeminiProvider::from_settings(&settings).unwrap().is_none());
    }

    #[test]
    fn test_from_settings_with_key() {
        let mut settings = Settings::default();
        settings.gemini_api_key = Some("key".to_string());
        settings.gemini_model = "gemini-2.0-flash".to_string();
        let provider = GeminiProvider::from_settings(&settings).unwrap().unwrap();
        assert_eq!(provider.model_name(), "gemini-2.0-flash");
    }

    #[test]
    fn test_invalid_key_is_rejected() {
        assert!(GeminiProvider::new("https://example.test", "bad\nkey", "m").is_err());
    }
}
