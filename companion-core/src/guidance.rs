//! Single-frame scene guidance relayed from the vision collaborator

use std::sync::Arc;

use clients::{InlineImage, SceneGuide};
use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};

const IMAGE_REQUIRED: &str = "Image data is required";

/// Returned in place of a description when the collaborator cannot be reached
pub const DESCRIPTION_UNAVAILABLE: &str =
    "Failed to describe image. Please check your Gemini API key configuration.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDescription {
    pub description: String,
}

pub struct GuidanceFormatter {
    guide: Arc<dyn SceneGuide>,
}

impl GuidanceFormatter {
    pub fn new(guide: Arc<dyn SceneGuide>) -> Self {
        Self { guide }
    }

    /// Guidance for one frame, relayed verbatim. A `null` previous context is
    /// the same as none.
    pub async fn generate_real_time_guidance(
        &self,
        image_data: Option<&Value>,
        previous_context: Option<&Value>,
    ) -> Result<Value> {
        let image = require_image(image_data)?;
        let previous_context = previous_context.filter(|c| !c.is_null());
        self.guide
            .real_time_guidance(&image, previous_context)
            .await
            .map_err(Error::Collaborator)
    }

    /// Free-text description of one frame. Collaborator failures are logged
    /// and answered with a fixed explanatory description.
    pub async fn describe_scene(&self, image_data: Option<&Value>) -> Result<SceneDescription> {
        let image = require_image(image_data)?;
        let description = match self.guide.describe_scene(&image).await {
            Ok(description) => description,
            Err(e) => {
                tracing::error!("Scene description failed: {:#}", e);
                DESCRIPTION_UNAVAILABLE.to_string()
            }
        };
        Ok(SceneDescription { description })
    }
}

fn require_image(image_data: Option<&Value>) -> Result<InlineImage> {
    match image_data.and_then(Value::as_str) {
        Some(data) if !data.is_empty() => Ok(InlineImage::from_data_url(data)),
        _ => Err(Error::validation(IMAGE_REQUIRED)),
    }
}
