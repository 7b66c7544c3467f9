use serde::{Deserialize, Serialize};

const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Base64 image payload as sent by the camera clients.
///
/// Clients send either a bare base64 string or a data URL such as
/// `data:image/png;base64,iVBOR...`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    /// base64-encoded, without the data URL prefix
    pub data: String,
}

impl InlineImage {
    pub fn from_data_url(input: &str) -> Self {
        let Some((header, data)) = input.split_once(',') else {
            return InlineImage {
                mime_type: DEFAULT_IMAGE_MIME_TYPE.to_string(),
                data: input.trim().to_string(),
            };
        };

        let mime_type = header
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .filter(|mime| !mime.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME_TYPE);

        InlineImage {
            mime_type: mime_type.to_string(),
            data: data.trim().to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One earlier message of a spoken conversation
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// A voice as listed by the speech provider. Fields beyond the id and name are
/// relayed as received.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Voice {
    pub voice_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
