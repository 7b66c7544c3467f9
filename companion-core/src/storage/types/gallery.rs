//! Gallery item types

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Newest items are kept when a user's gallery grows past this
pub const GALLERY_CAPACITY: usize = 200;

const DEFAULT_STYLE: &str = "realistic";
const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A saved piece of generated art
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedArt {
    pub id: String,
    /// Base64 image data, stored as received
    pub image: String,
    pub prompt: String,
    pub style: String,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl SavedArt {
    pub fn new(image: String, prompt: String, style: Option<String>, user_id: &str) -> Self {
        let created_at = chrono::Utc::now().timestamp_millis();
        SavedArt {
            id: generate_art_id(created_at),
            image,
            prompt,
            style: style
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_STYLE.to_string()),
            created_at,
            user_id: Some(user_id.to_string()),
        }
    }
}

/// `art_<millis>_<9 random base36 chars>`
fn generate_art_id(millis: i64) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("art_{}_{}", millis, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_art_defaults_style() {
        let art = SavedArt::new("img".into(), "a cat".into(), None, "default");
        assert_eq!(art.style, "realistic");
        assert_eq!(art.user_id.as_deref(), Some("default"));

        let blank = SavedArt::new("img".into(), "a cat".into(), Some(" ".into()), "default");
        assert_eq!(blank.style, "realistic");
    }

    #[test]
    fn test_art_id_format() {
        let art = SavedArt::new("img".into(), "p".into(), Some("cartoon".into()), "u1");
        let parts: Vec<&str> = art.id.splitn(3, '_').collect();
        assert_eq!(parts[0], "art");
        assert_eq!(parts[1], art.created_at.to_string());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_art_ids_differ() {
        let a = SavedArt::new("img".into(), "p".into(), None, "u1");
        let b = SavedArt::new("img".into(), "p".into(), None, "u1");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let art = SavedArt {
            id: "art_1_abc".into(),
            image: "img".into(),
            prompt: "p".into(),
            style: "realistic".into(),
            created_at: 1,
            user_id: None,
        };
        assert_eq!(
            serde_json::to_value(&art).unwrap(),
            serde_json::json!({
                "id": "art_1_abc", "image": "img", "prompt": "p",
                "style": "realistic", "createdAt": 1
            })
        );
    }
}
