//! Progress record types

use serde::Serialize;

/// Open mapping of progress metric name to value
pub type ProgressFields = serde_json::Map<String, serde_json::Value>;

/// Learning progress for one user.
///
/// Serializes as the bare field map; the user id is the storage key and is
/// not repeated in the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressRecord {
    #[serde(skip)]
    pub user_id: String,
    #[serde(flatten)]
    pub fields: ProgressFields,
}

impl ProgressRecord {
    /// Record with no fields, what an unknown user reads as
    pub fn empty(user_id: impl Into<String>) -> Self {
        ProgressRecord {
            user_id: user_id.into(),
            fields: ProgressFields::new(),
        }
    }

    pub fn with_fields(user_id: impl Into<String>, fields: ProgressFields) -> Self {
        ProgressRecord {
            user_id: user_id.into(),
            fields,
        }
    }

    /// Shallow merge: every key in `updates` overwrites, every other key is kept
    pub fn merge(&mut self, updates: ProgressFields) {
        for (key, value) in updates {
            self.fields.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> ProgressFields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_merge_overwrites_and_preserves() {
        let mut record = ProgressRecord::with_fields("u1", fields(json!({"lessons": 3, "streak": 1})));
        record.merge(fields(json!({"streak": 5, "level": "b1"})));
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"lessons": 3, "streak": 5, "level": "b1"})
        );
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut record = ProgressRecord::with_fields("u1", fields(json!({"scores": {"grammar": 80, "vocab": 70}})));
        record.merge(fields(json!({"scores": {"grammar": 90}})));
        assert_eq!(record.get("scores"), Some(&json!({"grammar": 90})));
    }

    #[test]
    fn test_merge_twice_is_idempotent() {
        let updates = fields(json!({"lessons": 3, "tags": ["a"]}));
        let mut once = ProgressRecord::empty("u1");
        once.merge(updates.clone());
        let mut twice = once.clone();
        twice.merge(updates);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_user_id_is_not_serialized() {
        let record = ProgressRecord::empty("u1");
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({}));
    }
}
