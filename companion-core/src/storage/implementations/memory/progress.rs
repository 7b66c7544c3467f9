//! In-memory ProgressStore implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::error::StorageError;
use crate::storage::traits::ProgressStore;
use crate::storage::types::{ProgressFields, ProgressRecord};

#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    records: Mutex<HashMap<String, ProgressFields>>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressStore for MemoryProgressStore {
    async fn get_progress(&self, user_id: &str) -> Result<ProgressRecord, StorageError> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(match records.get(user_id) {
            Some(fields) => ProgressRecord::with_fields(user_id, fields.clone()),
            None => ProgressRecord::empty(user_id),
        })
    }

    async fn update_progress(
        &self,
        user_id: &str,
        updates: ProgressFields,
    ) -> Result<ProgressRecord, StorageError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let fields = records.entry(user_id.to_string()).or_default();
        let mut record = ProgressRecord::with_fields(user_id, std::mem::take(fields));
        record.merge(updates);
        *fields = record.fields.clone();
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> ProgressFields {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_unknown_user_reads_empty() {
        let store = MemoryProgressStore::new();
        let record = store.get_progress("nobody").await.unwrap();
        assert_eq!(record.user_id, "nobody");
        assert!(record.fields.is_empty());
    }

    #[tokio::test]
    async fn test_read_does_not_create() {
        let store = MemoryProgressStore::new();
        store.get_progress("nobody").await.unwrap();
        assert!(store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_updates_merge_across_calls() {
        let store = MemoryProgressStore::new();
        store.update_progress("u1", fields(json!({"lessons": 3}))).await.unwrap();
        let merged = store.update_progress("u1", fields(json!({"streak": 5}))).await.unwrap();
        assert_eq!(serde_json::to_value(&merged).unwrap(), json!({"lessons": 3, "streak": 5}));

        let read = store.get_progress("u1").await.unwrap();
        assert_eq!(read, merged);
    }

    #[tokio::test]
    async fn test_users_are_independent() {
        let store = MemoryProgressStore::new();
        store.update_progress("u1", fields(json!({"lessons": 3}))).await.unwrap();
        store.update_progress("u2", fields(json!({"lessons": 7}))).await.unwrap();
        assert_eq!(store.get_progress("u1").await.unwrap().get("lessons"), Some(&json!(3)));
        assert_eq!(store.get_progress("u2").await.unwrap().get("lessons"), Some(&json!(7)));
    }

    #[tokio::test]
    async fn test_repeated_update_is_idempotent() {
        let store = MemoryProgressStore::new();
        let updates = fields(json!({"lessons": 3, "streak": 2}));
        let once = store.update_progress("u1", updates.clone()).await.unwrap();
        let twice = store.update_progress("u1", updates).await.unwrap();
        assert_eq!(once, twice);
    }
}
