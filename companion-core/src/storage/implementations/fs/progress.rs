//! File-backed ProgressStore implementation

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::json_file;
use crate::error::StorageError;
use crate::storage::traits::ProgressStore;
use crate::storage::types::{ProgressFields, ProgressRecord};

/// Progress records as `<root>/<encoded_user_id>.json`, each holding the field map
#[derive(Debug)]
pub struct FsProgressStore {
    root: PathBuf,
    /// Serializes read-merge-write cycles so concurrent updates never interleave
    write_lock: Mutex<()>,
}

impl FsProgressStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn load(&self, user_id: &str) -> Result<ProgressRecord, StorageError> {
        let path = json_file::user_file(&self.root, user_id);
        let Some(value) = json_file::read_json(&path).await? else {
            return Ok(ProgressRecord::empty(user_id));
        };
        let fields: ProgressFields = serde_json::from_value(value)
            .map_err(|source| StorageError::Corrupt { path, source })?;
        Ok(ProgressRecord::with_fields(user_id, fields))
    }
}

#[async_trait]
impl ProgressStore for FsProgressStore {
    async fn get_progress(&self, user_id: &str) -> Result<ProgressRecord, StorageError> {
        self.load(user_id).await
    }

    async fn update_progress(
        &self,
        user_id: &str,
        updates: ProgressFields,
    ) -> Result<ProgressRecord, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut record = self.load(user_id).await?;
        record.merge(updates);
        json_file::write_json(&json_file::user_file(&self.root, user_id), &record.fields).await?;
        Ok(record)
    }
}
