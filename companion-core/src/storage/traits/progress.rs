//! ProgressStore trait for per-user learning progress

use async_trait::async_trait;

use crate::error::StorageError;
use crate::storage::types::{ProgressFields, ProgressRecord};

/// Trait for progress storage operations
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Stored record for `user_id`, or an empty record if none exists yet.
    /// Reading never creates a record.
    async fn get_progress(&self, user_id: &str) -> Result<ProgressRecord, StorageError>;

    /// Shallow-merge `updates` into the record for `user_id`, creating it if
    /// absent, and return the full merged record.
    async fn update_progress(
        &self,
        user_id: &str,
        updates: ProgressFields,
    ) -> Result<ProgressRecord, StorageError>;
}
