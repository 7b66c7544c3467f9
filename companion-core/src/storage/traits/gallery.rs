//! GalleryStore trait for saved art

use async_trait::async_trait;

use crate::error::StorageError;
use crate::storage::types::SavedArt;

/// Trait for gallery storage operations. Galleries are per user and ordered
/// newest first.
#[async_trait]
pub trait GalleryStore: Send + Sync {
    /// All items for `user_id`; empty if the user has never saved anything
    async fn list_art(&self, user_id: &str) -> Result<Vec<SavedArt>, StorageError>;

    /// Prepend `art` to its owner's gallery, dropping the oldest items beyond
    /// `GALLERY_CAPACITY`
    async fn save_art(&self, user_id: &str, art: SavedArt) -> Result<SavedArt, StorageError>;

    async fn get_art(&self, user_id: &str, art_id: &str) -> Result<Option<SavedArt>, StorageError>;

    /// Returns whether an item was removed
    async fn delete_art(&self, user_id: &str, art_id: &str) -> Result<bool, StorageError>;
}
