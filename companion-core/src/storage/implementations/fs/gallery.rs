//! File-backed GalleryStore implementation

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::json_file;
use crate::error::StorageError;
use crate::storage::traits::GalleryStore;
use crate::storage::types::{GALLERY_CAPACITY, SavedArt};

/// Galleries as `<root>/<encoded_user_id>.json`, each a JSON array newest first
#[derive(Debug)]
pub struct FsGalleryStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FsGalleryStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory up front. Failure is not fatal: every write
    /// retries the creation.
    pub async fn ensure_root(&self) {
        match tokio::fs::create_dir_all(&self.root).await {
            Ok(()) => tracing::info!("Gallery directory ready: {}", self.root.display()),
            Err(e) => tracing::error!(
                "Failed to create gallery directory {}: {}",
                self.root.display(),
                e
            ),
        }
    }

    async fn load(&self, user_id: &str) -> Result<Vec<SavedArt>, StorageError> {
        let path = json_file::user_file(&self.root, user_id);
        match json_file::read_json(&path).await? {
            Some(value @ serde_json::Value::Array(_)) => serde_json::from_value(value)
                .map_err(|source| StorageError::Corrupt { path, source }),
            // Anything but an array is treated as an empty gallery
            _ => Ok(Vec::new()),
        }
    }

    async fn store(&self, user_id: &str, arts: &[SavedArt]) -> Result<(), StorageError> {
        json_file::write_json(&json_file::user_file(&self.root, user_id), &arts).await
    }
}

#[async_trait]
impl GalleryStore for FsGalleryStore {
    async fn list_art(&self, user_id: &str) -> Result<Vec<SavedArt>, StorageError> {
        self.load(user_id).await
    }

    async fn save_art(&self, user_id: &str, art: SavedArt) -> Result<SavedArt, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut arts = self.load(user_id).await?;
        arts.insert(0, art.clone());
        arts.truncate(GALLERY_CAPACITY);
        self.store(user_id, &arts).await?;
        Ok(art)
    }

    async fn get_art(&self, user_id: &str, art_id: &str) -> Result<Option<SavedArt>, StorageError> {
        Ok(self.load(user_id).await?.into_iter().find(|a| a.id == art_id))
    }

    async fn delete_art(&self, user_id: &str, art_id: &str) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut arts = self.load(user_id).await?;
        let before = arts.len();
        arts.retain(|a| a.id != art_id);
        self.store(user_id, &arts).await?;
        Ok(arts.len() != before)
    }
}
