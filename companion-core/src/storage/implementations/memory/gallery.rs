//! In-memory GalleryStore implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::error::StorageError;
use crate::storage::traits::GalleryStore;
use crate::storage::types::{GALLERY_CAPACITY, SavedArt};

#[derive(Debug, Default)]
pub struct MemoryGalleryStore {
    galleries: Mutex<HashMap<String, Vec<SavedArt>>>,
}

impl MemoryGalleryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GalleryStore for MemoryGalleryStore {
    async fn list_art(&self, user_id: &str) -> Result<Vec<SavedArt>, StorageError> {
        let galleries = self.galleries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(galleries.get(user_id).cloned().unwrap_or_default())
    }

    async fn save_art(&self, user_id: &str, art: SavedArt) -> Result<SavedArt, StorageError> {
        let mut galleries = self.galleries.lock().unwrap_or_else(PoisonError::into_inner);
        let arts = galleries.entry(user_id.to_string()).or_default();
        arts.insert(0, art.clone());
        arts.truncate(GALLERY_CAPACITY);
        Ok(art)
    }

    async fn get_art(&self, user_id: &str, art_id: &str) -> Result<Option<SavedArt>, StorageError> {
        let galleries = self.galleries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(galleries
            .get(user_id)
            .and_then(|arts| arts.iter().find(|a| a.id == art_id).cloned()))
    }

    async fn delete_art(&self, user_id: &str, art_id: &str) -> Result<bool, StorageError> {
        let mut galleries = self.galleries.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(arts) = galleries.get_mut(user_id) else {
            return Ok(false);
        };
        let before = arts.len();
        arts.retain(|a| a.id != art_id);
        Ok(arts.len() != before)
    }
}
