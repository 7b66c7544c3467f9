//! Gallery operations with request validation on top of a `GalleryStore`

use crate::storage::{GalleryStore, SavedArt};
use crate::{Error, Result};

pub async fn save_art(
    store: &dyn GalleryStore,
    user_id: &str,
    image: Option<&str>,
    prompt: Option<&str>,
    style: Option<&str>,
) -> Result<SavedArt> {
    let (Some(image), Some(prompt)) = (non_empty(image), non_empty(prompt)) else {
        return Err(Error::validation("Image and prompt are required"));
    };
    let art = SavedArt::new(image.to_string(), prompt.to_string(), style.map(str::to_string), user_id);
    tracing::info!(user_id, art_id = %art.id, "Saving art to gallery");
    Ok(store.save_art(user_id, art).await?)
}

pub async fn get_art(store: &dyn GalleryStore, user_id: &str, art_id: &str) -> Result<SavedArt> {
    store
        .get_art(user_id, art_id)
        .await?
        .ok_or_else(|| Error::NotFound("Art not found".to_string()))
}

/// Deleting an id that is not there still succeeds
pub async fn delete_art(store: &dyn GalleryStore, user_id: &str, art_id: &str) -> Result<()> {
    if !store.delete_art(user_id, art_id).await? {
        tracing::debug!(user_id, art_id, "Delete requested for unknown art");
    }
    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
