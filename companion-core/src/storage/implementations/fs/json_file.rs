//! Shared file handling for the JSON-per-user stores

use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::StorageError;

/// Percent-encode a user id into a file stem. The mapping is injective, so
/// distinct ids never share a file, and the stem never contains a separator.
pub(crate) fn file_stem(user_id: &str) -> String {
    urlencoding::encode(user_id).into_owned()
}

pub(crate) fn user_file(root: &Path, user_id: &str) -> PathBuf {
    root.join(format!("{}.json", file_stem(user_id)))
}

/// Parsed file contents, or `None` if the file does not exist
pub(crate) async fn read_json(path: &Path) -> Result<Option<serde_json::Value>, StorageError> {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StorageError::io(path, e)),
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
}

/// Write atomically using a temp file in the same directory
pub(crate) async fn write_json(path: &Path, value: &impl Serialize) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(value)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::io(parent, e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path)
        .await
        .map_err(|e| StorageError::io(&temp_path, e))?;
    file.write_all(json.as_bytes())
        .await
        .map_err(|e| StorageError::io(&temp_path, e))?;
    file.sync_all()
        .await
        .map_err(|e| StorageError::io(&temp_path, e))?;
    fs::rename(&temp_path, path)
        .await
        .map_err(|e| StorageError::io(path, e))?;

    Ok(())
}
