use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "voicecompanion";

/// Gallery location on hosts with a read-only filesystem outside /tmp.
const PRODUCTION_GALLERY_DIR: &str = "/tmp/gallery";

pub struct PathManager;

impl PathManager {
    /// Platform data directory joined with the application name.
    /// Falls back to `./data` when the platform has no notion of one.
    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    pub fn gallery_dir(data_dir: &Path, production: bool) -> PathBuf {
        if production {
            PathBuf::from(PRODUCTION_GALLERY_DIR)
        } else {
            data_dir.join("gallery")
        }
    }

    pub fn progress_dir(data_dir: &Path) -> PathBuf {
        data_dir.join("progress")
    }
}
