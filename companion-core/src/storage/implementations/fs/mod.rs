//! Filesystem-backed storage implementations
//!
//! Each user gets one pretty-printed JSON file named after the percent-encoded
//! form of their id: `<root>/<encoded_user_id>.json`.

mod gallery;
mod json_file;
mod progress;

pub use gallery::FsGalleryStore;
pub use progress::FsProgressStore;
