//! Storage trait definitions
//!
//! All storage traits are defined here, with implementations in `implementations/`.

mod gallery;
mod progress;

pub use gallery::GalleryStore;
pub use progress::ProgressStore;
