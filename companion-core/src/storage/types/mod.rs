//! Storage types
//!
//! Shared types used by storage traits and implementations.

pub mod gallery;
pub mod progress;

pub use gallery::{GALLERY_CAPACITY, SavedArt};
pub use progress::{ProgressFields, ProgressRecord};
