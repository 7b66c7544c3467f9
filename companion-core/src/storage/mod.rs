//! Storage abstractions for progress records and gallery items
//!
//! Two implementations of each store are available:
//!
//! - `Memory*Store` - In-memory storage (default, no persistence)
//! - `Fs*Store` - One JSON file per user under a root directory
//!
//! Both implement the same trait, making them interchangeable behind an
//! `Arc<dyn ...>` in the route state.

pub mod implementations;
pub mod traits;
pub mod types;

pub use implementations::fs::{FsGalleryStore, FsProgressStore};
pub use implementations::memory::{MemoryGalleryStore, MemoryProgressStore};
pub use traits::{GalleryStore, ProgressStore};
pub use types::{GALLERY_CAPACITY, ProgressFields, ProgressRecord, SavedArt};
