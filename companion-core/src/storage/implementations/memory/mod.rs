//! In-memory storage implementations
//!
//! Data lives for the lifetime of the process. This is the default progress
//! backend and the one used in tests.

mod gallery;
mod progress;

pub use gallery::MemoryGalleryStore;
pub use progress::MemoryProgressStore;
