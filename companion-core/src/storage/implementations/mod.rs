//! Storage implementations
//!
//! - `memory/` - In-memory storage, the default for progress and used in tests
//! - `fs/` - JSON files on disk, one per user

pub mod fs;
pub mod memory;
