//! Core logic for the companion backend
//!
//! This crate provides:
//! - **Storage**: `ProgressStore` and `GalleryStore` traits with in-memory and
//!   file-backed implementations
//! - **Progress**: conversation bookkeeping folded into progress records
//! - **Feedback**: `FeedbackAggregator` and the total `format_feedback`
//! - **Guidance**: `GuidanceFormatter` relaying single-frame scene guidance
//! - **Gallery**: validated save/get/delete over a `GalleryStore`
//! - **Personalization**: skill level, difficulty and tips read off progress
//! - **Conversation**: `ConversationService` replying with text and speech
//!
//! Collaborators are injected as trait objects from the `clients` crate, so
//! everything here can be exercised with stubs.
pub mod conversation;
pub mod error;
pub mod feedback;
pub mod gallery;
pub mod guidance;
pub mod personalization;
pub mod progress;
pub mod storage;

pub use conversation::{ConversationReply, ConversationService};
pub use error::{Error, Result, StorageError};
pub use feedback::{FeedbackAggregator, FeedbackResult, format_feedback};
pub use guidance::{GuidanceFormatter, SceneDescription};
pub use personalization::{AdaptiveDifficulty, Level, SkillLevel};
pub use progress::{ConversationOutcome, record_conversation};
pub use storage::{
    FsGalleryStore, FsProgressStore, GalleryStore, MemoryGalleryStore, MemoryProgressStore,
    ProgressFields, ProgressRecord, ProgressStore, SavedArt,
};

/// User id assumed when a request does not name one
pub const DEFAULT_USER_ID: &str = "default";

/// Resolve an optional, possibly blank user id to the one used for storage
pub fn user_id_or_default(user_id: Option<&str>) -> &str {
    match user_id.map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => DEFAULT_USER_ID,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_or_default() {
        assert_eq!(user_id_or_default(None), "default");
        assert_eq!(user_id_or_default(Some("")), "default");
        assert_eq!(user_id_or_default(Some("  ")), "default");
        assert_eq!(user_id_or_default(Some("u1")), "u1");
    }
}
