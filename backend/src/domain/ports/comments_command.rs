//! Driving port for comment mutations.

use async_trait::async_trait;

use crate::domain::{Author, CampgroundId, Comment, CommentId, CommentText, Error};

/// Message returned when a comment lookup finds nothing.
pub const COMMENT_NOT_FOUND_MESSAGE: &str = "Comment not found";

/// Comment use-cases that change state.
///
/// Ownership is checked by the caller before update and delete.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsCommand: Send + Sync {
    /// Add a comment; fails with not found when the campground is gone.
    async fn create(
        &self,
        campground_id: &CampgroundId,
        author: &Author,
        text: CommentText,
    ) -> Result<Comment, Error>;

    /// Replace a comment's text.
    async fn update(&self, id: &CommentId, text: CommentText) -> Result<Comment, Error>;

    /// Delete a comment, detaching it from its campground.
    async fn delete(&self, id: &CommentId) -> Result<(), Error>;
}
