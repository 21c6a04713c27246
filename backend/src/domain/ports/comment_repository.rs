//! Driven port for comment persistence.

use async_trait::async_trait;

use crate::domain::{CampgroundId, Comment, CommentId, CommentText};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by comment repository adapters.
    pub enum CommentPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
        /// The owning campground no longer exists.
        CampgroundMissing { campground_id: String } =>
            "campground {campground_id} does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments of one campground in creation order.
    async fn list_for_campground(
        &self,
        campground_id: &CampgroundId,
    ) -> Result<Vec<Comment>, CommentPersistenceError>;

    /// Fetch a comment, scoped to the campground it belongs to.
    async fn find_by_id(
        &self,
        campground_id: &CampgroundId,
        id: &CommentId,
    ) -> Result<Option<Comment>, CommentPersistenceError>;

    /// Insert a comment; fails with `CampgroundMissing` when the campground
    /// has been deleted.
    async fn insert(&self, comment: &Comment) -> Result<(), CommentPersistenceError>;

    /// Replace the comment text; `None` when the comment is gone.
    async fn update_text(
        &self,
        id: &CommentId,
        text: &CommentText,
    ) -> Result<Option<Comment>, CommentPersistenceError>;

    /// Delete a comment; `false` when nothing was deleted.
    async fn delete(&self, id: &CommentId) -> Result<bool, CommentPersistenceError>;
}
