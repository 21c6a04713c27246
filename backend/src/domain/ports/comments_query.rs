//! Driving port for comment reads.

use async_trait::async_trait;

use crate::domain::{CampgroundId, Comment, CommentId, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsQuery: Send + Sync {
    /// Comments of one campground in creation order.
    async fn list(&self, campground_id: &CampgroundId) -> Result<Vec<Comment>, Error>;

    /// Fetch a comment belonging to `campground_id`.
    async fn find(
        &self,
        campground_id: &CampgroundId,
        id: &CommentId,
    ) -> Result<Option<Comment>, Error>;
}
