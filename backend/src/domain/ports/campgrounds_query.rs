//! Driving port for campground reads.

use async_trait::async_trait;

use crate::domain::{Campground, CampgroundId, CampgroundListing, CampgroundListingRequest, Comment, Error};

/// A campground with its comments loaded, for the show page.
#[derive(Debug, Clone, PartialEq)]
pub struct CampgroundWithComments {
    pub campground: Campground,
    pub comments: Vec<Comment>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampgroundsQuery: Send + Sync {
    /// Index page for the given search and page number.
    async fn list(&self, request: &CampgroundListingRequest) -> Result<CampgroundListing, Error>;

    /// Fetch one campground.
    async fn find(&self, id: &CampgroundId) -> Result<Option<Campground>, Error>;

    /// Fetch one campground together with its comments in creation order.
    async fn find_with_comments(
        &self,
        id: &CampgroundId,
    ) -> Result<Option<CampgroundWithComments>, Error>;
}
