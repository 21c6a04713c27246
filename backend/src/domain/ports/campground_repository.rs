//! Driven port for campground persistence.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Campground, CampgroundDetails, CampgroundId, CampgroundListingRequest};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by campground repository adapters.
    pub enum CampgroundPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "campground repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "campground repository query failed: {message}",
    }
}

/// Storage for campgrounds.
///
/// Returned campgrounds carry their comment ids in creation order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampgroundRepository: Send + Sync {
    /// One page of campgrounds ordered by creation time then id, filtered
    /// by the request's search pattern, with the total match count.
    async fn list(
        &self,
        request: &CampgroundListingRequest,
    ) -> Result<Page<Campground>, CampgroundPersistenceError>;

    /// Fetch a campground by identifier.
    async fn find_by_id(
        &self,
        id: &CampgroundId,
    ) -> Result<Option<Campground>, CampgroundPersistenceError>;

    /// Insert a new campground.
    async fn insert(&self, campground: &Campground) -> Result<(), CampgroundPersistenceError>;

    /// Replace the editable fields; `None` when the campground is gone.
    async fn update(
        &self,
        id: &CampgroundId,
        details: &CampgroundDetails,
    ) -> Result<Option<Campground>, CampgroundPersistenceError>;

    /// Atomically delete a campground and all its comments.
    ///
    /// Returns `false` when nothing was deleted.
    async fn delete_with_comments(
        &self,
        id: &CampgroundId,
    ) -> Result<bool, CampgroundPersistenceError>;

    /// Delete every campground and comment, returning the campground count.
    async fn delete_all(&self) -> Result<u64, CampgroundPersistenceError>;
}
