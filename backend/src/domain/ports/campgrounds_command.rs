//! Driving port for campground mutations.

use async_trait::async_trait;

use crate::domain::{Author, Campground, CampgroundDraft, CampgroundId, Error};

/// Message returned when an address cannot be geocoded.
pub const INVALID_ADDRESS_MESSAGE: &str = "Invalid address";

/// Message returned when a campground lookup finds nothing.
pub const CAMPGROUND_NOT_FOUND_MESSAGE: &str = "Campground not found";

/// Campground use-cases that change state.
///
/// Ownership is checked by the caller before update and delete.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampgroundsCommand: Send + Sync {
    /// Geocode the draft's location once and store a new campground.
    ///
    /// Fails with [`INVALID_ADDRESS_MESSAGE`] and writes nothing when the
    /// address cannot be resolved.
    async fn create(&self, author: &Author, draft: CampgroundDraft) -> Result<Campground, Error>;

    /// Geocode the draft's location once and replace the editable fields.
    async fn update(&self, id: &CampgroundId, draft: CampgroundDraft) -> Result<Campground, Error>;

    /// Delete the campground and all of its comments atomically.
    async fn delete(&self, id: &CampgroundId) -> Result<(), Error>;
}
