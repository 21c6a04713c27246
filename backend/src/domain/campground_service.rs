//! Campground domain services.
//!
//! Implements the campground driving ports over the repository and geocoder
//! driven ports. Create and update resolve the submitted address exactly once
//! before anything is written.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::warn;

use crate::domain::ports::{
    CAMPGROUND_NOT_FOUND_MESSAGE, CampgroundPersistenceError, CampgroundRepository,
    CampgroundWithComments, CampgroundsCommand, CampgroundsQuery, CommentPersistenceError,
    CommentRepository, Geocoder, INVALID_ADDRESS_MESSAGE,
};
use crate::domain::{
    Author, Campground, CampgroundDetails, CampgroundDraft, CampgroundId, CampgroundListing,
    CampgroundListingRequest, Error,
};

/// Campground service implementing the read and write driving ports.
#[derive(Clone)]
pub struct CampgroundService<C, M, G> {
    campgrounds: Arc<C>,
    comments: Arc<M>,
    geocoder: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<C, M, G> CampgroundService<C, M, G> {
    /// Create a new service with the given adapters.
    pub fn new(
        campgrounds: Arc<C>,
        comments: Arc<M>,
        geocoder: Arc<G>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            campgrounds,
            comments,
            geocoder,
            clock,
        }
    }
}

pub(crate) fn map_campground_error(error: CampgroundPersistenceError) -> Error {
    match error {
        CampgroundPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("campground repository unavailable: {message}"))
        }
        CampgroundPersistenceError::Query { message } => {
            Error::internal(format!("campground repository error: {message}"))
        }
    }
}

pub(crate) fn map_comment_error(error: CommentPersistenceError) -> Error {
    match error {
        CommentPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("comment repository unavailable: {message}"))
        }
        CommentPersistenceError::Query { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
        CommentPersistenceError::CampgroundMissing { .. } => {
            Error::not_found(CAMPGROUND_NOT_FOUND_MESSAGE)
        }
    }
}

impl<C, M, G> CampgroundService<C, M, G>
where
    G: Geocoder,
{
    async fn locate(&self, draft: CampgroundDraft) -> Result<CampgroundDetails, Error> {
        let found = match self.geocoder.geocode(draft.location_query()).await {
            Ok(found) => found,
            Err(err) => {
                warn!(error = %err, address = draft.location_query(), "geocoding failed");
                return Err(Error::invalid_request(INVALID_ADDRESS_MESSAGE));
            }
        };
        let Some(location) = found.into_iter().next() else {
            warn!(address = draft.location_query(), "address did not resolve");
            return Err(Error::invalid_request(INVALID_ADDRESS_MESSAGE));
        };
        Ok(draft.locate(location))
    }
}

#[async_trait]
impl<C, M, G> CampgroundsQuery for CampgroundService<C, M, G>
where
    C: CampgroundRepository,
    M: CommentRepository,
    G: Geocoder,
{
    async fn list(&self, request: &CampgroundListingRequest) -> Result<CampgroundListing, Error> {
        let page = self
            .campgrounds
            .list(request)
            .await
            .map_err(map_campground_error)?;
        Ok(CampgroundListing::new(page, request.search().cloned()))
    }

    async fn find(&self, id: &CampgroundId) -> Result<Option<Campground>, Error> {
        self.campgrounds
            .find_by_id(id)
            .await
            .map_err(map_campground_error)
    }

    async fn find_with_comments(
        &self,
        id: &CampgroundId,
    ) -> Result<Option<CampgroundWithComments>, Error> {
        let Some(campground) = self.find(id).await? else {
            return Ok(None);
        };
        let comments = self
            .comments
            .list_for_campground(id)
            .await
            .map_err(map_comment_error)?;
        Ok(Some(CampgroundWithComments {
            campground,
            comments,
        }))
    }
}

#[async_trait]
impl<C, M, G> CampgroundsCommand for CampgroundService<C, M, G>
where
    C: CampgroundRepository,
    M: CommentRepository,
    G: Geocoder,
{
    async fn create(&self, author: &Author, draft: CampgroundDraft) -> Result<Campground, Error> {
        let details = self.locate(draft).await?;
        let campground = Campground::new(
            CampgroundId::random(),
            details,
            author.clone(),
            self.clock.utc(),
        );
        self.campgrounds
            .insert(&campground)
            .await
            .map_err(map_campground_error)?;
        Ok(campground)
    }

    async fn update(&self, id: &CampgroundId, draft: CampgroundDraft) -> Result<Campground, Error> {
        let details = self.locate(draft).await?;
        self.campgrounds
            .update(id, &details)
            .await
            .map_err(map_campground_error)?
            .ok_or_else(|| Error::not_found(CAMPGROUND_NOT_FOUND_MESSAGE))
    }

    async fn delete(&self, id: &CampgroundId) -> Result<(), Error> {
        let deleted = self
            .campgrounds
            .delete_with_comments(id)
            .await
            .map_err(map_campground_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(CAMPGROUND_NOT_FOUND_MESSAGE))
        }
    }
}

#[cfg(test)]
#[path = "campground_service_tests.rs"]
mod tests;
