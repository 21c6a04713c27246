//! Domain primitives, aggregates and use-case services.
//!
//! Purpose: Define strongly typed entities for users, campgrounds and
//! comments, the ownership rule that guards their mutation, and the listing
//! query model. Adapters talk to the domain only through [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`) — transport agnostic failure payload.
//! - Campground / Comment / User — listed entities and their owners.
//! - authorize / AccessDenial — the ownership check behind the HTTP guards.
//! - CampgroundListingRequest / CampgroundListing — index query and result.
//! - CampgroundService / CommentService / AccountService — port
//!   implementations.

pub mod account_service;
pub mod auth;
pub mod campground;
pub mod campground_service;
pub mod comment;
pub mod comment_service;
pub mod error;
pub mod listing;
pub mod ownership;
pub mod ports;
pub mod seed;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{CredentialsError, LoginCredentials, Registration};
pub use self::campground::{
    Author, CAMPGROUND_NAME_MAX, Campground, CampgroundDetails, CampgroundDraft, CampgroundId,
    CampgroundName, CampgroundValidationError, DEFAULT_IMAGE_URL, Description, ImageUrl, Location,
    Price,
};
pub use self::campground_service::CampgroundService;
pub use self::comment::{
    COMMENT_TEXT_MAX, Comment, CommentId, CommentText, CommentValidationError,
};
pub use self::comment_service::CommentService;
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::listing::{
    CAMPGROUND_PAGE_SIZE, CampgroundListing, CampgroundListingRequest, NO_MATCH_MESSAGE,
    SearchTerm,
};
pub use self::ownership::{AccessDenial, Owned, authorize};
pub use self::seed::{CampgroundSeeder, SAMPLE_CAMPGROUNDS, SeedError, SeedOutcome};
pub use self::trace_id::TraceId;
pub use self::user::{User, UserId, UserValidationError, Username};

/// Convenient result alias for use-case calls.
///
/// # Examples
/// ```
/// use backend::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<()> {
///     Err(Error::not_found("Campground not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
