//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod campground_repository;
mod campgrounds_command;
mod campgrounds_query;
mod comment_repository;
mod comments_command;
mod comments_query;
mod geocoder;
mod login_service;
mod password_hasher;
mod user_repository;

#[cfg(test)]
pub use campground_repository::MockCampgroundRepository;
pub use campground_repository::{CampgroundPersistenceError, CampgroundRepository};
#[cfg(test)]
pub use campgrounds_command::MockCampgroundsCommand;
pub use campgrounds_command::{
    CAMPGROUND_NOT_FOUND_MESSAGE, CampgroundsCommand, INVALID_ADDRESS_MESSAGE,
};
#[cfg(test)]
pub use campgrounds_query::MockCampgroundsQuery;
pub use campgrounds_query::{CampgroundWithComments, CampgroundsQuery};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentPersistenceError, CommentRepository};
#[cfg(test)]
pub use comments_command::MockCommentsCommand;
pub use comments_command::{COMMENT_NOT_FOUND_MESSAGE, CommentsCommand};
#[cfg(test)]
pub use comments_query::MockCommentsQuery;
pub use comments_query::CommentsQuery;
#[cfg(test)]
pub use geocoder::MockGeocoder;
pub use geocoder::{FixtureGeocoder, Geocoder, GeocoderError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{DUPLICATE_USERNAME_MESSAGE, INVALID_LOGIN_MESSAGE, LoginService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserAccount, UserPersistenceError, UserRepository};
