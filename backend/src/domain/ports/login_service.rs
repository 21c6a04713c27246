//! Driving port for login and registration use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! infrastructure. HTTP handler tests substitute a mock instead of wiring
//! persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User};

/// Message returned for any failed login.
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid username or password";

/// Message returned when registering a taken username.
pub const DUPLICATE_USERNAME_MESSAGE: &str = "A user with the given username is already registered";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user.
    ///
    /// Unknown usernames and wrong passwords both fail with
    /// [`crate::domain::ErrorCode::Unauthorized`].
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Create an account and return the new user.
    ///
    /// A taken username fails with [`crate::domain::ErrorCode::Conflict`].
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}
