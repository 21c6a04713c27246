//! Sign-in and sign-up payloads.
//!
//! Handlers turn raw form fields into [`LoginCredentials`] or
//! [`Registration`] before calling the account service, so the service only
//! ever sees well-formed input.

use std::fmt;

use zeroize::Zeroizing;

use super::{UserValidationError, Username};

/// Why a username/password pair was rejected before reaching the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    MissingUsername,
    /// The username breaks the rules for stored accounts.
    BadUsername(UserValidationError),
    MissingPassword,
}

impl fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUsername => f.write_str("username must not be empty"),
            Self::BadUsername(err) => fmt::Display::fmt(err, f),
            Self::MissingPassword => f.write_str("password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsError {}

// Passwords are kept verbatim; only emptiness is rejected.
fn secret(password: &str) -> Result<Zeroizing<String>, CredentialsError> {
    if password.is_empty() {
        Err(CredentialsError::MissingPassword)
    } else {
        Ok(Zeroizing::new(password.to_owned()))
    }
}

/// Login form input.
///
/// The username is only trimmed, not checked against [`Username`] rules, so
/// an unknown name fails at lookup with the generic invalid-login message.
///
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" colt ", "pw").expect("valid");
/// assert_eq!(creds.username(), "colt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialsError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(CredentialsError::MissingUsername);
        }
        Ok(Self {
            username: username.to_owned(),
            password: secret(password)?,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Sign-up form input whose username is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    password: Zeroizing<String>,
}

impl Registration {
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialsError> {
        if username.trim().is_empty() {
            return Err(CredentialsError::MissingUsername);
        }
        let username = Username::new(username).map_err(CredentialsError::BadUsername)?;
        Ok(Self {
            username,
            password: secret(password)?,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Plain text; hash before storing.
    pub fn password(&self) -> &str {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialsError::MissingUsername)]
    #[case("   ", "pw", CredentialsError::MissingUsername)]
    #[case("colt", "", CredentialsError::MissingPassword)]
    fn login_rejects_missing_fields(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: CredentialsError,
    ) {
        assert_eq!(
            LoginCredentials::try_from_parts(username, password),
            Err(expected)
        );
    }

    #[rstest]
    fn login_keeps_password_whitespace() {
        let creds = LoginCredentials::try_from_parts("ab", " pw ").expect("valid");
        assert_eq!(creds.username(), "ab");
        assert_eq!(creds.password(), " pw ");
    }

    #[rstest]
    #[case("", "pw", CredentialsError::MissingUsername)]
    #[case("ab", "pw", CredentialsError::BadUsername(UserValidationError::UsernameTooShort { min: 3 }))]
    #[case("colt", "", CredentialsError::MissingPassword)]
    fn registration_applies_username_rules(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: CredentialsError,
    ) {
        assert_eq!(Registration::try_from_parts(username, password), Err(expected));
    }

    #[rstest]
    fn registration_trims_username() {
        let registration = Registration::try_from_parts(" colt ", "pw").expect("valid");
        assert_eq!(registration.username().as_ref(), "colt");
        assert_eq!(registration.password(), "pw");
    }
}
