//! Registered users.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum username length, in characters.
pub const USERNAME_MIN: usize = 3;
/// Maximum username length, in characters.
pub const USERNAME_MAX: usize = 32;

static USERNAME_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.\-]+$")
        .unwrap_or_else(|error| panic!("username pattern failed to compile: {error}"))
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyUsername,
    UsernameTooShort { min: usize },
    UsernameTooLong { max: usize },
    UsernameInvalidCharacters,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => f.write_str("user id must not be empty"),
            Self::InvalidId => f.write_str("user id must be a hyphenated UUID"),
            Self::EmptyUsername => f.write_str("username must not be empty"),
            Self::UsernameTooShort { min } => write!(f, "username needs at least {min} characters"),
            Self::UsernameTooLong { max } => write!(f, "username allows at most {max} characters"),
            Self::UsernameInvalidCharacters => {
                f.write_str("username may use letters, digits, '.', '-' and '_' only")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Identifier assigned to a user at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a hyphenated UUID. Surrounding whitespace is rejected, not trimmed.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = raw.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Uuid::try_parse(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Login name, unique across users.
///
/// ```
/// use backend::domain::Username;
///
/// assert_eq!(Username::new("  colt ").expect("valid").as_ref(), "colt");
/// assert!(Username::new("two words").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Trim, then check length and character set.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        let name = raw.trim();
        let length = name.chars().count();
        match length {
            0 => Err(UserValidationError::EmptyUsername),
            n if n < USERNAME_MIN => Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN }),
            n if n > USERNAME_MAX => Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX }),
            _ if !USERNAME_CHARS.is_match(name) => {
                Err(UserValidationError::UsernameInvalidCharacters)
            }
            _ => Ok(Self(name.to_owned())),
        }
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A signed-up user as seen by the rest of the app. The password hash lives
/// only in `UserAccount`.
///
/// Deserialising revalidates both fields, so a tampered session cookie cannot
/// smuggle in a malformed user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: Username,
}

impl User {
    pub fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    pub fn try_from_strings(
        id: impl AsRef<str>,
        username: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(UserId::new(id)?, Username::new(username)?))
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }
}
