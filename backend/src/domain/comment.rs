//! Campground comments.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{Author, CampgroundId};

/// Maximum number of characters in a comment.
pub const COMMENT_TEXT_MAX: usize = 2000;

/// Validation failures for comment form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentValidationError {
    EmptyText,
    TextTooLong { max: usize },
}

impl fmt::Display for CommentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyText => write!(f, "Comment must not be empty"),
            Self::TextTooLong { max } => write!(f, "Comment must be at most {max} characters"),
        }
    }
}

impl std::error::Error for CommentValidationError {}

/// Stable comment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CommentId(Uuid);

impl CommentId {
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

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for CommentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Comment body, trimmed and bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentText(String);

impl CommentText {
    pub fn new(text: impl AsRef<str>) -> Result<Self, CommentValidationError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CommentValidationError::EmptyText);
        }
        if trimmed.chars().count() > COMMENT_TEXT_MAX {
            return Err(CommentValidationError::TextTooLong {
                max: COMMENT_TEXT_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for CommentText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// A comment left on a campground.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    id: CommentId,
    campground_id: CampgroundId,
    text: CommentText,
    author: Author,
    created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        id: CommentId,
        campground_id: CampgroundId,
        text: CommentText,
        author: Author,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            campground_id,
            text,
            author,
            created_at,
        }
    }

    pub fn id(&self) -> CommentId {
        self.id
    }

    /// Campground the comment belongs to.
    pub fn campground_id(&self) -> CampgroundId {
        self.campground_id
    }

    pub fn text(&self) -> &CommentText {
        &self.text
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the body, keeping everything else.
    pub fn with_text(mut self, text: CommentText) -> Self {
        self.text = text;
        self
    }
}
