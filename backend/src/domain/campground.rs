//! Campground listing data model and form validation.
//!
//! A campground is created from a [`CampgroundDraft`] (validated form input)
//! once its free-text location has been geocoded into a [`Location`]. The
//! resulting [`CampgroundDetails`] are what create and update persist.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use super::{CommentId, User, UserId, Username};

/// Image shown for campgrounds submitted without one.
pub const DEFAULT_IMAGE_URL: &str = "https://images.unsplash.com/photo-1483400900607-becbece13e85?ixlib=rb-0.3.5&q=80&fm=jpg&crop=entropy&cs=tinysrgb&w=1080&fit=max&ixid=eyJhcHBfaWQiOjF9&s=f52873d3d006fe713e5536a359e23904";

/// Maximum number of characters in a campground name.
pub const CAMPGROUND_NAME_MAX: usize = 100;

/// Validation failures for campground form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampgroundValidationError {
    EmptyName,
    NameTooLong { max: usize },
    InvalidPrice,
    InvalidImageUrl,
    EmptyDescription,
    EmptyLocation,
}

impl fmt::Display for CampgroundValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Campground name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "Campground name must be at most {max} characters")
            }
            Self::InvalidPrice => write!(
                f,
                "Price must be a non-negative amount with at most two decimal places"
            ),
            Self::InvalidImageUrl => write!(f, "Image must be an http or https URL"),
            Self::EmptyDescription => write!(f, "Description must not be empty"),
            Self::EmptyLocation => write!(f, "Location must not be empty"),
        }
    }
}

impl std::error::Error for CampgroundValidationError {}

/// Stable campground identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CampgroundId(Uuid);

impl CampgroundId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CampgroundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for CampgroundId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Campground display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampgroundName(String);

impl CampgroundName {
    /// Validate a name, trimming surrounding whitespace.
    pub fn new(name: impl AsRef<str>) -> Result<Self, CampgroundValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CampgroundValidationError::EmptyName);
        }
        if trimmed.chars().count() > CAMPGROUND_NAME_MAX {
            return Err(CampgroundValidationError::NameTooLong {
                max: CAMPGROUND_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for CampgroundName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Nightly price kept in its submitted decimal text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Price(String);

static PRICE_RE: OnceLock<Regex> = OnceLock::new();

fn price_regex() -> &'static Regex {
    PRICE_RE.get_or_init(|| {
        Regex::new(r"^[0-9]+(\.[0-9]{1,2})?$")
            .unwrap_or_else(|error| panic!("price regex failed to compile: {error}"))
    })
}

impl Price {
    /// Validate a price such as `9`, `9.5` or `12.00`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Price;
    ///
    /// assert!(Price::new("12.50").is_ok());
    /// assert!(Price::new("-1").is_err());
    /// ```
    pub fn new(price: impl AsRef<str>) -> Result<Self, CampgroundValidationError> {
        let trimmed = price.as_ref().trim();
        if !price_regex().is_match(trimmed) {
            return Err(CampgroundValidationError::InvalidPrice);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Price {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Absolute http(s) image URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Validate an image URL; blank input yields [`DEFAULT_IMAGE_URL`].
    pub fn new(image: impl AsRef<str>) -> Result<Self, CampgroundValidationError> {
        let trimmed = image.as_ref().trim();
        if trimmed.is_empty() {
            return Ok(Self::default_image());
        }
        let parsed = Url::parse(trimmed).map_err(|_| CampgroundValidationError::InvalidImageUrl)?;
        match parsed.scheme() {
            "http" | "https" => Ok(Self(trimmed.to_owned())),
            _ => Err(CampgroundValidationError::InvalidImageUrl),
        }
    }

    /// The placeholder image.
    pub fn default_image() -> Self {
        Self(DEFAULT_IMAGE_URL.to_owned())
    }
}

impl AsRef<str> for ImageUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Free-text campground description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description(String);

impl Description {
    pub fn new(description: impl AsRef<str>) -> Result<Self, CampgroundValidationError> {
        let trimmed = description.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CampgroundValidationError::EmptyDescription);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Geocoded position of a campground.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    address: String,
    latitude: f64,
    longitude: f64,
}

impl Location {
    pub fn new(address: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            address: address.into(),
            latitude,
            longitude,
        }
    }

    /// Normalised address returned by the geocoder.
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Denormalised owner reference stored with campgrounds and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    id: UserId,
    username: Username,
}

impl Author {
    pub fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }
}

impl From<&User> for Author {
    fn from(user: &User) -> Self {
        Self::new(*user.id(), user.username().clone())
    }
}

/// Validated campground form input awaiting geocoding.
///
/// ## Invariants
/// - every field satisfies its newtype's rules.
/// - `location_query` is non-empty once trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampgroundDraft {
    name: CampgroundName,
    price: Price,
    image: ImageUrl,
    description: Description,
    location_query: String,
}

impl CampgroundDraft {
    /// Validate raw form fields.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{CampgroundDraft, DEFAULT_IMAGE_URL};
    ///
    /// let draft = CampgroundDraft::try_from_parts(
    ///     "Granite Hill",
    ///     "9.50",
    ///     "",
    ///     "Lots of granite",
    ///     "Yosemite Valley, CA",
    /// )
    /// .expect("valid form");
    /// assert_eq!(draft.image().as_ref(), DEFAULT_IMAGE_URL);
    /// ```
    pub fn try_from_parts(
        name: &str,
        price: &str,
        image: &str,
        description: &str,
        location: &str,
    ) -> Result<Self, CampgroundValidationError> {
        let location_query = location.trim();
        if location_query.is_empty() {
            return Err(CampgroundValidationError::EmptyLocation);
        }
        Ok(Self {
            name: CampgroundName::new(name)?,
            price: Price::new(price)?,
            image: ImageUrl::new(image)?,
            description: Description::new(description)?,
            location_query: location_query.to_owned(),
        })
    }

    pub fn name(&self) -> &CampgroundName {
        &self.name
    }

    pub fn price(&self) -> &Price {
        &self.price
    }

    pub fn image(&self) -> &ImageUrl {
        &self.image
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    /// Address text passed to the geocoder.
    pub fn location_query(&self) -> &str {
        self.location_query.as_str()
    }

    /// Combine the draft with its geocoded location.
    pub fn locate(self, location: Location) -> CampgroundDetails {
        let Self {
            name,
            price,
            image,
            description,
            ..
        } = self;
        CampgroundDetails {
            name,
            price,
            image,
            description,
            location,
        }
    }
}

/// Owner-editable campground fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampgroundDetails {
    name: CampgroundName,
    price: Price,
    image: ImageUrl,
    description: Description,
    location: Location,
}

impl CampgroundDetails {
    pub fn new(
        name: CampgroundName,
        price: Price,
        image: ImageUrl,
        description: Description,
        location: Location,
    ) -> Self {
        Self {
            name,
            price,
            image,
            description,
            location,
        }
    }

    pub fn name(&self) -> &CampgroundName {
        &self.name
    }

    pub fn price(&self) -> &Price {
        &self.price
    }

    pub fn image(&self) -> &ImageUrl {
        &self.image
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn location(&self) -> &Location {
        &self.location
    }
}

/// A listed campground.
///
/// `comments` holds the ids of the campground's comments in creation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campground {
    id: CampgroundId,
    #[serde(flatten)]
    details: CampgroundDetails,
    author: Author,
    comments: Vec<CommentId>,
    created_at: DateTime<Utc>,
}

impl Campground {
    pub fn new(
        id: CampgroundId,
        details: CampgroundDetails,
        author: Author,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            details,
            author,
            comments: Vec::new(),
            created_at,
        }
    }

    /// Attach the ordered comment ids loaded alongside the record.
    pub fn with_comments(mut self, comments: Vec<CommentId>) -> Self {
        self.comments = comments;
        self
    }

    pub fn id(&self) -> CampgroundId {
        self.id
    }

    pub fn details(&self) -> &CampgroundDetails {
        &self.details
    }

    pub fn name(&self) -> &CampgroundName {
        self.details.name()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn comment_ids(&self) -> &[CommentId] {
        &self.comments
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the editable fields, keeping identity, author and comments.
    pub fn with_details(mut self, details: CampgroundDetails) -> Self {
        self.details = details;
        self
    }
}
