//! Page number parsing and offset arithmetic.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::PaginationError;

/// One-based page number.
///
/// ## Invariants
/// - Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Validate and construct a page number.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageNumber`] when `value` is zero.
    pub const fn new(value: u32) -> Result<Self, PaginationError> {
        match NonZeroU32::new(value) {
            Some(number) => Ok(Self(number)),
            None => Err(PaginationError::ZeroPageNumber),
        }
    }

    /// Parse a raw query value, falling back to [`PageNumber::FIRST`].
    ///
    /// Missing, blank, non-numeric, negative, overflowing, and zero inputs
    /// all resolve to the first page.
    ///
    /// ```
    /// use pagination::PageNumber;
    ///
    /// assert_eq!(PageNumber::parse_or_first(Some("3")).get(), 3);
    /// assert_eq!(PageNumber::parse_or_first(Some("0")), PageNumber::FIRST);
    /// assert_eq!(PageNumber::parse_or_first(Some("two")), PageNumber::FIRST);
    /// assert_eq!(PageNumber::parse_or_first(None), PageNumber::FIRST);
    /// ```
    #[must_use]
    pub fn parse_or_first(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .and_then(|value| value.parse::<u32>().ok())
            .and_then(|value| Self::new(value).ok())
            .unwrap_or(Self::FIRST)
    }

    /// Numeric value of the page.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// The page before this one, if any.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.get()
            .checked_sub(1)
            .and_then(|value| Self::new(value).ok())
    }

    /// The page after this one, saturating at `u32::MAX`.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for PageNumber {
    type Error = PaginationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageNumber> for u32 {
    fn from(value: PageNumber) -> Self {
        value.get()
    }
}

/// Number of items on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageSize(NonZeroU32);

impl PageSize {
    /// Validate and construct a page size.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageSize`] when `value` is zero.
    pub const fn new(value: u32) -> Result<Self, PaginationError> {
        match NonZeroU32::new(value) {
            Some(size) => Ok(Self(size)),
            None => Err(PaginationError::ZeroPageSize),
        }
    }

    /// Numeric value of the page size.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for PageSize {
    type Error = PaginationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for u32 {
    fn from(value: PageSize) -> Self {
        value.get()
    }
}

/// A requested page: which page and how many items per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    number: PageNumber,
    size: PageSize,
}

impl PageRequest {
    /// Combine a page number and size.
    #[must_use]
    pub const fn new(number: PageNumber, size: PageSize) -> Self {
        Self { number, size }
    }

    /// Requested page number.
    #[must_use]
    pub const fn number(&self) -> PageNumber {
        self.number
    }

    /// Requested page size.
    #[must_use]
    pub const fn size(&self) -> PageSize {
        self.size
    }

    /// Number of items to skip before this page starts.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.number.get() - 1) * u64::from(self.size.get())
    }

    /// Maximum number of items on this page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.size.get()
    }
}

/// Total number of pages needed to show `total_items`.
///
/// ```
/// use pagination::{PageSize, page_count};
///
/// let size = PageSize::new(8).expect("non-zero page size");
/// assert_eq!(page_count(0, size), 0);
/// assert_eq!(page_count(8, size), 1);
/// assert_eq!(page_count(9, size), 2);
/// ```
#[must_use]
pub const fn page_count(total_items: u64, size: PageSize) -> u64 {
    total_items.div_ceil(size.get() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn size(value: u32) -> PageSize {
        PageSize::new(value).expect("non-zero size")
    }

    #[rstest]
    #[case(None, 1)]
    #[case(Some(""), 1)]
    #[case(Some("   "), 1)]
    #[case(Some("0"), 1)]
    #[case(Some("-2"), 1)]
    #[case(Some("1.5"), 1)]
    #[case(Some("abc"), 1)]
    #[case(Some("99999999999"), 1)]
    #[case(Some("1"), 1)]
    #[case(Some(" 4 "), 4)]
    #[case(Some("12"), 12)]
    fn parse_or_first_defaults_invalid_input(#[case] raw: Option<&str>, #[case] expected: u32) {
        assert_eq!(PageNumber::parse_or_first(raw).get(), expected);
    }

    #[rstest]
    fn zero_values_are_rejected() {
        assert_eq!(PageNumber::new(0), Err(PaginationError::ZeroPageNumber));
        assert_eq!(PageSize::new(0), Err(PaginationError::ZeroPageSize));
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 8)]
    #[case(5, 32)]
    fn offset_skips_previous_pages(#[case] number: u32, #[case] expected: u64) {
        let request = PageRequest::new(PageNumber::new(number).expect("page"), size(8));
        assert_eq!(request.offset(), expected);
        assert_eq!(request.limit(), 8);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(7, 1)]
    #[case(8, 1)]
    #[case(9, 2)]
    #[case(16, 2)]
    #[case(17, 3)]
    fn page_count_rounds_up(#[case] total: u64, #[case] expected: u64) {
        assert_eq!(page_count(total, size(8)), expected);
    }

    #[rstest]
    fn previous_and_next_walk_the_sequence() {
        let first = PageNumber::FIRST;
        assert_eq!(first.previous(), None);
        let second = first.next();
        assert_eq!(second.get(), 2);
        assert_eq!(second.previous(), Some(first));
    }

    #[rstest]
    fn page_number_deserialisation_rejects_zero() {
        let parsed: Result<PageNumber, _> = serde_json::from_str("0");
        assert!(parsed.is_err());
        let parsed: PageNumber = serde_json::from_str("3").expect("valid page");
        assert_eq!(parsed.get(), 3);
    }
}
