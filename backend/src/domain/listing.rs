//! Campground index query model: search term escaping and paging.

use pagination::{Page, PageNumber, PageRequest, PageSize};

use super::Campground;

/// Campgrounds shown per index page.
pub const CAMPGROUND_PAGE_SIZE: PageSize = match PageSize::new(8) {
    Ok(size) => size,
    Err(_) => panic!("campground page size must be non-zero"),
};

/// Message shown when a search matches nothing.
pub const NO_MATCH_MESSAGE: &str = "No campgrounds match that query, please try again.";

/// User-supplied search text plus its escaped regular expression.
///
/// The pattern is a literal: every regex metacharacter in the input is
/// escaped, so matching never fails and only finds substrings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    pattern: String,
}

impl SearchTerm {
    /// Build a term from optional query input; blank input means no filter.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::SearchTerm;
    ///
    /// assert!(SearchTerm::parse(Some("   ")).is_none());
    /// let term = SearchTerm::parse(Some("a.b")).expect("term");
    /// assert_eq!(term.pattern(), r"a\.b");
    /// ```
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let trimmed = raw?.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            raw: trimmed.to_owned(),
            pattern: regex::escape(trimmed),
        })
    }

    /// Search text as entered, trimmed.
    pub fn as_str(&self) -> &str {
        self.raw.as_str()
    }

    /// Escaped pattern for case-insensitive regex matching.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Parameters of one index page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampgroundListingRequest {
    search: Option<SearchTerm>,
    page: PageRequest,
}

impl CampgroundListingRequest {
    /// Build a request from raw `search` and `page` query values.
    ///
    /// Missing, zero or non-numeric page values fall back to the first page.
    pub fn from_query(search: Option<&str>, page: Option<&str>) -> Self {
        Self {
            search: SearchTerm::parse(search),
            page: PageRequest::new(PageNumber::parse_or_first(page), CAMPGROUND_PAGE_SIZE),
        }
    }

    pub fn search(&self) -> Option<&SearchTerm> {
        self.search.as_ref()
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }
}

/// One page of campgrounds plus the search that produced it.
#[derive(Debug, Clone)]
pub struct CampgroundListing {
    page: Page<Campground>,
    search: Option<SearchTerm>,
}

impl CampgroundListing {
    pub fn new(page: Page<Campground>, search: Option<SearchTerm>) -> Self {
        Self { page, search }
    }

    pub fn page(&self) -> &Page<Campground> {
        &self.page
    }

    pub fn into_page(self) -> Page<Campground> {
        self.page
    }

    pub fn search(&self) -> Option<&SearchTerm> {
        self.search.as_ref()
    }

    /// [`NO_MATCH_MESSAGE`] when a search was applied and found nothing.
    pub fn no_match_message(&self) -> Option<&'static str> {
        (self.search.is_some() && self.page.total_items() == 0).then_some(NO_MATCH_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use regex::RegexBuilder;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("  \t"))]
    fn blank_search_means_no_filter(#[case] raw: Option<&str>) {
        assert!(SearchTerm::parse(raw).is_none());
    }

    #[rstest]
    #[case("(", "Camp (north)")]
    #[case("[a-z]+", "Literal [a-z]+ camp")]
    #[case(".*", "Dot .* star")]
    #[case("rest?", "Cloud's rest? maybe")]
    fn metacharacters_match_literally(#[case] raw: &str, #[case] haystack: &str) {
        let term = SearchTerm::parse(Some(raw)).expect("term");
        let re = RegexBuilder::new(term.pattern())
            .case_insensitive(true)
            .build()
            .expect("escaped pattern always compiles");
        assert!(re.is_match(haystack));
        assert!(!re.is_match("Desert Mesa"));
    }

    #[rstest]
    #[case(None, 1)]
    #[case(Some("0"), 1)]
    #[case(Some("abc"), 1)]
    #[case(Some("-3"), 1)]
    #[case(Some("3"), 3)]
    fn page_defaults_to_first(#[case] raw: Option<&str>, #[case] expected: u32) {
        let request = CampgroundListingRequest::from_query(None, raw);
        assert_eq!(request.page().number().get(), expected);
        assert_eq!(request.page().size().get(), 8);
    }

    #[rstest]
    #[case(Some("mesa"), 0, Some(NO_MATCH_MESSAGE))]
    #[case(Some("mesa"), 3, None)]
    #[case(None, 0, None)]
    fn no_match_message_only_for_empty_searches(
        #[case] search: Option<&str>,
        #[case] total: u64,
        #[case] expected: Option<&str>,
    ) {
        let request = CampgroundListingRequest::from_query(search, None);
        let page = Page::new(Vec::new(), request.page(), total);
        let listing = CampgroundListing::new(page, request.search().cloned());
        assert_eq!(listing.no_match_message(), expected);
    }
}
