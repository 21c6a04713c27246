//! Navigation links for page envelopes.

use serde::Serialize;
use url::Url;

use crate::{Page, PageNumber};

const PAGE_PARAM: &str = "page";

/// Links to neighbouring pages, derived from the request URL.
///
/// Every query parameter other than `page` is preserved, so a search term
/// survives page navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLinks {
    #[serde(rename = "self")]
    current: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last: Option<String>,
}

impl PageLinks {
    /// Build links for `page` relative to `base`.
    ///
    /// ```
    /// use pagination::{Page, PageLinks, PageNumber, PageRequest, PageSize};
    /// use url::Url;
    ///
    /// let base = Url::parse("http://localhost/campgrounds?search=mesa").expect("url");
    /// let request = PageRequest::new(PageNumber::FIRST, PageSize::new(8).expect("size"));
    /// let page = Page::new(vec![(); 8], request, 12);
    /// let links = PageLinks::for_page(&base, &page);
    /// assert_eq!(
    ///     links.next(),
    ///     Some("http://localhost/campgrounds?search=mesa&page=2")
    /// );
    /// ```
    #[must_use]
    pub fn for_page<T>(base: &Url, page: &Page<T>) -> Self {
        let current = page.page();
        let last = u32::try_from(page.total_pages())
            .ok()
            .and_then(|value| PageNumber::new(value).ok());

        Self {
            current: with_page(base, current),
            first: page.has_previous().then(|| with_page(base, PageNumber::FIRST)),
            previous: current.previous().map(|number| with_page(base, number)),
            next: page.has_next().then(|| with_page(base, current.next())),
            last: last
                .filter(|number| *number != current)
                .map(|number| with_page(base, number)),
        }
    }

    /// Link to the current page.
    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Link to the first page when not already on it.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.first.as_deref()
    }

    /// Link to the previous page, if any.
    #[must_use]
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Link to the next page, if any.
    #[must_use]
    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// Link to the last page when not already on it.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

fn with_page(base: &Url, number: PageNumber) -> String {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(retained);
        pairs.append_pair(PAGE_PARAM, &number.to_string());
    }
    url.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PageRequest, PageSize};
    use rstest::rstest;

    fn page(number: u32, total: u64) -> Page<()> {
        let request = PageRequest::new(
            PageNumber::new(number).expect("page"),
            PageSize::new(8).expect("size"),
        );
        Page::new(Vec::new(), request, total)
    }

    fn base(raw: &str) -> Url {
        Url::parse(raw).expect("valid url")
    }

    #[rstest]
    fn middle_page_links_both_directions() {
        let links = PageLinks::for_page(&base("http://host/campgrounds?page=2"), &page(2, 24));
        assert_eq!(links.current(), "http://host/campgrounds?page=2");
        assert_eq!(links.first(), Some("http://host/campgrounds?page=1"));
        assert_eq!(links.previous(), Some("http://host/campgrounds?page=1"));
        assert_eq!(links.next(), Some("http://host/campgrounds?page=3"));
        assert_eq!(links.last(), Some("http://host/campgrounds?page=3"));
    }

    #[rstest]
    fn single_page_has_no_navigation() {
        let links = PageLinks::for_page(&base("http://host/campgrounds"), &page(1, 3));
        assert_eq!(links.first(), None);
        assert_eq!(links.previous(), None);
        assert_eq!(links.next(), None);
        assert_eq!(links.last(), None);
    }

    #[rstest]
    fn search_parameter_is_preserved_and_encoded() {
        let links = PageLinks::for_page(
            &base("http://host/campgrounds?search=a%26b&page=1"),
            &page(1, 9),
        );
        assert_eq!(
            links.next(),
            Some("http://host/campgrounds?search=a%26b&page=2")
        );
    }

    #[rstest]
    fn empty_result_has_no_last_link() {
        let links = PageLinks::for_page(&base("http://host/campgrounds"), &page(1, 0));
        assert_eq!(links.last(), None);
        assert_eq!(links.next(), None);
    }
}
