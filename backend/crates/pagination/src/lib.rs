//! Page-number pagination primitives shared by listing endpoints.
//!
//! The crate is deliberately independent of backend domain types. It covers
//! three concerns:
//!
//! - parsing the user-supplied `page` query value into a [`PageNumber`],
//!   falling back to the first page for missing, malformed, or zero input;
//! - translating a [`PageRequest`] into the `offset`/`limit` pair a store
//!   needs, and computing the total page count for a match count;
//! - wrapping one page of results in a serialisable [`Page`] envelope with
//!   optional navigation [`PageLinks`].
//!
//! # Example
//!
//! ```
//! use pagination::{Page, PageNumber, PageRequest, PageSize};
//!
//! let size = PageSize::new(8).expect("non-zero page size");
//! let request = PageRequest::new(PageNumber::parse_or_first(Some("2")), size);
//! assert_eq!(request.offset(), 8);
//!
//! let page = Page::new(vec!["Desert Mesa"], request, 9);
//! assert_eq!(page.total_pages(), 2);
//! assert!(!page.has_next());
//! ```

mod envelope;
mod error;
mod links;
mod request;

pub use envelope::Page;
pub use error::PaginationError;
pub use links::PageLinks;
pub use request::{PageNumber, PageRequest, PageSize, page_count};
