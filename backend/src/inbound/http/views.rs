//! JSON view models, one per page.
//!
//! Each view bundles its data with the [`PageContext`] so a template (or a
//! test) sees exactly what the page would render.

use pagination::{Page, PageLinks};
use serde::Serialize;
use url::Url;

use super::flash::PageContext;
use crate::domain::ports::CampgroundWithComments;
use crate::domain::{Campground, CampgroundListing, Comment};

/// Landing page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingView {
    pub context: PageContext,
}

/// Which credentials form is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthForm {
    Login,
    Register,
}

/// Login or registration form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthFormView {
    pub context: PageContext,
    pub form: AuthForm,
}

/// Campground index with paging links and the active search.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampgroundIndexView {
    pub context: PageContext,
    pub campgrounds: Page<Campground>,
    pub links: PageLinks,
    pub search: Option<String>,
    pub no_match: Option<&'static str>,
}

impl CampgroundIndexView {
    pub fn new(context: PageContext, listing: CampgroundListing, request_url: &Url) -> Self {
        let search = listing.search().map(|term| term.as_str().to_owned());
        let no_match = listing.no_match_message();
        let campgrounds = listing.into_page();
        Self {
            context,
            links: PageLinks::for_page(request_url, &campgrounds),
            campgrounds,
            search,
            no_match,
        }
    }
}

/// Blank campground form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampgroundView {
    pub context: PageContext,
}

/// Campground show page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampgroundShowView {
    pub context: PageContext,
    pub campground: Campground,
    pub comments: Vec<Comment>,
}

impl CampgroundShowView {
    pub fn new(context: PageContext, found: CampgroundWithComments) -> Self {
        let CampgroundWithComments {
            campground,
            comments,
        } = found;
        Self {
            context,
            campground,
            comments,
        }
    }
}

/// Campground edit form, prefilled.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCampgroundView {
    pub context: PageContext,
    pub campground: Campground,
}

/// Comments of one campground.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListView {
    pub context: PageContext,
    pub campground: Campground,
    pub comments: Vec<Comment>,
}

/// Blank comment form for a campground.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommentView {
    pub context: PageContext,
    pub campground: Campground,
}

/// A single comment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub context: PageContext,
    pub comment: Comment,
}

/// Comment edit form, prefilled.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCommentView {
    pub context: PageContext,
    pub campground_id: String,
    pub comment: Comment,
}
