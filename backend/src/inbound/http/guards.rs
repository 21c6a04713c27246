//! Login and ownership guards for campground and comment routes.
//!
//! Each guard either hands the handler what it needs or returns a
//! [`FlashRedirect`] with an error message already queued.

use actix_web::HttpRequest;
use tracing::warn;

use super::redirect::{FlashRedirect, fail};
use super::session::SessionContext;
use crate::domain::ports::{
    CAMPGROUND_NOT_FOUND_MESSAGE, COMMENT_NOT_FOUND_MESSAGE, CampgroundsQuery, CommentsQuery,
};
use crate::domain::{AccessDenial, Campground, CampgroundId, Comment, CommentId, User, authorize};

pub const LOGIN_REQUIRED_MESSAGE: &str = "You need to be logged in to do that";
pub const PERMISSION_DENIED_MESSAGE: &str = "You don't have permission to do that";

/// Where anonymous users are sent.
pub const LOGIN_LOCATION: &str = "/login";

/// The logged-in user, or a redirect to the login page.
pub fn require_login(session: &SessionContext) -> Result<User, FlashRedirect> {
    let principal = session
        .principal()
        .map_err(|err| fail(session, &err, FlashRedirect::to(LOGIN_LOCATION)))?;
    principal.ok_or_else(|| {
        session.flash_error(LOGIN_REQUIRED_MESSAGE);
        FlashRedirect::to(LOGIN_LOCATION)
    })
}

/// Campground at `raw_id` owned by the logged-in user.
pub async fn owned_campground(
    session: &SessionContext,
    req: &HttpRequest,
    campgrounds: &dyn CampgroundsQuery,
    raw_id: &str,
) -> Result<(User, Campground), FlashRedirect> {
    let user = require_login(session)?;
    let found = match raw_id.parse::<CampgroundId>() {
        Ok(id) => campgrounds
            .find(&id)
            .await
            .map_err(|err| fail(session, &err, FlashRedirect::back(req)))?,
        Err(_) => None,
    };
    authorize(user.id(), found)
        .map(|campground| (user, campground))
        .map_err(|denial| deny(session, req, denial, CAMPGROUND_NOT_FOUND_MESSAGE))
}

/// Comment at `raw_comment_id` under `raw_campground_id`, owned by the
/// logged-in user.
pub async fn owned_comment(
    session: &SessionContext,
    req: &HttpRequest,
    comments: &dyn CommentsQuery,
    raw_campground_id: &str,
    raw_comment_id: &str,
) -> Result<(User, Comment), FlashRedirect> {
    let user = require_login(session)?;
    let ids = raw_campground_id
        .parse::<CampgroundId>()
        .ok()
        .zip(raw_comment_id.parse::<CommentId>().ok());
    let found = match ids {
        Some((campground_id, comment_id)) => comments
            .find(&campground_id, &comment_id)
            .await
            .map_err(|err| fail(session, &err, FlashRedirect::back(req)))?,
        None => None,
    };
    authorize(user.id(), found)
        .map(|comment| (user, comment))
        .map_err(|denial| deny(session, req, denial, COMMENT_NOT_FOUND_MESSAGE))
}

fn deny(
    session: &SessionContext,
    req: &HttpRequest,
    denial: AccessDenial,
    not_found_message: &str,
) -> FlashRedirect {
    match denial {
        AccessDenial::NotFound => session.flash_error(not_found_message),
        AccessDenial::NotOwner => {
            warn!(path = req.path(), "ownership check denied");
            session.flash_error(PERMISSION_DENIED_MESSAGE);
        }
    }
    FlashRedirect::back(req)
}
