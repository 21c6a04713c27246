//! Redirect responses for form submissions.
//!
//! Mutating handlers never render an error page. They queue a flash message
//! and send the browser somewhere sensible with `302 Found`.

use std::fmt;

use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use tracing::{error, warn};
use url::Url;

use super::error::flash_message;
use super::session::SessionContext;
use crate::domain::{Error, ErrorCode};

/// Fallback target when there is no usable page to go back to.
pub const DEFAULT_BACK_LOCATION: &str = "/campgrounds";

/// A `302 Found` to `location`, usable as a handler error with `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashRedirect {
    location: String,
}

impl FlashRedirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    /// Redirect to the referring page on this host, else the index.
    ///
    /// Only the path and query of the referer are kept.
    pub fn back(req: &HttpRequest) -> Self {
        let location = req
            .headers()
            .get(header::REFERER)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| Url::parse(raw).ok())
            .filter(|referer| same_host(referer, req.connection_info().host()))
            .map(|referer| match referer.query() {
                Some(query) => format!("{}?{query}", referer.path()),
                None => referer.path().to_owned(),
            });
        Self::to(location.unwrap_or_else(|| DEFAULT_BACK_LOCATION.to_owned()))
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

fn same_host(referer: &Url, request_host: &str) -> bool {
    let Some(host) = referer.host_str() else {
        return false;
    };
    match referer.port() {
        Some(port) => format!("{host}:{port}") == request_host,
        None => host == request_host,
    }
}

impl fmt::Display for FlashRedirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "redirect to {}", self.location)
    }
}

impl ResponseError for FlashRedirect {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        found(&self.location)
    }
}

/// Plain `302 Found` response.
pub fn found(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}

/// Log a failed use-case, flash what the user should see and redirect.
pub fn fail(session: &SessionContext, err: &Error, target: FlashRedirect) -> FlashRedirect {
    match err.code() {
        ErrorCode::InternalError | ErrorCode::ServiceUnavailable => {
            error!(code = ?err.code(), message = err.message(), location = target.location(), "request failed");
        }
        _ => {
            warn!(code = ?err.code(), message = err.message(), location = target.location(), "request rejected");
        }
    }
    session.flash_error(flash_message(err));
    target
}
