//! Domain errors at the HTTP boundary.
//!
//! JSON view handlers return [`Error`] directly and Actix renders it through
//! [`ResponseError`]. Form handlers flash [`flash_message`] instead and
//! redirect. Either way, internal failures never reach the client verbatim.

use std::borrow::Cow;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for JSON view handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Flash text used for failures the user cannot act on.
pub const SOMETHING_WENT_WRONG_MESSAGE: &str = "Something went wrong";

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Failures caused by our infrastructure rather than by the request.
fn is_operational(code: ErrorCode) -> bool {
    matches!(code, ErrorCode::InternalError | ErrorCode::ServiceUnavailable)
}

/// Body sent to the client. Internal errors keep only their trace id.
fn public_body(error: &Error) -> Cow<'_, Error> {
    if error.code() != ErrorCode::InternalError {
        return Cow::Borrowed(error);
    }
    let redacted = Error::internal(INTERNAL_ERROR_MESSAGE);
    Cow::Owned(match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    })
}

/// Text shown to the user when `error` aborts a form submission.
pub fn flash_message(error: &Error) -> &str {
    if is_operational(error.code()) {
        SOMETHING_WENT_WRONG_MESSAGE
    } else {
        error.message()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(public_body(self))
    }
}
