//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::{HttpResponse, test, web};

use super::session::SessionContext;
use super::state::{HttpState, HttpStatePorts};
use crate::domain::{Error, User};
use crate::domain::ports::{
    MockCampgroundsCommand, MockCampgroundsQuery, MockCommentsCommand, MockCommentsQuery,
    MockLoginService,
};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The session cookie set on `res`.
pub fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// The `Location` header of a redirect.
pub fn location(res: &ServiceResponse) -> String {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect has a location")
        .to_owned()
}

const TEST_LOGIN_PATH: &str = "/test/login";

/// Route that logs `user` in, for apps under test.
pub fn login_as(user: User) -> actix_web::Resource {
    web::resource(TEST_LOGIN_PATH).route(web::get().to(move |session: SessionContext| {
        let user = user.clone();
        async move {
            session.persist_principal(&user)?;
            Ok::<_, Error>(HttpResponse::Ok().finish())
        }
    }))
}

/// Session cookie of a user logged in through [`login_as`].
pub async fn login_cookie(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
) -> Cookie<'static> {
    let res = test::call_service(app, test::TestRequest::get().uri(TEST_LOGIN_PATH).to_request()).await;
    assert!(res.status().is_success(), "test login failed");
    session_cookie(&res)
}

/// Handler state built from mocks; unset ports panic when called.
#[derive(Default)]
pub struct MockStateBuilder {
    login: MockLoginService,
    campgrounds: MockCampgroundsQuery,
    campgrounds_command: MockCampgroundsCommand,
    comments: MockCommentsQuery,
    comments_command: MockCommentsCommand,
}

pub fn mock_state() -> MockStateBuilder {
    MockStateBuilder::default()
}

impl MockStateBuilder {
    pub fn with_login(mut self, login: MockLoginService) -> Self {
        self.login = login;
        self
    }

    pub fn with_campgrounds(mut self, campgrounds: MockCampgroundsQuery) -> Self {
        self.campgrounds = campgrounds;
        self
    }

    pub fn with_campgrounds_command(mut self, command: MockCampgroundsCommand) -> Self {
        self.campgrounds_command = command;
        self
    }

    pub fn with_comments(mut self, comments: MockCommentsQuery) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_comments_command(mut self, command: MockCommentsCommand) -> Self {
        self.comments_command = command;
        self
    }

    pub fn build(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            login: Arc::new(self.login),
            campgrounds: Arc::new(self.campgrounds),
            campgrounds_command: Arc::new(self.campgrounds_command),
            comments: Arc::new(self.comments),
            comments_command: Arc::new(self.comments_command),
        }))
    }
}
