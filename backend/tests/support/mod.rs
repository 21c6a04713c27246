//! Shared harness for end-to-end flows against the in-memory adapters.

use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test, web};
use mockable::{Clock, DefaultClock};
use serde_json::Value;

use backend::Trace;
use backend::domain::ports::FixtureGeocoder;
use backend::domain::{AccountService, CampgroundService, CommentService};
use backend::inbound::http::configure;
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::middleware::MethodOverride;
use backend::outbound::memory::InMemoryStore;
use backend::outbound::password::Argon2PasswordHasher;

pub const SESSION_COOKIE: &str = "session";

/// State with every port backed by one shared in-memory store.
pub fn memory_state() -> web::Data<HttpState> {
    let store = Arc::new(InMemoryStore::new());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let campgrounds = Arc::new(CampgroundService::new(
        store.clone(),
        store.clone(),
        Arc::new(FixtureGeocoder),
        clock.clone(),
    ));
    let comments = Arc::new(CommentService::new(store.clone(), clock));
    web::Data::new(HttpState::new(HttpStatePorts {
        login: Arc::new(AccountService::new(
            store,
            Arc::new(Argon2PasswordHasher::default()),
        )),
        campgrounds: campgrounds.clone(),
        campgrounds_command: campgrounds,
        comments: comments.clone(),
        comments_command: comments,
    }))
}

/// Application wired the way the server wires it, minus TLS-only cookies.
pub fn app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.into())
        .cookie_secure(false)
        .cookie_content_security(CookieContentSecurity::Private)
        .build();
    App::new()
        .app_data(state)
        .wrap(session)
        .wrap(Trace)
        .wrap(MethodOverride)
        .configure(configure)
}

/// Carries the session cookie from one response to the next request.
#[derive(Default)]
pub struct Browser {
    cookie: Option<Cookie<'static>>,
}

impl Browser {
    pub async fn send(
        &mut self,
        app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
        request: test::TestRequest,
    ) -> ServiceResponse {
        let request = match &self.cookie {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        };
        let res = test::call_service(app, request.to_request()).await;
        let issued = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .map(Cookie::into_owned);
        if let Some(cookie) = issued {
            self.cookie = (!cookie.value().is_empty()).then_some(cookie);
        }
        res
    }

    pub async fn get_json(
        &mut self,
        app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
        uri: &str,
    ) -> Value {
        let res = self.send(app, test::TestRequest::get().uri(uri)).await;
        assert!(res.status().is_success(), "GET {uri} -> {}", res.status());
        test::read_body_json(res).await
    }

    /// Submit a form and return the redirect target.
    pub async fn submit(
        &mut self,
        app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
        uri: &str,
        form: &[(&str, &str)],
    ) -> String {
        let res = self
            .send(app, test::TestRequest::post().uri(uri).set_form(form))
            .await;
        assert_eq!(res.status().as_u16(), 302, "POST {uri}");
        res.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned()
    }

    pub async fn register(
        &mut self,
        app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
        username: &str,
        password: &str,
    ) -> String {
        self.submit(
            app,
            "/register",
            &[("username", username), ("password", password)],
        )
        .await
    }
}

pub fn campground_form<'a>(name: &'a str, location: &'a str) -> [(&'static str, &'a str); 5] {
    [
        ("name", name),
        ("price", "12.00"),
        ("image", ""),
        ("description", "Quiet pitches by the river"),
        ("location", location),
    ]
}
