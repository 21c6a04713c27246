//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers deal with the logged-in user and
//! one-shot flash messages rather than raw keys.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use super::flash::{Flash, FlashLevel};
use crate::domain::{Error, User};

pub(crate) const USER_KEY: &str = "user";
pub(crate) const FLASH_KEY: &str = "flash";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Log `user` in, rotating the session to a fresh cookie.
    pub fn persist_principal(&self, user: &User) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_KEY, user)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The logged-in user, if any.
    ///
    /// A session entry that no longer decodes is treated as logged out.
    pub fn principal(&self) -> Result<Option<User>, Error> {
        match self.0.get::<User>(USER_KEY) {
            Ok(user) => Ok(user),
            Err(error) => {
                warn!(%error, "discarding unreadable session principal");
                self.0.remove(USER_KEY);
                Ok(None)
            }
        }
    }

    /// Log the current user out. Pending flash messages survive.
    pub fn clear_principal(&self) {
        self.0.remove(USER_KEY);
    }

    /// Queue a message for the next rendered page.
    ///
    /// Flashing is best effort: a failure is logged and otherwise ignored so
    /// it never masks the response that triggered it.
    pub fn flash(&self, level: FlashLevel, text: impl Into<String>) {
        let mut pending = self.pending_flashes();
        pending.push(Flash::new(level, text));
        if let Err(error) = self.0.insert(FLASH_KEY, pending) {
            warn!(%error, "failed to store flash message");
        }
    }

    /// Shorthand for an error flash.
    pub fn flash_error(&self, text: impl Into<String>) {
        self.flash(FlashLevel::Error, text);
    }

    /// Shorthand for a success flash.
    pub fn flash_success(&self, text: impl Into<String>) {
        self.flash(FlashLevel::Success, text);
    }

    /// Remove and return every pending flash message, oldest first.
    pub fn take_flashes(&self) -> Vec<Flash> {
        match self.0.remove_as::<Vec<Flash>>(FLASH_KEY) {
            Some(Ok(flashes)) => flashes,
            Some(Err(raw)) => {
                warn!(len = raw.len(), "discarding unreadable flash messages");
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn pending_flashes(&self) -> Vec<Flash> {
        self.0
            .get::<Vec<Flash>>(FLASH_KEY)
            .ok()
            .flatten()
            .unwrap_or_default()
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    const FIXTURE_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/login",
                web::get().to(|session: SessionContext| async move {
                    let user = User::try_from_strings(FIXTURE_ID, "colt").expect("fixture user");
                    session.persist_principal(&user)?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/whoami",
                web::get().to(|session: SessionContext| async move {
                    let name = session
                        .principal()?
                        .map(|user| user.username().to_string())
                        .unwrap_or_default();
                    Ok::<_, Error>(HttpResponse::Ok().body(name))
                }),
            )
            .route(
                "/logout",
                web::get().to(|session: SessionContext| async move {
                    session.clear_principal();
                    session.flash_success("Logged you out!");
                    HttpResponse::Ok()
                }),
            )
            .route(
                "/flashes",
                web::get().to(|session: SessionContext| async move {
                    let texts: Vec<String> = session
                        .take_flashes()
                        .into_iter()
                        .map(|flash| flash.text().to_owned())
                        .collect();
                    HttpResponse::Ok().body(texts.join("|"))
                }),
            )
            .route(
                "/tamper",
                web::get().to(|session: Session| async move {
                    session
                        .insert(USER_KEY, serde_json::json!({"id": "nope", "username": "x"}))
                        .expect("set invalid principal");
                    HttpResponse::Ok()
                }),
            )
    }

    #[actix_web::test]
    async fn round_trips_principal() {
        let app = test::init_service(session_test_app()).await;

        let login = test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
        assert_eq!(login.status(), StatusCode::OK);
        let cookie = session_cookie(&login);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/whoami").cookie(cookie).to_request(),
        )
        .await;
        let body = test::read_body(res).await;
        assert_eq!(body, "colt");
    }

    #[actix_web::test]
    async fn logout_clears_principal_but_keeps_flash() {
        let app = test::init_service(session_test_app()).await;

        let login = test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
        let logout = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/logout")
                .cookie(session_cookie(&login))
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&logout);

        let whoami = test::call_service(
            &app,
            test::TestRequest::get().uri("/whoami").cookie(cookie.clone()).to_request(),
        )
        .await;
        assert_eq!(test::read_body(whoami).await, "");

        let flashes = test::call_service(
            &app,
            test::TestRequest::get().uri("/flashes").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(test::read_body(flashes).await, "Logged you out!");
    }

    #[actix_web::test]
    async fn flashes_are_consumed_once() {
        let app = test::init_service(session_test_app()).await;

        let logout = test::call_service(&app, test::TestRequest::get().uri("/logout").to_request()).await;
        let first = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/flashes")
                .cookie(session_cookie(&logout))
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&first);
        assert_eq!(test::read_body(first).await, "Logged you out!");

        let second = test::call_service(
            &app,
            test::TestRequest::get().uri("/flashes").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(test::read_body(second).await, "");
    }

    #[actix_web::test]
    async fn tampered_principal_reads_as_logged_out() {
        let app = test::init_service(session_test_app()).await;

        let tamper = test::call_service(&app, test::TestRequest::get().uri("/tamper").to_request()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(session_cookie(&tamper))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "");
    }
}
