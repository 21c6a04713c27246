//! Registration, login and logout.
//!
//! ```text
//! GET  /register         form
//! POST /register         username=colt&password=secret
//! GET  /login            form
//! POST /login            username=colt&password=secret
//! GET  /logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::info;

use super::ApiResult;
use super::flash::PageContext;
use super::redirect::{FlashRedirect, fail, found};
use super::session::SessionContext;
use super::state::HttpState;
use super::views::{AuthForm, AuthFormView};
use crate::domain::ports::INVALID_LOGIN_MESSAGE;
use crate::domain::{Error, LoginCredentials, Registration};

/// Where successful logins and registrations land.
pub const AFTER_LOGIN_LOCATION: &str = "/campgrounds";

/// Credentials form body shared by login and registration.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[get("/register")]
pub async fn register_form(session: SessionContext) -> ApiResult<HttpResponse> {
    let context = PageContext::load(&session)?;
    Ok(HttpResponse::Ok().json(AuthFormView {
        context,
        form: AuthForm::Register,
    }))
}

/// Create an account and log it in.
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> Result<HttpResponse, FlashRedirect> {
    let form = form.into_inner();
    let registration = Registration::try_from_parts(&form.username, &form.password)
        .map_err(|err| {
            fail(
                &session,
                &Error::invalid_request(err.to_string()),
                FlashRedirect::to("/register"),
            )
        })?;
    let user = state
        .login
        .register(&registration)
        .await
        .map_err(|err| fail(&session, &err, FlashRedirect::to("/register")))?;
    session
        .persist_principal(&user)
        .map_err(|err| fail(&session, &err, FlashRedirect::to("/login")))?;
    info!(user_id = %user.id(), "registered user");
    session.flash_success(format!("Welcome to YelpCamp {}", user.username()));
    Ok(found(AFTER_LOGIN_LOCATION))
}

#[get("/login")]
pub async fn login_form(session: SessionContext) -> ApiResult<HttpResponse> {
    let context = PageContext::load(&session)?;
    Ok(HttpResponse::Ok().json(AuthFormView {
        context,
        form: AuthForm::Login,
    }))
}

/// Verify credentials and establish a session.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> Result<HttpResponse, FlashRedirect> {
    let form = form.into_inner();
    let credentials = LoginCredentials::try_from_parts(&form.username, &form.password)
        .map_err(|_| {
            fail(
                &session,
                &Error::unauthorized(INVALID_LOGIN_MESSAGE),
                FlashRedirect::to("/login"),
            )
        })?;
    let user = state
        .login
        .authenticate(&credentials)
        .await
        .map_err(|err| fail(&session, &err, FlashRedirect::to("/login")))?;
    session
        .persist_principal(&user)
        .map_err(|err| fail(&session, &err, FlashRedirect::to("/login")))?;
    session.flash_success(format!("Welcome back, {}", user.username()));
    Ok(found(AFTER_LOGIN_LOCATION))
}

#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear_principal();
    session.flash_success("Logged you out!");
    found(AFTER_LOGIN_LOCATION)
}
