//! HTTP inbound adapter: pages as JSON views and form submissions as
//! flash-and-redirect responses.

pub mod accounts;
pub mod campgrounds;
pub mod comments;
pub mod error;
pub mod flash;
pub mod guards;
pub mod landing;
pub mod redirect;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

use actix_web::web;

pub use error::ApiResult;

/// Register every route.
///
/// Literal segments such as `/campgrounds/new` are registered before the
/// `{id}` routes they would otherwise be captured by.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(landing::landing)
        .service(accounts::register_form)
        .service(accounts::register)
        .service(accounts::login_form)
        .service(accounts::login)
        .service(accounts::logout)
        .service(campgrounds::index)
        .service(campgrounds::create)
        .service(campgrounds::new_form)
        .service(campgrounds::show)
        .service(campgrounds::edit_form)
        .service(campgrounds::update)
        .service(campgrounds::destroy)
        .service(comments::list)
        .service(comments::new_form)
        .service(comments::create)
        .service(comments::show)
        .service(comments::edit_form)
        .service(comments::update)
        .service(comments::destroy);
}
