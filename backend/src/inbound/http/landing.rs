//! Landing page.

use actix_web::{HttpResponse, get};

use super::ApiResult;
use super::flash::PageContext;
use super::session::SessionContext;
use super::views::LandingView;

#[get("/")]
pub async fn landing(session: SessionContext) -> ApiResult<HttpResponse> {
    let context = PageContext::load(&session)?;
    Ok(HttpResponse::Ok().json(LandingView { context }))
}
