//! Campground pages and form submissions.
//!
//! ```text
//! GET    /campgrounds?search=mesa&page=2
//! POST   /campgrounds              name=..&price=..&image=..&description=..&location=..
//! GET    /campgrounds/new
//! GET    /campgrounds/{id}
//! GET    /campgrounds/{id}/edit
//! PUT    /campgrounds/{id}
//! DELETE /campgrounds/{id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use tracing::info;

use super::ApiResult;
use super::flash::PageContext;
use super::guards::{owned_campground, require_login};
use super::redirect::{FlashRedirect, fail, found};
use super::session::SessionContext;
use super::state::HttpState;
use super::views::{CampgroundIndexView, CampgroundShowView, EditCampgroundView, NewCampgroundView};
use crate::domain::ports::CAMPGROUND_NOT_FOUND_MESSAGE;
use crate::domain::{Author, CampgroundDraft, CampgroundId, CampgroundListingRequest, Error};

/// Index and landing target after create and delete.
pub const CAMPGROUNDS_LOCATION: &str = "/campgrounds";

/// Query parameters of the index page. Both are optional and lenient.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub search: Option<String>,
    pub page: Option<String>,
}

/// Campground form body for create and update.
#[derive(Debug, Deserialize)]
pub struct CampgroundForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
}

impl TryFrom<CampgroundForm> for CampgroundDraft {
    type Error = Error;

    fn try_from(form: CampgroundForm) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &form.name,
            &form.price,
            &form.image,
            &form.description,
            &form.location,
        )
        .map_err(|err| Error::invalid_request(err.to_string()))
    }
}

fn show_location(id: &CampgroundId) -> String {
    format!("{CAMPGROUNDS_LOCATION}/{id}")
}

/// List campgrounds, optionally filtered by name.
#[get("/campgrounds")]
pub async fn index(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    query: web::Query<IndexQuery>,
) -> ApiResult<HttpResponse> {
    let request =
        CampgroundListingRequest::from_query(query.search.as_deref(), query.page.as_deref());
    let listing = state.campgrounds.list(&request).await?;
    let context = PageContext::load(&session)?;
    Ok(HttpResponse::Ok().json(CampgroundIndexView::new(context, listing, &req.full_url())))
}

#[post("/campgrounds")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    form: web::Form<CampgroundForm>,
) -> Result<HttpResponse, FlashRedirect> {
    let user = require_login(&session)?;
    let draft = CampgroundDraft::try_from(form.into_inner())
        .map_err(|err| fail(&session, &err, FlashRedirect::back(&req)))?;
    let campground = state
        .campgrounds_command
        .create(&Author::from(&user), draft)
        .await
        .map_err(|err| fail(&session, &err, FlashRedirect::back(&req)))?;
    info!(campground_id = %campground.id(), user_id = %user.id(), "created campground");
    Ok(found(CAMPGROUNDS_LOCATION))
}

#[get("/campgrounds/new")]
pub async fn new_form(session: SessionContext) -> Result<HttpResponse, FlashRedirect> {
    require_login(&session)?;
    let context = PageContext::load(&session)
        .map_err(|err| fail(&session, &err, FlashRedirect::to(CAMPGROUNDS_LOCATION)))?;
    Ok(HttpResponse::Ok().json(NewCampgroundView { context }))
}

/// Show one campground with its comments.
#[get("/campgrounds/{id}")]
pub async fn show(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, FlashRedirect> {
    let loaded = match path.parse::<CampgroundId>() {
        Ok(id) => state
            .campgrounds
            .find_with_comments(&id)
            .await
            .map_err(|err| fail(&session, &err, FlashRedirect::back(&req)))?,
        Err(_) => None,
    };
    let Some(loaded) = loaded else {
        session.flash_error(CAMPGROUND_NOT_FOUND_MESSAGE);
        return Err(FlashRedirect::back(&req));
    };
    let context = PageContext::load(&session)
        .map_err(|err| fail(&session, &err, FlashRedirect::back(&req)))?;
    Ok(HttpResponse::Ok().json(CampgroundShowView::new(context, loaded)))
}

#[get("/campgrounds/{id}/edit")]
pub async fn edit_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, FlashRedirect> {
    let (_, campground) =
        owned_campground(&session, &req, state.campgrounds.as_ref(), &path).await?;
    let context = PageContext::load(&session)
        .map_err(|err| fail(&session, &err, FlashRedirect::back(&req)))?;
    Ok(HttpResponse::Ok().json(EditCampgroundView {
        context,
        campground,
    }))
}

#[put("/campgrounds/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<String>,
    form: web::Form<CampgroundForm>,
) -> Result<HttpResponse, FlashRedirect> {
    let (user, campground) =
        owned_campground(&session, &req, state.campgrounds.as_ref(), &path).await?;
    let draft = CampgroundDraft::try_from(form.into_inner())
        .map_err(|err| fail(&session, &err, FlashRedirect::back(&req)))?;
    let id = campground.id();
    state
        .campgrounds_command
        .update(&id, draft)
        .await
        .map_err(|err| fail(&session, &err, FlashRedirect::back(&req)))?;
    info!(campground_id = %id, user_id = %user.id(), "updated campground");
    session.flash_success("Campground updated!");
    Ok(found(&show_location(&id)))
}

/// Delete a campground together with its comments.
#[delete("/campgrounds/{id}")]
pub async fn destroy(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, FlashRedirect> {
    let (user, campground) =
        owned_campground(&session, &req, state.campgrounds.as_ref(), &path).await?;
    let id = campground.id();
    state
        .campgrounds_command
        .delete(&id)
        .await
        .map_err(|err| fail(&session, &err, FlashRedirect::back(&req)))?;
    info!(campground_id = %id, user_id = %user.id(), "deleted campground");
    session.flash_success("Campground deleted!");
    Ok(found(CAMPGROUNDS_LOCATION))
}

#[cfg(test)]
#[path = "campgrounds_tests.rs"]
mod tests;
