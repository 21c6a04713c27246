//! Comment pages and form submissions, nested under a campground.
//!
//! ```text
//! GET    /campgrounds/{id}/comments
//! GET    /campgrounds/{id}/comments/new
//! POST   /campgrounds/{id}/comments                      text=..
//! GET    /campgrounds/{id}/comments/{comment_id}
//! GET    /campgrounds/{id}/comments/{comment_id}/edit
//! PUT    /campgrounds/{id}/comments/{comment_id}         text=..
//! DELETE /campgrounds/{id}/comments/{comment_id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use tracing::info;

use super::flash::PageContext;
use super::guards::{owned_comment, require_login};
use super::redirect::{FlashRedirect, fail, found};
use super::session::SessionContext;
use super::state::HttpState;
use super::views::{CommentListView, CommentView, EditCommentView, NewCommentView};
use crate::domain::ports::{
    CAMPGROUND_NOT_FOUND_MESSAGE, COMMENT_NOT_FOUND_MESSAGE, CampgroundWithComments,
};
use crate::domain::{Author, Campground, CampgroundId, CommentId, CommentText, Error};

/// Comment form body for create and update.
#[derive(Debug, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
}

impl TryFrom<CommentForm> for CommentText {
    type Error = Error;

    fn try_from(form: CommentForm) -> Result<Self, Self::Error> {
        Self::new(&form.text).map_err(|err| Error::invalid_request(err.to_string()))
    }
}

fn campground_location(id: &CampgroundId) -> String {
    format!("/campgrounds/{id}")
}

async fn load_campground(
    state: &HttpState,
    session: &SessionContext,
    req: &HttpRequest,
    raw_id: &str,
) -> Result<CampgroundWithComments, FlashRedirect> {
    let loaded = match raw_id.parse::<CampgroundId>() {
        Ok(id) => state
            .campgrounds
            .find_with_comments(&id)
            .await
            .map_err(|err| fail(session, &err, FlashRedirect::back(req)))?,
        Err(_) => None,
    };
    loaded.ok_or_else(|| {
        session.flash_error(CAMPGROUND_NOT_FOUND_MESSAGE);
        FlashRedirect::back(req)
    })
}

fn page_context(session: &SessionContext, req: &HttpRequest) -> Result<PageContext, FlashRedirect> {
    PageContext::load(session).map_err(|err| fail(session, &err, FlashRedirect::back(req)))
}

#[get("/campgrounds/{id}/comments")]
pub async fn list(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, FlashRedirect> {
    let CampgroundWithComments {
        campground,
        comments,
    } = load_campground(&state, &session, &req, &path).await?;
    let context = page_context(&session, &req)?;
    Ok(HttpResponse::Ok().json(CommentListView {
        context,
        campground,
        comments,
    }))
}

#[get("/campgrounds/{id}/comments/new")]
pub async fn new_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, FlashRedirect> {
    require_login(&session)?;
    let campground: Campground = load_campground(&state, &session, &req, &path)
        .await?
        .campground;
    let context = page_context(&session, &req)?;
    Ok(HttpResponse::Ok().json(NewCommentView {
        context,
        campground,
    }))
}

/// Add a comment to a campground.
#[post("/campgrounds/{id}/comments")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<String>,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse, FlashRedirect> {
    let user = require_login(&session)?;
    let Ok(campground_id) = path.parse::<CampgroundId>() else {
        session.flash_error(CAMPGROUND_NOT_FOUND_MESSAGE);
        return Err(FlashRedirect::back(&req));
    };
    let text = CommentText::try_from(form.into_inner())
        .map_err(|err| fail(&session, &err, FlashRedirect::back(&req)))?;
    let comment = state
        .comments_command
        .create(&campground_id, &Author::from(&user), text)
        .await
        .map_err(|err| fail(&session, &err, FlashRedirect::back(&req)))?;
    info!(comment_id = %comment.id(), campground_id = %campground_id, "created comment");
    Ok(found(&campground_location(&campground_id)))
}

#[get("/campgrounds/{id}/comments/{comment_id}")]
pub async fn show(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, FlashRedirect> {
    let (raw_campground_id, raw_comment_id) = path.into_inner();
    let ids = raw_campground_id
        .parse::<CampgroundId>()
        .ok()
        .zip(raw_comment_id.parse::<CommentId>().ok());
    let loaded = match ids {
        Some((campground_id, comment_id)) => state
            .comments
            .find(&campground_id, &comment_id)
            .await
            .map_err(|err| fail(&session, &err, FlashRedirect::back(&req)))?,
        None => None,
    };
    let Some(comment) = loaded else {
        session.flash_error(COMMENT_NOT_FOUND_MESSAGE);
        return Err(FlashRedirect::back(&req));
    };
    let context = page_context(&session, &req)?;
    Ok(HttpResponse::Ok().json(CommentView { context, comment }))
}

#[get("/campgrounds/{id}/comments/{comment_id}/edit")]
pub async fn edit_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, FlashRedirect> {
    let (raw_campground_id, raw_comment_id) = path.into_inner();
    let (_, comment) = owned_comment(
        &session,
        &req,
        state.comments.as_ref(),
        &raw_campground_id,
        &raw_comment_id,
    )
    .await?;
    let context = page_context(&session, &req)?;
    Ok(HttpResponse::Ok().json(EditCommentView {
        context,
        campground_id: comment.campground_id().to_string(),
        comment,
    }))
}

#[put("/campgrounds/{id}/comments/{comment_id}")]
pub async fn update(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<(String, String)>,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse, FlashRedirect> {
    let (raw_campground_id, raw_comment_id) = path.into_inner();
    let (_, comment) = owned_comment(
        &session,
        &req,
        state.comments.as_ref(),
        &raw_campground_id,
        &raw_comment_id,
    )
    .await?;
    let text = CommentText::try_from(form.into_inner())
        .map_err(|err| fail(&session, &err, FlashRedirect::back(&req)))?;
    state
        .comments_command
        .update(&comment.id(), text)
        .await
        .map_err(|err| fail(&session, &err, FlashRedirect::back(&req)))?;
    session.flash_success("Comment updated!");
    Ok(found(&campground_location(&comment.campground_id())))
}

#[delete("/campgrounds/{id}/comments/{comment_id}")]
pub async fn destroy(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, FlashRedirect> {
    let (raw_campground_id, raw_comment_id) = path.into_inner();
    let (user, comment) = owned_comment(
        &session,
        &req,
        state.comments.as_ref(),
        &raw_campground_id,
        &raw_comment_id,
    )
    .await?;
    state
        .comments_command
        .delete(&comment.id())
        .await
        .map_err(|err| fail(&session, &err, FlashRedirect::back(&req)))?;
    info!(comment_id = %comment.id(), user_id = %user.id(), "deleted comment");
    session.flash_success("Comment deleted!");
    Ok(found(&campground_location(&comment.campground_id())))
}

#[cfg(test)]
#[path = "comments_tests.rs"]
mod tests;
