//! Conversions from Diesel rows into domain records.
//!
//! Stored values are revalidated on the way out; a failure means the row was
//! written by something other than this service and is reported as a query
//! error by the calling repository.

use crate::domain::{
    Author, Campground, CampgroundDetails, CampgroundId, CampgroundName, CampgroundValidationError,
    Comment, CommentId, CommentText, Description, ImageUrl, Location, Price, UserId, Username,
};

use super::models::{CampgroundRow, CommentRow, NewCampgroundRow, NewCommentRow};

fn author(id: uuid::Uuid, username: String) -> Result<Author, String> {
    let username = Username::new(username).map_err(|err| format!("invalid author: {err}"))?;
    Ok(Author::new(UserId::from_uuid(id), username))
}

pub(crate) fn campground_from_row(
    row: CampgroundRow,
    comment_ids: Vec<CommentId>,
) -> Result<Campground, String> {
    let id = row.id;
    let invalid = move |err: CampgroundValidationError| {
        format!("invalid stored campground {id}: {err}")
    };
    let details = CampgroundDetails::new(
        CampgroundName::new(&row.name).map_err(invalid)?,
        Price::new(&row.price).map_err(invalid)?,
        ImageUrl::new(&row.image).map_err(invalid)?,
        Description::new(&row.description).map_err(invalid)?,
        Location::new(row.location, row.latitude, row.longitude),
    );
    Ok(Campground::new(
        CampgroundId::from_uuid(id),
        details,
        author(row.author_id, row.author_username)?,
        row.created_at,
    )
    .with_comments(comment_ids))
}

pub(crate) fn new_campground_row(campground: &Campground) -> NewCampgroundRow<'_> {
    let details = campground.details();
    NewCampgroundRow {
        id: *campground.id().as_uuid(),
        name: details.name().as_ref(),
        price: details.price().as_ref(),
        image: details.image().as_ref(),
        description: details.description().as_ref(),
        location: details.location().address(),
        latitude: details.location().latitude(),
        longitude: details.location().longitude(),
        author_id: *campground.author().id().as_uuid(),
        author_username: campground.author().username().as_ref(),
        created_at: campground.created_at(),
    }
}

pub(crate) fn comment_from_row(row: CommentRow) -> Result<Comment, String> {
    let text = CommentText::new(&row.text)
        .map_err(|err| format!("invalid stored comment {}: {err}", row.id))?;
    Ok(Comment::new(
        CommentId::from_uuid(row.id),
        CampgroundId::from_uuid(row.campground_id),
        text,
        author(row.author_id, row.author_username)?,
        row.created_at,
    ))
}

pub(crate) fn new_comment_row(comment: &Comment) -> NewCommentRow<'_> {
    NewCommentRow {
        id: *comment.id().as_uuid(),
        campground_id: *comment.campground_id().as_uuid(),
        text: comment.text().as_ref(),
        author_id: *comment.author().id().as_uuid(),
        author_username: comment.author().username().as_ref(),
        created_at: comment.created_at(),
    }
}
