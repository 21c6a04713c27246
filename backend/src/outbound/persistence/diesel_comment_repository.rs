//! PostgreSQL-backed `CommentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{CommentPersistenceError, CommentRepository};
use crate::domain::{CampgroundId, Comment, CommentId, CommentText};

use super::diesel_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::CommentRow;
use super::pool::{DbPool, PoolError};
use super::row_conversion::{comment_from_row, new_comment_row};
use super::schema::comments;

/// Diesel-backed implementation of the `CommentRepository` port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CommentPersistenceError {
    map_basic_pool_error(error, |message| CommentPersistenceError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> CommentPersistenceError {
    map_basic_diesel_error(
        error,
        |message| CommentPersistenceError::query(message),
        |message| CommentPersistenceError::connection(message),
    )
}

fn to_comment(row: CommentRow) -> Result<Comment, CommentPersistenceError> {
    comment_from_row(row).map_err(|message| {
        warn!(%message, "stored comment failed validation");
        CommentPersistenceError::query(message)
    })
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn list_for_campground(
        &self,
        campground_id: &CampgroundId,
    ) -> Result<Vec<Comment>, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CommentRow> = comments::table
            .filter(comments::campground_id.eq(*campground_id.as_uuid()))
            .order((comments::created_at.asc(), comments::id.asc()))
            .select(CommentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(to_comment).collect()
    }

    async fn find_by_id(
        &self,
        campground_id: &CampgroundId,
        id: &CommentId,
    ) -> Result<Option<Comment>, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = comments::table
            .find(*id.as_uuid())
            .filter(comments::campground_id.eq(*campground_id.as_uuid()))
            .select(CommentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_comment).transpose()
    }

    async fn insert(&self, comment: &Comment) -> Result<(), CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(comments::table)
            .values(&new_comment_row(comment))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| match constraint_violation(&err) {
                Some(ConstraintViolation::ForeignKey { .. }) => {
                    CommentPersistenceError::campground_missing(
                        comment.campground_id().to_string(),
                    )
                }
                _ => map_diesel_error(err),
            })
    }

    async fn update_text(
        &self,
        id: &CommentId,
        text: &CommentText,
    ) -> Result<Option<Comment>, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(comments::table.find(*id.as_uuid()))
            .set(comments::text.eq(text.as_ref()))
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_comment).transpose()
    }

    async fn delete(&self, id: &CommentId) -> Result<bool, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(comments::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
