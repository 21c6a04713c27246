//! Comment domain services.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::campground_service::map_comment_error;
use crate::domain::ports::{
    COMMENT_NOT_FOUND_MESSAGE, CommentRepository, CommentsCommand, CommentsQuery,
};
use crate::domain::{Author, CampgroundId, Comment, CommentId, CommentText, Error};

/// Comment service implementing the read and write driving ports.
#[derive(Clone)]
pub struct CommentService<M> {
    comments: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<M> CommentService<M> {
    /// Create a new service over the given repository.
    pub fn new(comments: Arc<M>, clock: Arc<dyn Clock>) -> Self {
        Self { comments, clock }
    }
}

#[async_trait]
impl<M> CommentsQuery for CommentService<M>
where
    M: CommentRepository,
{
    async fn list(&self, campground_id: &CampgroundId) -> Result<Vec<Comment>, Error> {
        self.comments
            .list_for_campground(campground_id)
            .await
            .map_err(map_comment_error)
    }

    async fn find(
        &self,
        campground_id: &CampgroundId,
        id: &CommentId,
    ) -> Result<Option<Comment>, Error> {
        self.comments
            .find_by_id(campground_id, id)
            .await
            .map_err(map_comment_error)
    }
}

#[async_trait]
impl<M> CommentsCommand for CommentService<M>
where
    M: CommentRepository,
{
    async fn create(
        &self,
        campground_id: &CampgroundId,
        author: &Author,
        text: CommentText,
    ) -> Result<Comment, Error> {
        let comment = Comment::new(
            CommentId::random(),
            *campground_id,
            text,
            author.clone(),
            self.clock.utc(),
        );
        self.comments
            .insert(&comment)
            .await
            .map_err(map_comment_error)?;
        Ok(comment)
    }

    async fn update(&self, id: &CommentId, text: CommentText) -> Result<Comment, Error> {
        self.comments
            .update_text(id, &text)
            .await
            .map_err(map_comment_error)?
            .ok_or_else(|| Error::not_found(COMMENT_NOT_FOUND_MESSAGE))
    }

    async fn delete(&self, id: &CommentId) -> Result<(), Error> {
        let deleted = self.comments.delete(id).await.map_err(map_comment_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(COMMENT_NOT_FOUND_MESSAGE))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{
        CAMPGROUND_NOT_FOUND_MESSAGE, CommentPersistenceError, MockCommentRepository,
    };
    use crate::test_support::{MutableClock, author_of, fixture_timestamp, user};
    use rstest::rstest;

    fn make_service(repo: MockCommentRepository) -> CommentService<MockCommentRepository> {
        CommentService::new(
            Arc::new(repo),
            Arc::new(MutableClock::new(fixture_timestamp())),
        )
    }

    fn text(raw: &str) -> CommentText {
        CommentText::new(raw).expect("valid text")
    }

    #[rstest]
    #[tokio::test]
    async fn create_stamps_author_and_time() {
        let author = author_of(&user("homer"));
        let campground_id = CampgroundId::random();
        let mut repo = MockCommentRepository::new();
        repo.expect_insert().times(1).returning(|_| Ok(()));

        let created = make_service(repo)
            .create(&campground_id, &author, text("Wish there was internet"))
            .await
            .expect("create succeeds");

        assert_eq!(created.campground_id(), campground_id);
        assert_eq!(created.author(), &author);
        assert_eq!(created.created_at(), fixture_timestamp());
    }

    #[rstest]
    #[tokio::test]
    async fn create_on_vanished_campground_is_not_found() {
        let mut repo = MockCommentRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|comment| {
                Err(CommentPersistenceError::campground_missing(
                    comment.campground_id().to_string(),
                ))
            });

        let error = make_service(repo)
            .create(
                &CampgroundId::random(),
                &author_of(&user("homer")),
                text("Too late"),
            )
            .await
            .expect_err("campground gone");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), CAMPGROUND_NOT_FOUND_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_missing_comment_is_not_found() {
        let mut repo = MockCommentRepository::new();
        repo.expect_update_text().times(1).returning(|_, _| Ok(None));

        let error = make_service(repo)
            .update(&CommentId::random(), text("edited"))
            .await
            .expect_err("missing");
        assert_eq!(error.message(), COMMENT_NOT_FOUND_MESSAGE);
    }

    #[rstest]
    #[case(true, true)]
    #[case(false, false)]
    #[tokio::test]
    async fn delete_reports_outcome(#[case] deleted: bool, #[case] expect_ok: bool) {
        let mut repo = MockCommentRepository::new();
        repo.expect_delete().times(1).returning(move |_| Ok(deleted));

        let result = make_service(repo).delete(&CommentId::random()).await;
        assert_eq!(result.is_ok(), expect_ok);
    }
}
