//! Process-local store used when no database URL is configured.
//!
//! One [`InMemoryStore`] implements the user, campground and comment
//! repositories over a single lock so that cascading deletes stay atomic.
//! Contents are lost on restart.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use pagination::Page;
use regex::RegexBuilder;
use uuid::Uuid;

use crate::domain::ports::{
    CampgroundPersistenceError, CampgroundRepository, CommentPersistenceError, CommentRepository,
    UserAccount, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Campground, CampgroundDetails, CampgroundId, CampgroundListingRequest, Comment, CommentId,
    CommentText, User, UserId,
};

#[derive(Default)]
struct StoreState {
    users: HashMap<Uuid, UserAccount>,
    campgrounds: HashMap<Uuid, Campground>,
    comments: HashMap<Uuid, Comment>,
}

impl StoreState {
    fn comment_ids_for(&self, campground_id: CampgroundId) -> Vec<CommentId> {
        self.comments_for(campground_id)
            .into_iter()
            .map(Comment::id)
            .collect()
    }

    fn comments_for(&self, campground_id: CampgroundId) -> Vec<&Comment> {
        let mut found: Vec<&Comment> = self
            .comments
            .values()
            .filter(|comment| comment.campground_id() == campground_id)
            .collect();
        found.sort_by_key(|comment| (comment.created_at(), *comment.id().as_uuid()));
        found
    }

    fn hydrate(&self, campground: &Campground) -> Campground {
        campground
            .clone()
            .with_comments(self.comment_ids_for(campground.id()))
    }
}

/// Shared in-memory repositories.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Every mutation completes under the lock, so a poisoned guard still
    // holds consistent data.
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut state = self.lock();
        let username = account.user.username().as_ref();
        if state
            .users
            .values()
            .any(|existing| existing.user.username().as_ref() == username)
        {
            return Err(UserPersistenceError::duplicate_username(username));
        }
        state
            .users
            .insert(*account.user.id().as_uuid(), account.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|account| account.user.username().as_ref() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .get(id.as_uuid())
            .map(|account| account.user.clone()))
    }
}

#[async_trait]
impl CampgroundRepository for InMemoryStore {
    async fn list(
        &self,
        request: &CampgroundListingRequest,
    ) -> Result<Page<Campground>, CampgroundPersistenceError> {
        let matcher = request
            .search()
            .map(|term| {
                RegexBuilder::new(term.pattern())
                    .case_insensitive(true)
                    .build()
                    .map_err(|err| CampgroundPersistenceError::query(err.to_string()))
            })
            .transpose()?;
        let page = request.page();
        let offset = usize::try_from(page.offset())
            .map_err(|_| CampgroundPersistenceError::query("page offset out of range"))?;
        let limit = usize::try_from(page.limit())
            .map_err(|_| CampgroundPersistenceError::query("page limit out of range"))?;

        let state = self.lock();
        let mut matching: Vec<&Campground> = state
            .campgrounds
            .values()
            .filter(|campground| {
                matcher
                    .as_ref()
                    .is_none_or(|regex| regex.is_match(campground.name().as_ref()))
            })
            .collect();
        matching.sort_by_key(|campground| (campground.created_at(), *campground.id().as_uuid()));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|campground| state.hydrate(campground))
            .collect();
        Ok(Page::new(items, page, total))
    }

    async fn find_by_id(
        &self,
        id: &CampgroundId,
    ) -> Result<Option<Campground>, CampgroundPersistenceError> {
        let state = self.lock();
        Ok(state
            .campgrounds
            .get(id.as_uuid())
            .map(|campground| state.hydrate(campground)))
    }

    async fn insert(&self, campground: &Campground) -> Result<(), CampgroundPersistenceError> {
        self.lock().campgrounds.insert(
            *campground.id().as_uuid(),
            campground.clone().with_comments(Vec::new()),
        );
        Ok(())
    }

    async fn update(
        &self,
        id: &CampgroundId,
        details: &CampgroundDetails,
    ) -> Result<Option<Campground>, CampgroundPersistenceError> {
        let mut state = self.lock();
        let Some(existing) = state.campgrounds.remove(id.as_uuid()) else {
            return Ok(None);
        };
        let updated = existing.with_details(details.clone());
        state.campgrounds.insert(*id.as_uuid(), updated.clone());
        Ok(Some(state.hydrate(&updated)))
    }

    async fn delete_with_comments(
        &self,
        id: &CampgroundId,
    ) -> Result<bool, CampgroundPersistenceError> {
        let mut state = self.lock();
        if state.campgrounds.remove(id.as_uuid()).is_none() {
            return Ok(false);
        }
        state
            .comments
            .retain(|_, comment| comment.campground_id() != *id);
        Ok(true)
    }

    async fn delete_all(&self) -> Result<u64, CampgroundPersistenceError> {
        let mut state = self.lock();
        let removed = state.campgrounds.len() as u64;
        state.campgrounds.clear();
        state.comments.clear();
        Ok(removed)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn list_for_campground(
        &self,
        campground_id: &CampgroundId,
    ) -> Result<Vec<Comment>, CommentPersistenceError> {
        Ok(self
            .lock()
            .comments_for(*campground_id)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        campground_id: &CampgroundId,
        id: &CommentId,
    ) -> Result<Option<Comment>, CommentPersistenceError> {
        Ok(self
            .lock()
            .comments
            .get(id.as_uuid())
            .filter(|comment| comment.campground_id() == *campground_id)
            .cloned())
    }

    async fn insert(&self, comment: &Comment) -> Result<(), CommentPersistenceError> {
        let mut state = self.lock();
        if !state
            .campgrounds
            .contains_key(comment.campground_id().as_uuid())
        {
            return Err(CommentPersistenceError::campground_missing(
                comment.campground_id().to_string(),
            ));
        }
        state
            .comments
            .insert(*comment.id().as_uuid(), comment.clone());
        Ok(())
    }

    async fn update_text(
        &self,
        id: &CommentId,
        text: &CommentText,
    ) -> Result<Option<Comment>, CommentPersistenceError> {
        let mut state = self.lock();
        let Some(existing) = state.comments.remove(id.as_uuid()) else {
            return Ok(None);
        };
        let updated = existing.with_text(text.clone());
        state.comments.insert(*id.as_uuid(), updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: &CommentId) -> Result<bool, CommentPersistenceError> {
        Ok(self.lock().comments.remove(id.as_uuid()).is_some())
    }
}

#[cfg(test)]
mod tests {
    //! Behavioural coverage for the in-memory repositories.
    use super::*;
    use crate::test_support::{author_of, campground, comment, fixture_timestamp, user};
    use chrono::TimeDelta;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::new()
    }

    async fn seed_named(store: &InMemoryStore, names: &[&str]) -> Vec<Campground> {
        let author = author_of(&user("colt"));
        let mut seeded = Vec::new();
        for (offset, name) in (0_i64..).zip(names) {
            let record = campground(
                name,
                &author,
                fixture_timestamp() + TimeDelta::seconds(offset),
            );
            CampgroundRepository::insert(store, &record)
                .await
                .expect("insert campground");
            seeded.push(record);
        }
        seeded
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_usernames_are_rejected(store: InMemoryStore) {
        let account = |name: &str| UserAccount {
            user: user(name),
            password_hash: "$argon2id$stub".to_owned(),
        };
        UserRepository::insert(&store, &account("colt"))
            .await
            .expect("first insert");
        let err = UserRepository::insert(&store, &account("colt"))
            .await
            .expect_err("duplicate");
        assert!(matches!(err, UserPersistenceError::DuplicateUsername { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn listing_pages_in_creation_order(store: InMemoryStore) {
        let names: Vec<String> = (0..10).map(|n| format!("Camp {n:02}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        seed_named(&store, &refs).await;

        let second = CampgroundListingRequest::from_query(None, Some("2"));
        let page = store.list(&second).await.expect("list");
        let listed: Vec<&str> = page.items().iter().map(|c| c.name().as_ref()).collect();
        assert_eq!(listed, vec!["Camp 08", "Camp 09"]);
        assert_eq!(page.total_items(), 10);
        assert_eq!(page.total_pages(), 2);
    }

    #[rstest]
    #[case("mesa", vec!["Desert Mesa"])]
    #[case("CLOUD", vec!["Cloud's Rest"])]
    #[case("(", vec![])]
    #[case(".", vec![])]
    #[tokio::test]
    async fn search_is_case_insensitive_and_literal(
        store: InMemoryStore,
        #[case] term: &str,
        #[case] expected: Vec<&str>,
    ) {
        seed_named(&store, &["Cloud's Rest", "Desert Mesa", "Canyon Floor"]).await;

        let request = CampgroundListingRequest::from_query(Some(term), None);
        let page = store.list(&request).await.expect("list");
        let listed: Vec<&str> = page.items().iter().map(|c| c.name().as_ref()).collect();
        assert_eq!(listed, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn comments_attach_in_order_and_cascade(store: InMemoryStore) {
        let seeded = seed_named(&store, &["Cloud's Rest"]).await;
        let target = seeded[0].id();
        let author = author_of(&user("homer"));
        let first = comment(target, "first", &author, fixture_timestamp());
        let second = comment(
            target,
            "second",
            &author,
            fixture_timestamp() + TimeDelta::seconds(5),
        );
        CommentRepository::insert(&store, &second).await.expect("insert");
        CommentRepository::insert(&store, &first).await.expect("insert");

        let loaded = CampgroundRepository::find_by_id(&store, &target)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(loaded.comment_ids(), &[first.id(), second.id()]);

        assert!(store.delete_with_comments(&target).await.expect("delete"));
        let orphaned = CommentRepository::find_by_id(&store, &target, &first.id())
            .await
            .expect("lookup");
        assert!(orphaned.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn comments_on_missing_campgrounds_are_rejected(store: InMemoryStore) {
        let stray = comment(
            CampgroundId::random(),
            "hello",
            &author_of(&user("homer")),
            fixture_timestamp(),
        );
        let err = CommentRepository::insert(&store, &stray)
            .await
            .expect_err("missing campground");
        assert!(matches!(err, CommentPersistenceError::CampgroundMissing { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn comment_lookup_is_scoped_to_its_campground(store: InMemoryStore) {
        let seeded = seed_named(&store, &["Cloud's Rest", "Desert Mesa"]).await;
        let note = comment(
            seeded[0].id(),
            "scoped",
            &author_of(&user("homer")),
            fixture_timestamp(),
        );
        CommentRepository::insert(&store, &note).await.expect("insert");

        let elsewhere = CommentRepository::find_by_id(&store, &seeded[1].id(), &note.id())
            .await
            .expect("lookup");
        assert!(elsewhere.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_all_reports_removed_campgrounds(store: InMemoryStore) {
        seed_named(&store, &["Cloud's Rest", "Desert Mesa"]).await;
        assert_eq!(store.delete_all().await.expect("wipe"), 2);
        let page = store
            .list(&CampgroundListingRequest::from_query(None, None))
            .await
            .expect("list");
        assert!(page.is_empty());
    }
}
