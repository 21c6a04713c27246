//! PostgreSQL-backed `CampgroundRepository` implementation using Diesel ORM.
//!
//! Name search uses PostgreSQL's case-insensitive regular expression match
//! (`~*`) against the escaped search term, so user input is always matched
//! literally. Comment ids are loaded with a second query and attached in
//! creation order.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use pagination::Page;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{CampgroundPersistenceError, CampgroundRepository};
use crate::domain::{
    Campground, CampgroundDetails, CampgroundId, CampgroundListingRequest, CommentId, SearchTerm,
};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CampgroundRow, CampgroundUpdate};
use super::pool::{DbPool, PoolError};
use super::row_conversion::{campground_from_row, new_campground_row};
use super::schema::{campgrounds, comments};

diesel::infix_operator!(MatchesInsensitive, " ~* ", backend: diesel::pg::Pg);

/// Diesel-backed implementation of the `CampgroundRepository` port.
#[derive(Clone)]
pub struct DieselCampgroundRepository {
    pool: DbPool,
}

impl DieselCampgroundRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CampgroundPersistenceError {
    map_basic_pool_error(error, |message| {
        CampgroundPersistenceError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> CampgroundPersistenceError {
    map_basic_diesel_error(
        error,
        |message| CampgroundPersistenceError::query(message),
        |message| CampgroundPersistenceError::connection(message),
    )
}

fn name_matches(
    term: &SearchTerm,
) -> MatchesInsensitive<campgrounds::name, diesel::dsl::AsExprOf<String, Text>> {
    MatchesInsensitive::new(campgrounds::name, term.pattern().to_owned().into_sql::<Text>())
}

fn to_campground(
    row: CampgroundRow,
    comment_ids: &mut HashMap<Uuid, Vec<CommentId>>,
) -> Result<Campground, CampgroundPersistenceError> {
    let ids = comment_ids.remove(&row.id).unwrap_or_default();
    campground_from_row(row, ids).map_err(|message| {
        warn!(%message, "stored campground failed validation");
        CampgroundPersistenceError::query(message)
    })
}

/// Load comment ids for the given campgrounds, grouped per campground in
/// creation order.
async fn load_comment_ids(
    conn: &mut AsyncPgConnection,
    campground_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<CommentId>>, diesel::result::Error> {
    if campground_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let pairs: Vec<(Uuid, Uuid)> = comments::table
        .filter(comments::campground_id.eq_any(campground_ids))
        .order((comments::created_at.asc(), comments::id.asc()))
        .select((comments::campground_id, comments::id))
        .load(conn)
        .await?;

    let mut grouped: HashMap<Uuid, Vec<CommentId>> = HashMap::new();
    for (campground_id, comment_id) in pairs {
        grouped
            .entry(campground_id)
            .or_default()
            .push(CommentId::from_uuid(comment_id));
    }
    Ok(grouped)
}

#[async_trait]
impl CampgroundRepository for DieselCampgroundRepository {
    async fn list(
        &self,
        request: &CampgroundListingRequest,
    ) -> Result<Page<Campground>, CampgroundPersistenceError> {
        let page = request.page();
        let offset = i64::try_from(page.offset())
            .map_err(|_| CampgroundPersistenceError::query("page offset out of range"))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut count_query = campgrounds::table.count().into_boxed();
        let mut rows_query = campgrounds::table
            .select(CampgroundRow::as_select())
            .into_boxed();
        if let Some(term) = request.search() {
            count_query = count_query.filter(name_matches(term));
            rows_query = rows_query.filter(name_matches(term));
        }

        let total: i64 = count_query
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<CampgroundRow> = rows_query
            .order((campgrounds::created_at.asc(), campgrounds::id.asc()))
            .limit(i64::from(page.limit()))
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut comment_ids = load_comment_ids(&mut conn, &ids)
            .await
            .map_err(map_diesel_error)?;
        let items = rows
            .into_iter()
            .map(|row| to_campground(row, &mut comment_ids))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, page, u64::try_from(total).unwrap_or(0)))
    }

    async fn find_by_id(
        &self,
        id: &CampgroundId,
    ) -> Result<Option<Campground>, CampgroundPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let Some(row) = campgrounds::table
            .find(*id.as_uuid())
            .select(CampgroundRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
        else {
            return Ok(None);
        };

        let mut comment_ids = load_comment_ids(&mut conn, &[row.id])
            .await
            .map_err(map_diesel_error)?;
        to_campground(row, &mut comment_ids).map(Some)
    }

    async fn insert(&self, campground: &Campground) -> Result<(), CampgroundPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(campgrounds::table)
            .values(&new_campground_row(campground))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        id: &CampgroundId,
        details: &CampgroundDetails,
    ) -> Result<Option<Campground>, CampgroundPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = CampgroundUpdate {
            name: details.name().as_ref(),
            price: details.price().as_ref(),
            image: details.image().as_ref(),
            description: details.description().as_ref(),
            location: details.location().address(),
            latitude: details.location().latitude(),
            longitude: details.location().longitude(),
        };

        let Some(row) = diesel::update(campgrounds::table.find(*id.as_uuid()))
            .set(&changes)
            .returning(CampgroundRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
        else {
            return Ok(None);
        };

        let mut comment_ids = load_comment_ids(&mut conn, &[row.id])
            .await
            .map_err(map_diesel_error)?;
        to_campground(row, &mut comment_ids).map(Some)
    }

    async fn delete_with_comments(
        &self,
        id: &CampgroundId,
    ) -> Result<bool, CampgroundPersistenceError> {
        let campground_id = *id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::delete(comments::table.filter(comments::campground_id.eq(campground_id)))
                    .execute(conn)
                    .await?;
                let deleted = diesel::delete(campgrounds::table.find(campground_id))
                    .execute(conn)
                    .await?;
                Ok::<_, diesel::result::Error>(deleted > 0)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete_all(&self) -> Result<u64, CampgroundPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(comments::table).execute(conn).await?;
                    diesel::delete(campgrounds::table).execute(conn).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(u64::try_from(removed).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for query construction and row mapping.
    use super::*;
    use crate::test_support::{author_of, campground, fixture_timestamp, user};
    use diesel::debug_query;
    use diesel::pg::Pg;
    use rstest::rstest;

    #[rstest]
    fn search_filter_uses_case_insensitive_regex_on_escaped_term() {
        let term = SearchTerm::parse(Some("Cloud's (Rest)")).expect("search term");
        let query = campgrounds::table
            .select(campgrounds::id)
            .filter(name_matches(&term));
        let sql = debug_query::<Pg, _>(&query).to_string();

        assert!(sql.contains("\"campgrounds\".\"name\" ~* $1"), "{sql}");
        assert!(sql.contains(r"Cloud's \\(Rest\\)"), "{sql}");
    }

    #[rstest]
    fn rows_pick_up_their_own_comment_ids() {
        let existing = campground("Canyon Floor", &author_of(&user("colt")), fixture_timestamp());
        let new_row = new_campground_row(&existing);
        let row = CampgroundRow {
            id: new_row.id,
            name: new_row.name.to_owned(),
            price: new_row.price.to_owned(),
            image: new_row.image.to_owned(),
            description: new_row.description.to_owned(),
            location: new_row.location.to_owned(),
            latitude: new_row.latitude,
            longitude: new_row.longitude,
            author_id: new_row.author_id,
            author_username: new_row.author_username.to_owned(),
            created_at: new_row.created_at,
        };
        let comment_id = CommentId::random();
        let mut grouped = HashMap::from([
            (row.id, vec![comment_id]),
            (Uuid::nil(), vec![CommentId::random()]),
        ]);

        let converted = to_campground(row, &mut grouped).expect("valid row");
        assert_eq!(converted.comment_ids(), &[comment_id]);
        assert_eq!(grouped.len(), 1);
    }
}
