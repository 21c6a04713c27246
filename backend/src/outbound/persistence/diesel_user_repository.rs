//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserAccount, UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, Username};

use super::diesel_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, |message| UserPersistenceError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        |message| UserPersistenceError::query(message),
        |message| UserPersistenceError::connection(message),
    )
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let username = Username::new(row.username).map_err(|err| {
        warn!(user_id = %row.id, error = %err, "stored username failed validation");
        UserPersistenceError::query(format!("invalid stored username: {err}"))
    })?;
    Ok(UserAccount {
        user: User::new(UserId::from_uuid(row.id), username),
        password_hash: row.password_hash,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *account.user.id().as_uuid(),
            username: account.user.username().as_ref(),
            password_hash: account.password_hash.as_str(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| match constraint_violation(&err) {
                Some(ConstraintViolation::Unique { .. }) => {
                    UserPersistenceError::duplicate_username(row.username)
                }
                _ => map_diesel_error(err),
            })
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_account).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_account).transpose()?.map(|account| account.user))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion.
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(username: &str) -> UserRow {
        UserRow {
            id: Uuid::nil(),
            username: username.to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
        }
    }

    #[rstest]
    fn valid_rows_convert() {
        let account = row_to_account(row("colt")).expect("valid row");
        assert_eq!(account.user.username().as_ref(), "colt");
        assert_eq!(account.password_hash, "$argon2id$stub");
    }

    #[rstest]
    fn corrupt_usernames_surface_as_query_errors() {
        let err = row_to_account(row("x")).expect_err("invalid row");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
