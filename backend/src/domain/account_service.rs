//! Account domain service: registration and credential checks.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{
    DUPLICATE_USERNAME_MESSAGE, INVALID_LOGIN_MESSAGE, LoginService, PasswordHashError,
    PasswordHasher, UserAccount, UserPersistenceError, UserRepository,
};
use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

/// Login service backed by a user repository and a password hasher.
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> AccountService<U, H> {
    /// Create a new service with the given adapters.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { .. } => {
            Error::conflict(DUPLICATE_USERNAME_MESSAGE)
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(account) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
        else {
            return Err(Error::unauthorized(INVALID_LOGIN_MESSAGE));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .map_err(map_hash_error)?;
        if !verified {
            warn!(username = credentials.username(), "password mismatch");
            return Err(Error::unauthorized(INVALID_LOGIN_MESSAGE));
        }
        Ok(account.user)
    }

    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(registration.password())
            .map_err(map_hash_error)?;
        let account = UserAccount {
            user: User::new(UserId::random(), registration.username().clone()),
            password_hash,
        };
        self.users.insert(&account).await.map_err(map_user_error)?;
        Ok(account.user)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
    use crate::test_support::user;
    use mockall::predicate::eq;
    use rstest::rstest;

    fn make_service(
        users: MockUserRepository,
        hasher: MockPasswordHasher,
    ) -> AccountService<MockUserRepository, MockPasswordHasher> {
        AccountService::new(Arc::new(users), Arc::new(hasher))
    }

    fn credentials(password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts("colt", password).expect("credentials shape")
    }

    #[rstest]
    #[case(true, None)]
    #[case(false, Some(ErrorCode::Unauthorized))]
    #[tokio::test]
    async fn authenticate_checks_password(
        #[case] matches: bool,
        #[case] expected_error: Option<ErrorCode>,
    ) {
        let stored = user("colt");
        let expected_user = stored.clone();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .with(eq("colt"))
            .times(1)
            .return_once(move |_| {
                Ok(Some(UserAccount {
                    user: stored,
                    password_hash: "$argon2id$stub".to_owned(),
                }))
            });
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_verify()
            .with(eq("secret"), eq("$argon2id$stub"))
            .times(1)
            .returning(move |_, _| Ok(matches));

        let result = make_service(users, hasher)
            .authenticate(&credentials("secret"))
            .await;
        match expected_error {
            None => assert_eq!(result.expect("authenticated"), expected_user),
            Some(code) => {
                let err = result.expect_err("rejected");
                assert_eq!(err.code(), code);
                assert_eq!(err.message(), INVALID_LOGIN_MESSAGE);
            }
        }
    }

    #[rstest]
    #[tokio::test]
    async fn authenticate_unknown_user_never_verifies() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().never();

        let err = make_service(users, hasher)
            .authenticate(&credentials("secret"))
            .await
            .expect_err("unknown user");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_LOGIN_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn register_stores_hash_not_password() {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .with(eq("secret"))
            .times(1)
            .returning(|_| Ok("$argon2id$hashed".to_owned()));
        let mut users = MockUserRepository::new();
        users
            .expect_insert()
            .withf(|account| {
                account.password_hash == "$argon2id$hashed"
                    && account.user.username().as_ref() == "colt"
            })
            .times(1)
            .returning(|_| Ok(()));

        let registration = Registration::try_from_parts("colt", "secret").expect("valid");
        let created = make_service(users, hasher)
            .register(&registration)
            .await
            .expect("registered");
        assert_eq!(created.username().as_ref(), "colt");
    }

    #[rstest]
    #[tokio::test]
    async fn register_duplicate_is_conflict() {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .returning(|_| Ok("$argon2id$hashed".to_owned()));
        let mut users = MockUserRepository::new();
        users
            .expect_insert()
            .times(1)
            .returning(|account| {
                Err(UserPersistenceError::duplicate_username(
                    account.user.username().as_ref(),
                ))
            });

        let registration = Registration::try_from_parts("colt", "secret").expect("valid");
        let err = make_service(users, hasher)
            .register(&registration)
            .await
            .expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), DUPLICATE_USERNAME_MESSAGE);
    }
}
