//! Shared Diesel error mapping for the campground, comment and user
//! repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Constraint a failed write tripped over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConstraintViolation {
    Unique { constraint: Option<String> },
    ForeignKey { constraint: Option<String> },
}

/// Classify unique and foreign-key violations; other errors yield `None`.
pub(crate) fn constraint_violation(error: &DieselError) -> Option<ConstraintViolation> {
    let DieselError::DatabaseError(kind, info) = error else {
        return None;
    };
    let constraint = info.constraint_name().map(str::to_owned);
    match kind {
        DatabaseErrorKind::UniqueViolation => Some(ConstraintViolation::Unique { constraint }),
        DatabaseErrorKind::ForeignKeyViolation => {
            Some(ConstraintViolation::ForeignKey { constraint })
        }
        _ => None,
    }
}

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Detailed database messages are logged at debug level and kept out of the
/// returned error.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("unique constraint violated")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("foreign key constraint violated")
        }
        _ => query("database error"),
    }
}
