//! Shared error plumbing for the Diesel repositories.
//!
//! Each adapter reports its own port error type. The helpers here classify
//! Diesel and pool failures once into a [`StoreFailure`], and each port error
//! implements [`From<StoreFailure>`] so adapters can use `?`-friendly
//! `map_err(map_diesel_error)` calls.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{MarkRepositoryError, StudentRepositoryError, SubjectRepositoryError};

use super::pool::PoolError;

/// Name of the unique constraint on `students.email`.
pub(crate) const STUDENT_EMAIL_CONSTRAINT: &str = "students_email_key";

/// Store-level failure before it is mapped onto a port error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    Connection(String),
    UniqueViolation { constraint: Option<String> },
    Query(String),
}

pub(crate) fn map_pool_error(error: PoolError) -> StoreFailure {
    StoreFailure::Connection(error.into_message())
}

/// Classify a Diesel error, logging the driver detail at debug level.
///
/// Driver messages can contain row values, so only generic text is kept in
/// the returned failure.
pub(crate) fn map_diesel_error(error: DieselError) -> StoreFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            match kind {
                DatabaseErrorKind::UniqueViolation => StoreFailure::UniqueViolation {
                    constraint: info.constraint_name().map(str::to_owned),
                },
                DatabaseErrorKind::ClosedConnection => {
                    StoreFailure::Connection("database connection error".to_owned())
                }
                DatabaseErrorKind::ForeignKeyViolation => {
                    StoreFailure::Query("foreign key violation".to_owned())
                }
                DatabaseErrorKind::CheckViolation => {
                    StoreFailure::Query("check constraint violation".to_owned())
                }
                _ => StoreFailure::Query("database error".to_owned()),
            }
        }
        DieselError::NotFound => StoreFailure::Query("record not found".to_owned()),
        other => {
            debug!(error = %other, "diesel operation failed");
            StoreFailure::Query("database query error".to_owned())
        }
    }
}

impl From<StoreFailure> for StudentRepositoryError {
    fn from(value: StoreFailure) -> Self {
        match value {
            StoreFailure::Connection(message) => Self::connection(message),
            StoreFailure::UniqueViolation { constraint }
                if constraint.as_deref() == Some(STUDENT_EMAIL_CONSTRAINT) =>
            {
                Self::duplicate_email("email")
            }
            StoreFailure::UniqueViolation { constraint } => Self::query(format!(
                "unique constraint violated: {}",
                constraint.as_deref().unwrap_or("unknown")
            )),
            StoreFailure::Query(message) => Self::query(message),
        }
    }
}

impl From<StoreFailure> for SubjectRepositoryError {
    fn from(value: StoreFailure) -> Self {
        match value {
            StoreFailure::Connection(message) => Self::connection(message),
            StoreFailure::UniqueViolation { .. } => Self::query("unique constraint violated"),
            StoreFailure::Query(message) => Self::query(message),
        }
    }
}

impl From<StoreFailure> for MarkRepositoryError {
    fn from(value: StoreFailure) -> Self {
        match value {
            StoreFailure::Connection(message) => Self::connection(message),
            StoreFailure::UniqueViolation { .. } => Self::query("unique constraint violated"),
            StoreFailure::Query(message) => Self::query(message),
        }
    }
}

/// Convert every row, failing on the first undecodable one.
pub(crate) fn collect_rows<R, T>(
    rows: Vec<R>,
    convert: impl Fn(R) -> Result<T, String>,
) -> Result<Vec<T>, StoreFailure> {
    rows.into_iter()
        .map(convert)
        .collect::<Result<Vec<_>, _>>()
        .map_err(StoreFailure::Query)
}
