//! Driven port for student persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{EmailAddress, NewStudent, Student, StudentId, StudentUpdate};

use super::define_port_error;

define_port_error! {
    /// Errors raised by student repository adapters.
    pub enum StudentRepositoryError {
        /// No connection could be checked out of the pool.
        Connection { message: String } =>
            "student repository connection failed: {message}",
        /// A statement failed or a stored row could not be decoded.
        Query { message: String } =>
            "student repository query failed: {message}",
        /// The store rejected a write because the email is already taken.
        DuplicateEmail { email: String } =>
            "student email already registered: {email}",
    }
}

/// Storage for [`Student`] rows.
///
/// Adapters do not enforce business rules beyond what the schema enforces;
/// uniqueness checks and no-op detection belong to the service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// All students ordered by id.
    async fn list(&self) -> Result<Vec<Student>, StudentRepositoryError>;

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError>;

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Student>, StudentRepositoryError>;

    /// Insert a student registered at `registered_at`.
    ///
    /// A unique-constraint violation on email is reported as
    /// [`StudentRepositoryError::DuplicateEmail`].
    async fn insert(
        &self,
        student: &NewStudent,
        registered_at: DateTime<Utc>,
    ) -> Result<Student, StudentRepositoryError>;

    /// Overwrite the editable columns. Returns `None` when the row is gone.
    async fn update(
        &self,
        id: StudentId,
        update: &StudentUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Student>, StudentRepositoryError>;

    /// Delete the row; `false` when nothing matched.
    async fn delete(&self, id: StudentId) -> Result<bool, StudentRepositoryError>;
}
