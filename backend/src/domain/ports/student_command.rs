//! Driving port for student mutations.
//!
//! HTTP handlers validate raw payloads into [`NewStudent`] and
//! [`StudentChanges`] before calling this port.

use async_trait::async_trait;

use crate::domain::{Error, NewStudent, Student, StudentChanges, StudentId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentCommand: Send + Sync {
    /// Register a student.
    ///
    /// # Errors
    ///
    /// Returns a conflict error when the email is already registered.
    async fn create(&self, student: NewStudent) -> Result<Student, Error>;

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns not-found when the student is missing, and a conflict error
    /// when name, email, and age repeat the stored values or the new email
    /// belongs to someone else.
    async fn update(&self, id: StudentId, changes: StudentChanges) -> Result<Student, Error>;

    /// Delete a student after deleting their marks.
    async fn delete(&self, id: StudentId) -> Result<(), Error>;
}
