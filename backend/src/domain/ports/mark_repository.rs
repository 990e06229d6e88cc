//! Driven port for mark persistence.
//!
//! Marks are upserted by the service with a find-then-write sequence; the
//! store carries no uniqueness constraint on `(student_id, subject_id)`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Mark, Score, StudentId, StudentMark, SubjectId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by mark repository adapters.
    pub enum MarkRepositoryError {
        Connection { message: String } =>
            "mark repository connection failed: {message}",
        Query { message: String } =>
            "mark repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarkRepository: Send + Sync {
    /// First mark stored for the pair, if any.
    async fn find(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
    ) -> Result<Option<Mark>, MarkRepositoryError>;

    async fn insert(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
        marks: Score,
        date: DateTime<Utc>,
    ) -> Result<Mark, MarkRepositoryError>;

    /// Overwrite the score and date of an existing mark.
    async fn update_score(
        &self,
        mark_id: i32,
        marks: Score,
        date: DateTime<Utc>,
    ) -> Result<Option<Mark>, MarkRepositoryError>;

    /// Marks of one student joined with their subject, ordered by mark id.
    async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<StudentMark>, MarkRepositoryError>;

    /// Delete every mark of the student and return how many went.
    async fn delete_for_student(&self, student_id: StudentId)
    -> Result<usize, MarkRepositoryError>;
}
