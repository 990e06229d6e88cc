//! Driving port for student reads.

use async_trait::async_trait;

use crate::domain::{Error, Student, StudentId, StudentMark};

/// Read access to students and their marks.
///
/// Empty results are reported as not-found errors rather than empty lists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentQuery: Send + Sync {
    async fn list(&self) -> Result<Vec<Student>, Error>;

    async fn get(&self, id: StudentId) -> Result<Student, Error>;

    async fn marks(&self, id: StudentId) -> Result<Vec<StudentMark>, Error>;
}
