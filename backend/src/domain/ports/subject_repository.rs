//! Driven port for subject persistence.

use async_trait::async_trait;

use crate::domain::{Subject, SubjectId, SubjectName};

use super::define_port_error;

define_port_error! {
    /// Errors raised by subject repository adapters.
    pub enum SubjectRepositoryError {
        Connection { message: String } =>
            "subject repository connection failed: {message}",
        Query { message: String } =>
            "subject repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// All subjects ordered by id.
    async fn list(&self) -> Result<Vec<Subject>, SubjectRepositoryError>;

    async fn insert(&self, name: &SubjectName) -> Result<Subject, SubjectRepositoryError>;

    /// Number of distinct stored subjects whose id appears in `ids`.
    ///
    /// Duplicate ids in the input are counted once, so callers comparing the
    /// result with `ids.len()` see a mismatch for repeated ids too.
    async fn count_existing(&self, ids: &[SubjectId]) -> Result<usize, SubjectRepositoryError>;
}
