//! Driving port for the subject catalogue.

use async_trait::async_trait;

use crate::domain::{Error, Subject};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubjectQuery: Send + Sync {
    /// All subjects; an empty catalogue is not an error.
    async fn list(&self) -> Result<Vec<Subject>, Error>;
}
