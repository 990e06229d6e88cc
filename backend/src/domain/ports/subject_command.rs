//! Driving port for subject creation.

use async_trait::async_trait;

use crate::domain::{Error, Subject, SubjectName};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubjectCommand: Send + Sync {
    async fn create(&self, name: SubjectName) -> Result<Subject, Error>;
}
