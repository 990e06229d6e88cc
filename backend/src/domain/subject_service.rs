//! Subject catalogue service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{SubjectCommand, SubjectQuery, SubjectRepository, SubjectRepositoryError};
use crate::domain::{Error, Subject, SubjectName};

/// Subject service implementing [`SubjectCommand`] and [`SubjectQuery`].
#[derive(Clone)]
pub struct SubjectService<J> {
    subjects: Arc<J>,
}

impl<J> SubjectService<J> {
    pub fn new(subjects: Arc<J>) -> Self {
        Self { subjects }
    }
}

pub(crate) fn map_subject_error(error: SubjectRepositoryError) -> Error {
    warn!(kind = error.kind(), %error, "subject repository failure");
    match error {
        SubjectRepositoryError::Connection { message } => {
            Error::internal(format!("subject repository unavailable: {message}"))
        }
        SubjectRepositoryError::Query { message } => {
            Error::internal(format!("subject repository error: {message}"))
        }
    }
}

#[async_trait]
impl<J> SubjectCommand for SubjectService<J>
where
    J: SubjectRepository,
{
    async fn create(&self, name: SubjectName) -> Result<Subject, Error> {
        let subject = self.subjects.insert(&name).await.map_err(map_subject_error)?;
        info!(subject_id = %subject.id, "subject created");
        Ok(subject)
    }
}

#[async_trait]
impl<J> SubjectQuery for SubjectService<J>
where
    J: SubjectRepository,
{
    async fn list(&self) -> Result<Vec<Subject>, Error> {
        self.subjects.list().await.map_err(map_subject_error)
    }
}
