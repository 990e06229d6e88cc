//! Driving port for recording marks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Mark, MarkSubmission};

/// Result of recording a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarksRecorded {
    /// Rows inserted for pairs that had no mark yet.
    pub created: usize,
    /// Existing rows whose score and date were overwritten.
    pub updated: usize,
    /// Stored rows in submission order.
    pub marks: Vec<Mark>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarksCommand: Send + Sync {
    /// Upsert every entry of the submission.
    ///
    /// # Errors
    ///
    /// Returns not-found when the student or any subject is missing; no rows
    /// are written in that case.
    async fn record(&self, submission: MarkSubmission) -> Result<MarksRecorded, Error>;
}
