//! Mark recording service.
//!
//! Every entry of a submission is upserted: an existing `(student, subject)`
//! mark has its score and date overwritten, otherwise a new row is inserted.
//! Existence of the student and of all referenced subjects is checked before
//! the first write.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    MarkRepository, MarksCommand, MarksRecorded, StudentRepository, SubjectRepository,
};
use crate::domain::student_service::{STUDENT_NOT_FOUND_MESSAGE, map_mark_error, map_student_error};
use crate::domain::subject_service::map_subject_error;
use crate::domain::{Error, Mark, MarkEntry, MarkSubmission, StudentId, UpsertOutcome};

/// Marks service implementing [`MarksCommand`].
#[derive(Clone)]
pub struct MarksService<S, J, M> {
    students: Arc<S>,
    subjects: Arc<J>,
    marks: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<S, J, M> MarksService<S, J, M> {
    pub fn new(students: Arc<S>, subjects: Arc<J>, marks: Arc<M>, clock: Arc<dyn Clock>) -> Self {
        Self {
            students,
            subjects,
            marks,
            clock,
        }
    }
}

impl<S, J, M> MarksService<S, J, M>
where
    S: StudentRepository,
    J: SubjectRepository,
    M: MarkRepository,
{
    async fn upsert(
        &self,
        student_id: StudentId,
        entry: MarkEntry,
    ) -> Result<(UpsertOutcome, Mark), Error> {
        let now = self.clock.utc();
        let existing = self
            .marks
            .find(student_id, entry.subject_id)
            .await
            .map_err(map_mark_error)?;

        match existing {
            Some(mark) => {
                let updated = self
                    .marks
                    .update_score(mark.id, entry.marks, now)
                    .await
                    .map_err(map_mark_error)?
                    .ok_or_else(|| Error::internal("mark disappeared during update"))?;
                Ok((UpsertOutcome::Updated, updated))
            }
            None => {
                let created = self
                    .marks
                    .insert(student_id, entry.subject_id, entry.marks, now)
                    .await
                    .map_err(map_mark_error)?;
                Ok((UpsertOutcome::Created, created))
            }
        }
    }
}

#[async_trait]
impl<S, J, M> MarksCommand for MarksService<S, J, M>
where
    S: StudentRepository,
    J: SubjectRepository,
    M: MarkRepository,
{
    async fn record(&self, submission: MarkSubmission) -> Result<MarksRecorded, Error> {
        let student_id = submission.student_id();
        self.students
            .find_by_id(student_id)
            .await
            .map_err(map_student_error)?
            .ok_or_else(|| Error::not_found(STUDENT_NOT_FOUND_MESSAGE))?;

        let requested = submission.subject_ids();
        let found = self
            .subjects
            .count_existing(&requested)
            .await
            .map_err(map_subject_error)?;
        let expected = submission.requested_subjects();
        if found != expected {
            debug!(requested = expected, found, "subject lookup mismatch");
            return Err(Error::not_found("One or more subjects not found"));
        }

        let mut recorded = MarksRecorded {
            created: 0,
            updated: 0,
            marks: Vec::with_capacity(submission.entries().len()),
        };
        for entry in submission.entries() {
            let (outcome, mark) = self.upsert(student_id, *entry).await?;
            match outcome {
                UpsertOutcome::Created => recorded.created += 1,
                UpsertOutcome::Updated => recorded.updated += 1,
            }
            recorded.marks.push(mark);
        }

        info!(
            student_id = %student_id,
            created = recorded.created,
            updated = recorded.updated,
            "marks recorded"
        );
        Ok(recorded)
    }
}

#[cfg(test)]
#[path = "marks_service_tests.rs"]
mod tests;
