//! Marks recorded per student and subject.
//!
//! A submission carries one student and a list of `(subject, marks)` entries.
//! [`MarkSubmission::try_new`] checks presence and numeric shape before any
//! store access happens; existence checks are left to the service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Error, StudentId, SubjectId};

/// Validation errors raised while building a mark submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkValidationError {
    #[error("Invalid input. studentId and marksList are required.")]
    MissingStudentId,
    #[error("Invalid input. studentId and marksList are required.")]
    MissingMarksList,
    #[error("Each entry in marksList must contain valid subjectId and marks.")]
    InvalidEntry { index: usize },
    /// The identifier is present but can never name a stored student.
    #[error("Student not found.")]
    UnknownStudent,
}

impl MarkValidationError {
    /// Name of the request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingStudentId | Self::UnknownStudent => "studentId",
            Self::MissingMarksList | Self::InvalidEntry { .. } => "marksList",
        }
    }
}

impl From<MarkValidationError> for Error {
    fn from(value: MarkValidationError) -> Self {
        match value {
            MarkValidationError::UnknownStudent => Error::not_found(value.to_string()),
            MarkValidationError::InvalidEntry { index } => Error::invalid_request(value.to_string())
                .with_details(json!({ "field": value.field(), "index": index })),
            MarkValidationError::MissingStudentId | MarkValidationError::MissingMarksList => {
                Error::invalid_request(value.to_string())
                    .with_details(json!({ "field": value.field() }))
            }
        }
    }
}

/// Non-negative whole-number mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(i32);

impl Score {
    /// Accept JSON numbers that hold a non-negative integer (`90` or `90.0`).
    ///
    /// # Examples
    /// ```
    /// use records_backend::domain::Score;
    ///
    /// assert_eq!(Score::from_number(90.0).map(Score::as_i32), Some(90));
    /// assert!(Score::from_number(-1.0).is_none());
    /// assert!(Score::from_number(72.5).is_none());
    /// ```
    pub fn from_number(raw: f64) -> Option<Self> {
        if !raw.is_finite() || raw < 0.0 || raw.fract() != 0.0 || raw > f64::from(i32::MAX) {
            return None;
        }
        // Range and integrality were checked above, so the cast is exact.
        #[expect(clippy::cast_possible_truncation, reason = "bounds checked")]
        let value = raw as i32;
        Some(Self(value))
    }

    /// Wrap a stored value.
    pub fn new(value: i32) -> Option<Self> {
        (value >= 0).then_some(Self(value))
    }

    pub fn as_i32(self) -> i32 {
        self.0
    }
}

/// Raw entry as received from a client.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarkEntryInput {
    pub subject_id: Option<i64>,
    pub marks: Option<f64>,
}

/// Validated `(subject, marks)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkEntry {
    pub subject_id: SubjectId,
    pub marks: Score,
}

/// Validated mark submission for one student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkSubmission {
    student_id: StudentId,
    entries: Vec<MarkEntry>,
    /// Entries whose non-zero subject id can never match a stored subject.
    unresolvable_subjects: usize,
}

impl MarkSubmission {
    /// Validate a raw submission.
    ///
    /// A zero `student_id` counts as missing. A negative or out-of-range one
    /// passes the presence check but fails with
    /// [`MarkValidationError::UnknownStudent`] once the entries are valid.
    /// Entries are validated in order and the first failing index is
    /// reported. A negative subject id is not a shape error: it is kept
    /// aside so the subject existence check reports it as not found.
    pub fn try_new(
        student_id: Option<i64>,
        entries: Option<Vec<MarkEntryInput>>,
    ) -> Result<Self, MarkValidationError> {
        let raw_student = student_id
            .filter(|raw| *raw != 0)
            .ok_or(MarkValidationError::MissingStudentId)?;
        let inputs = entries
            .filter(|list| !list.is_empty())
            .ok_or(MarkValidationError::MissingMarksList)?;

        let mut entries = Vec::with_capacity(inputs.len());
        let mut unresolvable_subjects = 0;
        for (index, entry) in inputs.into_iter().enumerate() {
            let raw_subject = entry
                .subject_id
                .filter(|raw| *raw != 0)
                .ok_or(MarkValidationError::InvalidEntry { index })?;
            let marks = entry
                .marks
                .and_then(Score::from_number)
                .ok_or(MarkValidationError::InvalidEntry { index })?;
            match SubjectId::new(raw_subject) {
                Ok(subject_id) => entries.push(MarkEntry { subject_id, marks }),
                Err(_) => unresolvable_subjects += 1,
            }
        }

        let student_id =
            StudentId::new(raw_student).map_err(|_| MarkValidationError::UnknownStudent)?;
        Ok(Self {
            student_id,
            entries,
            unresolvable_subjects,
        })
    }

    pub fn student_id(&self) -> StudentId {
        self.student_id
    }

    pub fn entries(&self) -> &[MarkEntry] {
        &self.entries
    }

    /// Number of subjects the submission refers to, duplicates and
    /// unresolvable ids included.
    pub fn requested_subjects(&self) -> usize {
        self.entries.len() + self.unresolvable_subjects
    }

    /// Resolvable subject identifiers in submission order, duplicates kept.
    pub fn subject_ids(&self) -> Vec<SubjectId> {
        self.entries.iter().map(|entry| entry.subject_id).collect()
    }
}

/// A persisted mark row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    pub id: i32,
    pub student_id: StudentId,
    pub subject_id: SubjectId,
    pub marks: Score,
    pub date: DateTime<Utc>,
}

/// Subject summary embedded in a student's mark listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkSubject {
    pub id: SubjectId,
    pub name: String,
}

/// A mark joined with its subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentMark {
    #[serde(flatten)]
    pub mark: Mark,
    pub subject: MarkSubject,
}

/// Whether an upsert created a new row or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}
