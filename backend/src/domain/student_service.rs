//! Student domain service.
//!
//! Implements [`StudentCommand`] and [`StudentQuery`] over the student and
//! mark repositories. Email uniqueness and mark existence are checked with a
//! read before the write; concurrent writers can race past the email check,
//! in which case the store's unique constraint is reported as a conflict.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    MarkRepository, MarkRepositoryError, StudentCommand, StudentQuery, StudentRepository,
    StudentRepositoryError,
};
use crate::domain::{Error, NewStudent, Student, StudentChanges, StudentId, StudentMark};

pub(crate) const DUPLICATE_EMAIL_MESSAGE: &str = "A student with this email already exists.";
pub(crate) const STUDENT_NOT_FOUND_MESSAGE: &str = "Student not found.";

/// Student service implementing the student driving ports.
#[derive(Clone)]
pub struct StudentService<S, M> {
    students: Arc<S>,
    marks: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<S, M> StudentService<S, M> {
    pub fn new(students: Arc<S>, marks: Arc<M>, clock: Arc<dyn Clock>) -> Self {
        Self {
            students,
            marks,
            clock,
        }
    }
}

pub(crate) fn map_student_error(error: StudentRepositoryError) -> Error {
    warn!(kind = error.kind(), %error, "student repository failure");
    match error {
        StudentRepositoryError::Connection { message } => {
            Error::internal(format!("student repository unavailable: {message}"))
        }
        StudentRepositoryError::Query { message } => {
            Error::internal(format!("student repository error: {message}"))
        }
        StudentRepositoryError::DuplicateEmail { .. } => duplicate_email(),
    }
}

pub(crate) fn map_mark_error(error: MarkRepositoryError) -> Error {
    warn!(kind = error.kind(), %error, "mark repository failure");
    match error {
        MarkRepositoryError::Connection { message } => {
            Error::internal(format!("mark repository unavailable: {message}"))
        }
        MarkRepositoryError::Query { message } => {
            Error::internal(format!("mark repository error: {message}"))
        }
    }
}

fn duplicate_email() -> Error {
    Error::conflict(DUPLICATE_EMAIL_MESSAGE)
        .with_details(json!({ "field": "email", "code": "duplicate_email" }))
}

fn student_not_found() -> Error {
    Error::not_found(STUDENT_NOT_FOUND_MESSAGE)
}

impl<S, M> StudentService<S, M>
where
    S: StudentRepository,
    M: MarkRepository,
{
    async fn require(&self, id: StudentId, missing: &str) -> Result<Student, Error> {
        self.students
            .find_by_id(id)
            .await
            .map_err(map_student_error)?
            .ok_or_else(|| Error::not_found(missing))
    }
}

#[async_trait]
impl<S, M> StudentCommand for StudentService<S, M>
where
    S: StudentRepository,
    M: MarkRepository,
{
    async fn create(&self, student: NewStudent) -> Result<Student, Error> {
        if self
            .students
            .find_by_email(&student.email)
            .await
            .map_err(map_student_error)?
            .is_some()
        {
            debug!(email = student.email.as_str(), "rejecting duplicate email");
            return Err(duplicate_email());
        }

        let created = self
            .students
            .insert(&student, self.clock.utc())
            .await
            .map_err(map_student_error)?;
        info!(student_id = %created.id, "student registered");
        Ok(created)
    }

    async fn update(&self, id: StudentId, changes: StudentChanges) -> Result<Student, Error> {
        let current = self.require(id, STUDENT_NOT_FOUND_MESSAGE).await?;
        if changes.repeats(&current) {
            return Err(Error::conflict("Same information provided"));
        }

        let update = changes.apply_to(&current);
        if update.email != current.email
            && self
                .students
                .find_by_email(&update.email)
                .await
                .map_err(map_student_error)?
                .is_some_and(|other| other.id != id)
        {
            return Err(duplicate_email());
        }

        let updated = self
            .students
            .update(id, &update, self.clock.utc())
            .await
            .map_err(map_student_error)?
            .ok_or_else(student_not_found)?;
        info!(student_id = %id, "student updated");
        Ok(updated)
    }

    async fn delete(&self, id: StudentId) -> Result<(), Error> {
        self.require(id, STUDENT_NOT_FOUND_MESSAGE).await?;

        // Two statements, no transaction: a failure between them leaves the
        // student without marks but still present.
        let removed_marks = self
            .marks
            .delete_for_student(id)
            .await
            .map_err(map_mark_error)?;
        if !self.students.delete(id).await.map_err(map_student_error)? {
            return Err(student_not_found());
        }
        info!(student_id = %id, removed_marks, "student deleted");
        Ok(())
    }
}

#[async_trait]
impl<S, M> StudentQuery for StudentService<S, M>
where
    S: StudentRepository,
    M: MarkRepository,
{
    async fn list(&self) -> Result<Vec<Student>, Error> {
        let students = self.students.list().await.map_err(map_student_error)?;
        if students.is_empty() {
            return Err(Error::not_found("No students found"));
        }
        Ok(students)
    }

    async fn get(&self, id: StudentId) -> Result<Student, Error> {
        self.require(id, "Student data not found.").await
    }

    async fn marks(&self, id: StudentId) -> Result<Vec<StudentMark>, Error> {
        let marks = self
            .marks
            .list_for_student(id)
            .await
            .map_err(map_mark_error)?;
        if marks.is_empty() {
            return Err(Error::not_found("No marks found for this student."));
        }
        Ok(marks)
    }
}

#[cfg(test)]
#[path = "student_service_tests.rs"]
mod tests;
