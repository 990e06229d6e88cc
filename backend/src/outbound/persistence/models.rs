//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer; adapters convert them into domain
//! types and report undecodable rows as query errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Age, EmailAddress, Mark, MarkSubject, Score, Student, StudentId, StudentMark, StudentName,
    Subject, SubjectId, SubjectName,
};

use super::schema::{marks, students, subjects};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub parent_id: Option<i32>,
    pub registration_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<StudentRow> for Student {
    type Error = String;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        let invalid = |field: &str| format!("student {} has invalid {field}", row.id);
        Ok(Self {
            id: StudentId::new(i64::from(row.id)).map_err(|_| invalid("id"))?,
            name: StudentName::new(row.name.clone()).map_err(|_| invalid("name"))?,
            email: EmailAddress::new(row.email.clone()).map_err(|_| invalid("email"))?,
            age: Age::new(i64::from(row.age)).map_err(|_| invalid("age"))?,
            parent_id: row.parent_id,
            registration_date: row.registration_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub age: i32,
    pub parent_id: Option<i32>,
    pub registration_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full overwrite of the editable columns; `parent_id: None` writes NULL.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = students)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct StudentChangeset<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub age: i32,
    pub parent_id: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = subjects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubjectRow {
    pub id: i32,
    pub name: String,
}

impl TryFrom<SubjectRow> for Subject {
    type Error = String;

    fn try_from(row: SubjectRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SubjectId::new(i64::from(row.id))
                .map_err(|_| format!("subject {} has invalid id", row.id))?,
            name: SubjectName::new(&row.name)
                .map_err(|_| format!("subject {} has invalid name", row.id))?,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subjects)]
pub(crate) struct NewSubjectRow<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = marks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MarkRow {
    pub id: i32,
    #[diesel(column_name = score)]
    pub marks: i32,
    pub date: DateTime<Utc>,
    pub student_id: i32,
    pub subject_id: i32,
}

impl TryFrom<MarkRow> for Mark {
    type Error = String;

    fn try_from(row: MarkRow) -> Result<Self, Self::Error> {
        let invalid = |field: &str| format!("mark {} has invalid {field}", row.id);
        Ok(Self {
            id: row.id,
            student_id: StudentId::new(i64::from(row.student_id))
                .map_err(|_| invalid("student_id"))?,
            subject_id: SubjectId::new(i64::from(row.subject_id))
                .map_err(|_| invalid("subject_id"))?,
            marks: Score::new(row.marks).ok_or_else(|| invalid("marks"))?,
            date: row.date,
        })
    }
}

/// Convert a joined `(mark, subject)` row.
pub(crate) fn student_mark_from_rows(
    (mark, subject): (MarkRow, SubjectRow),
) -> Result<StudentMark, String> {
    let subject_id = SubjectId::new(i64::from(subject.id))
        .map_err(|_| format!("subject {} has invalid id", subject.id))?;
    Ok(StudentMark {
        mark: Mark::try_from(mark)?,
        subject: MarkSubject {
            id: subject_id,
            name: subject.name,
        },
    })
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = marks)]
pub(crate) struct NewMarkRow {
    pub student_id: i32,
    pub subject_id: i32,
    #[diesel(column_name = score)]
    pub marks: i32,
    pub date: DateTime<Utc>,
}
