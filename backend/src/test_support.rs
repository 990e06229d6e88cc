//! Test utilities for the backend crate.
//!
//! Compiled for unit tests and, behind the `test-support` feature, for the
//! integration tests in `tests/`. The in-memory store mirrors the Diesel
//! adapters closely enough to drive services and handlers end to end without
//! PostgreSQL: ids are assigned sequentially from 1, email uniqueness is
//! enforced like the `students_email_key` constraint, and marks carry no
//! `(student, subject)` uniqueness.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    MarkRepository, MarkRepositoryError, StudentRepository, StudentRepositoryError,
    SubjectRepository, SubjectRepositoryError,
};
use crate::domain::{
    EmailAddress, Mark, MarkSubject, NewStudent, Score, Student, StudentId, StudentMark,
    StudentUpdate, Subject, SubjectId, SubjectName,
};

#[derive(Debug, Default)]
struct Tables {
    students: BTreeMap<i32, Student>,
    subjects: BTreeMap<i32, Subject>,
    marks: BTreeMap<i32, Mark>,
    next_student: i32,
    next_subject: i32,
    next_mark: i32,
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// Shared in-memory implementation of every repository port.
///
/// Clones share the same tables, so one store can back the student, subject,
/// and mark services at once.
///
/// # Examples
/// ```
/// use records_backend::test_support::InMemoryRecordStore;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let store = InMemoryRecordStore::default();
/// let maths = store.seed_subject("Maths").await;
/// assert_eq!(maths.id.as_i32(), 1);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryRecordStore {
    fn lock(&self) -> Result<MutexGuard<'_, Tables>, String> {
        self.tables
            .lock()
            .map_err(|_| "in-memory record store lock poisoned".to_owned())
    }

    /// Insert a subject directly, panicking on invalid names.
    pub async fn seed_subject(&self, name: &str) -> Subject {
        let name = SubjectName::new(name).unwrap_or_else(|err| panic!("invalid subject: {err}"));
        SubjectRepository::insert(self, &name)
            .await
            .unwrap_or_else(|err| panic!("seeding subject failed: {err}"))
    }

    /// Number of stored marks across all students.
    pub fn mark_count(&self) -> usize {
        self.lock().map(|tables| tables.marks.len()).unwrap_or(0)
    }
}

#[async_trait]
impl StudentRepository for InMemoryRecordStore {
    async fn list(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        let tables = self.lock().map_err(StudentRepositoryError::query)?;
        Ok(tables.students.values().cloned().collect())
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        let tables = self.lock().map_err(StudentRepositoryError::query)?;
        Ok(tables.students.get(&id.as_i32()).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let tables = self.lock().map_err(StudentRepositoryError::query)?;
        Ok(tables
            .students
            .values()
            .find(|student| student.email == *email)
            .cloned())
    }

    async fn insert(
        &self,
        student: &NewStudent,
        registered_at: DateTime<Utc>,
    ) -> Result<Student, StudentRepositoryError> {
        let mut tables = self.lock().map_err(StudentRepositoryError::query)?;
        if tables.students.values().any(|row| row.email == student.email) {
            return Err(StudentRepositoryError::duplicate_email(
                student.email.as_str(),
            ));
        }
        let raw_id = next_id(&mut tables.next_student);
        let id = StudentId::new(i64::from(raw_id))
            .map_err(|err| StudentRepositoryError::query(err.to_string()))?;
        let row = Student {
            id,
            name: student.name.clone(),
            email: student.email.clone(),
            age: student.age,
            parent_id: student.parent_id,
            registration_date: registered_at,
            created_at: registered_at,
            updated_at: registered_at,
        };
        tables.students.insert(raw_id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: StudentId,
        update: &StudentUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let mut tables = self.lock().map_err(StudentRepositoryError::query)?;
        if tables
            .students
            .values()
            .any(|row| row.id != id && row.email == update.email)
        {
            return Err(StudentRepositoryError::duplicate_email(
                update.email.as_str(),
            ));
        }
        let Some(row) = tables.students.get_mut(&id.as_i32()) else {
            return Ok(None);
        };
        row.name = update.name.clone();
        row.email = update.email.clone();
        row.age = update.age;
        row.parent_id = update.parent_id;
        row.updated_at = updated_at;
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: StudentId) -> Result<bool, StudentRepositoryError> {
        let mut tables = self.lock().map_err(StudentRepositoryError::query)?;
        if tables.marks.values().any(|mark| mark.student_id == id) {
            return Err(StudentRepositoryError::query(
                "student still referenced by marks",
            ));
        }
        Ok(tables.students.remove(&id.as_i32()).is_some())
    }
}

#[async_trait]
impl SubjectRepository for InMemoryRecordStore {
    async fn list(&self) -> Result<Vec<Subject>, SubjectRepositoryError> {
        let tables = self.lock().map_err(SubjectRepositoryError::query)?;
        Ok(tables.subjects.values().cloned().collect())
    }

    async fn insert(&self, name: &SubjectName) -> Result<Subject, SubjectRepositoryError> {
        let mut tables = self.lock().map_err(SubjectRepositoryError::query)?;
        let raw_id = next_id(&mut tables.next_subject);
        let id = SubjectId::new(i64::from(raw_id))
            .map_err(|err| SubjectRepositoryError::query(err.to_string()))?;
        let subject = Subject {
            id,
            name: name.clone(),
        };
        tables.subjects.insert(raw_id, subject.clone());
        Ok(subject)
    }

    async fn count_existing(&self, ids: &[SubjectId]) -> Result<usize, SubjectRepositoryError> {
        let tables = self.lock().map_err(SubjectRepositoryError::query)?;
        let distinct: BTreeSet<i32> = ids.iter().map(|id| id.as_i32()).collect();
        Ok(distinct
            .into_iter()
            .filter(|id| tables.subjects.contains_key(id))
            .count())
    }
}

#[async_trait]
impl MarkRepository for InMemoryRecordStore {
    async fn find(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
    ) -> Result<Option<Mark>, MarkRepositoryError> {
        let tables = self.lock().map_err(MarkRepositoryError::query)?;
        Ok(tables
            .marks
            .values()
            .find(|mark| mark.student_id == student_id && mark.subject_id == subject_id)
            .cloned())
    }

    async fn insert(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
        marks: Score,
        date: DateTime<Utc>,
    ) -> Result<Mark, MarkRepositoryError> {
        let mut tables = self.lock().map_err(MarkRepositoryError::query)?;
        if !tables.students.contains_key(&student_id.as_i32())
            || !tables.subjects.contains_key(&subject_id.as_i32())
        {
            return Err(MarkRepositoryError::query("foreign key violation"));
        }
        let id = next_id(&mut tables.next_mark);
        let mark = Mark {
            id,
            student_id,
            subject_id,
            marks,
            date,
        };
        tables.marks.insert(id, mark.clone());
        Ok(mark)
    }

    async fn update_score(
        &self,
        mark_id: i32,
        marks: Score,
        date: DateTime<Utc>,
    ) -> Result<Option<Mark>, MarkRepositoryError> {
        let mut tables = self.lock().map_err(MarkRepositoryError::query)?;
        Ok(tables.marks.get_mut(&mark_id).map(|mark| {
            mark.marks = marks;
            mark.date = date;
            mark.clone()
        }))
    }

    async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<StudentMark>, MarkRepositoryError> {
        let tables = self.lock().map_err(MarkRepositoryError::query)?;
        tables
            .marks
            .values()
            .filter(|mark| mark.student_id == student_id)
            .map(|mark| {
                let subject = tables
                    .subjects
                    .get(&mark.subject_id.as_i32())
                    .ok_or_else(|| MarkRepositoryError::query("mark references missing subject"))?;
                Ok(StudentMark {
                    mark: mark.clone(),
                    subject: MarkSubject {
                        id: subject.id,
                        name: subject.name.as_str().to_owned(),
                    },
                })
            })
            .collect()
    }

    async fn delete_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<usize, MarkRepositoryError> {
        let mut tables = self.lock().map_err(MarkRepositoryError::query)?;
        let before = tables.marks.len();
        tables.marks.retain(|_, mark| mark.student_id != student_id);
        Ok(before - tables.marks.len())
    }
}
