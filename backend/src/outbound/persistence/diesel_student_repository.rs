//! PostgreSQL-backed [`StudentRepository`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{EmailAddress, NewStudent, Student, StudentId, StudentUpdate};

use super::diesel_helpers::{collect_rows, map_diesel_error, map_pool_error};
use super::models::{NewStudentRow, StudentChangeset, StudentRow};
use super::pool::DbPool;
use super::schema::students;

/// Diesel adapter for the `students` table.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_student(row: StudentRow) -> Result<Student, StudentRepositoryError> {
    Student::try_from(row).map_err(StudentRepositoryError::query)
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = students::table
            .order(students::id.asc())
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(collect_rows(rows, Student::try_from)?)
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        students::table
            .find(id.as_i32())
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_student)
            .transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        students::table
            .filter(students::email.eq(email.as_str()))
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_student)
            .transpose()
    }

    async fn insert(
        &self,
        student: &NewStudent,
        registered_at: DateTime<Utc>,
    ) -> Result<Student, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewStudentRow {
            name: student.name.as_str(),
            email: student.email.as_str(),
            age: student.age.as_i32(),
            parent_id: student.parent_id,
            registration_date: registered_at,
            created_at: registered_at,
            updated_at: registered_at,
        };
        let inserted = diesel::insert_into(students::table)
            .values(&row)
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
            .map_err(|failure| match StudentRepositoryError::from(failure) {
                StudentRepositoryError::DuplicateEmail { .. } => {
                    StudentRepositoryError::duplicate_email(student.email.as_str())
                }
                other => other,
            })?;
        to_student(inserted)
    }

    async fn update(
        &self,
        id: StudentId,
        update: &StudentUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = StudentChangeset {
            name: update.name.as_str(),
            email: update.email.as_str(),
            age: update.age.as_i32(),
            parent_id: update.parent_id,
            updated_at,
        };
        diesel::update(students::table.find(id.as_i32()))
            .set(&changes)
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)
            .map_err(|failure| match StudentRepositoryError::from(failure) {
                StudentRepositoryError::DuplicateEmail { .. } => {
                    StudentRepositoryError::duplicate_email(update.email.as_str())
                }
                other => other,
            })?
            .map(to_student)
            .transpose()
    }

    async fn delete(&self, id: StudentId) -> Result<bool, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(students::table.find(id.as_i32()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
