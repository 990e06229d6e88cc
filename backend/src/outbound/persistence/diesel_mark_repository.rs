//! PostgreSQL-backed [`MarkRepository`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MarkRepository, MarkRepositoryError};
use crate::domain::{Mark, Score, StudentId, StudentMark, SubjectId};

use super::diesel_helpers::{collect_rows, map_diesel_error, map_pool_error};
use super::models::{MarkRow, NewMarkRow, SubjectRow, student_mark_from_rows};
use super::pool::DbPool;
use super::schema::{marks, subjects};

/// Diesel adapter for the `marks` table.
#[derive(Clone)]
pub struct DieselMarkRepository {
    pool: DbPool,
}

impl DieselMarkRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_mark(row: MarkRow) -> Result<Mark, MarkRepositoryError> {
    Mark::try_from(row).map_err(MarkRepositoryError::query)
}

#[async_trait]
impl MarkRepository for DieselMarkRepository {
    async fn find(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
    ) -> Result<Option<Mark>, MarkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        marks::table
            .filter(marks::student_id.eq(student_id.as_i32()))
            .filter(marks::subject_id.eq(subject_id.as_i32()))
            .order(marks::id.asc())
            .select(MarkRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_mark)
            .transpose()
    }

    async fn insert(
        &self,
        student_id: StudentId,
        subject_id: SubjectId,
        score: Score,
        date: DateTime<Utc>,
    ) -> Result<Mark, MarkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(marks::table)
            .values(NewMarkRow {
                student_id: student_id.as_i32(),
                subject_id: subject_id.as_i32(),
                marks: score.as_i32(),
                date,
            })
            .returning(MarkRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_mark(row)
    }

    async fn update_score(
        &self,
        mark_id: i32,
        score: Score,
        date: DateTime<Utc>,
    ) -> Result<Option<Mark>, MarkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(marks::table.find(mark_id))
            .set((marks::score.eq(score.as_i32()), marks::date.eq(date)))
            .returning(MarkRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_mark)
            .transpose()
    }

    async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<StudentMark>, MarkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = marks::table
            .inner_join(subjects::table)
            .filter(marks::student_id.eq(student_id.as_i32()))
            .order(marks::id.asc())
            .select((MarkRow::as_select(), SubjectRow::as_select()))
            .load::<(MarkRow, SubjectRow)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(collect_rows(rows, student_mark_from_rows)?)
    }

    async fn delete_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<usize, MarkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        Ok(
            diesel::delete(marks::table.filter(marks::student_id.eq(student_id.as_i32())))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?,
        )
    }
}
