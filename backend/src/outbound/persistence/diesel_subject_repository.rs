//! PostgreSQL-backed [`SubjectRepository`].

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SubjectRepository, SubjectRepositoryError};
use crate::domain::{Subject, SubjectId, SubjectName};

use super::diesel_helpers::{collect_rows, map_diesel_error, map_pool_error};
use super::models::{NewSubjectRow, SubjectRow};
use super::pool::DbPool;
use super::schema::subjects;

/// Diesel adapter for the `subjects` table.
#[derive(Clone)]
pub struct DieselSubjectRepository {
    pool: DbPool,
}

impl DieselSubjectRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubjectRepository for DieselSubjectRepository {
    async fn list(&self) -> Result<Vec<Subject>, SubjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = subjects::table
            .order(subjects::id.asc())
            .select(SubjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(collect_rows(rows, Subject::try_from)?)
    }

    async fn insert(&self, name: &SubjectName) -> Result<Subject, SubjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(subjects::table)
            .values(NewSubjectRow {
                name: name.as_str(),
            })
            .returning(SubjectRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Subject::try_from(row).map_err(SubjectRepositoryError::query)
    }

    async fn count_existing(&self, ids: &[SubjectId]) -> Result<usize, SubjectRepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let raw: Vec<i32> = ids.iter().map(|id| id.as_i32()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let found: i64 = subjects::table
            .filter(subjects::id.eq_any(raw))
            .select(count_star())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        usize::try_from(found).map_err(|_| SubjectRepositoryError::query("negative row count"))
    }
}
