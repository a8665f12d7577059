//! PostgreSQL-backed [`PrStore`] implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PrStore, StoreError};
use crate::domain::training::{NewPrRecord, PrRecord};

use super::errors::{map_diesel_error, map_pool_error};
use super::models::{NewPrRow, PrRow};
use super::pool::DbPool;
use super::schema::personal_records;

/// Diesel adapter for the append-only PR history.
#[derive(Clone)]
pub struct DieselPrStore {
    pool: DbPool,
}

impl DieselPrStore {
    /// Create a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrStore for DieselPrStore {
    async fn append(&self, record: NewPrRecord) -> Result<PrRecord, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: PrRow = diesel::insert_into(personal_records::table)
            .values(NewPrRow {
                user_id: &record.user_id,
                username: &record.username,
                exercise: &record.exercise,
                weight: record.weight,
                reps: record.reps,
                estimated_one_rep_max: record.estimated_one_rep_max,
                recorded_at: record.recorded_at,
            })
            .returning(PrRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn best(
        &self,
        user_id: &str,
        exercise: &str,
        bodyweight: bool,
    ) -> Result<Option<PrRecord>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = personal_records::table
            .filter(personal_records::user_id.eq(user_id))
            .filter(personal_records::exercise.eq(exercise))
            .select(PrRow::as_select())
            .into_boxed();
        query = if bodyweight {
            query.filter(personal_records::weight.eq(0.0))
        } else {
            query.filter(personal_records::weight.gt(0.0))
        };
        let row: Option<PrRow> = query
            .order(personal_records::estimated_one_rep_max.desc())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn best_overall(
        &self,
        user_id: &str,
        exercise: &str,
    ) -> Result<Option<PrRecord>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PrRow> = personal_records::table
            .filter(personal_records::user_id.eq(user_id))
            .filter(personal_records::exercise.eq(exercise))
            .order(personal_records::estimated_one_rep_max.desc())
            .select(PrRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn history(
        &self,
        user_id: &str,
        exercise: Option<String>,
        limit: i64,
    ) -> Result<Vec<PrRecord>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = personal_records::table
            .filter(personal_records::user_id.eq(user_id))
            .select(PrRow::as_select())
            .into_boxed();
        if let Some(exercise) = exercise {
            query = query.filter(personal_records::exercise.eq(exercise));
        }
        let rows: Vec<PrRow> = query
            .order(personal_records::recorded_at.desc())
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn history_chronological(
        &self,
        user_id: &str,
        exercise: &str,
    ) -> Result<Vec<PrRecord>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PrRow> = personal_records::table
            .filter(personal_records::user_id.eq(user_id))
            .filter(personal_records::exercise.eq(exercise))
            .order(personal_records::recorded_at.asc())
            .select(PrRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn logged_exercises(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        personal_records::table
            .filter(personal_records::user_id.eq(user_id))
            .select(personal_records::exercise)
            .distinct()
            .order(personal_records::exercise.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
