//! PostgreSQL-backed [`WeeklyLogStore`] implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StoreError, WeeklyLogStore};

use super::errors::{map_diesel_error, map_pool_error};
use super::models::NewWeeklyLogRow;
use super::pool::DbPool;
use super::schema::weekly_logs;

/// Diesel adapter for weekly training-log records.
#[derive(Clone)]
pub struct DieselWeeklyLogStore {
    pool: DbPool,
}

impl DieselWeeklyLogStore {
    /// Create a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WeeklyLogStore for DieselWeeklyLogStore {
    async fn append(
        &self,
        user_id: &str,
        xp_awarded: i32,
        recorded_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(weekly_logs::table)
            .values(NewWeeklyLogRow {
                user_id,
                recorded_at,
                xp_awarded,
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn latest_at(&self, user_id: &str) -> Result<Option<DateTime<Utc>>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        weekly_logs::table
            .filter(weekly_logs::user_id.eq(user_id))
            .order(weekly_logs::recorded_at.desc())
            .select(weekly_logs::recorded_at)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)
    }
}
