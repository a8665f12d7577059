//! PostgreSQL-backed [`CoreFoodStore`] implementation.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CoreFoodStore, StoreError};

use super::errors::{map_diesel_error, map_pool_error};
use super::models::NewCoreFoodRow;
use super::pool::DbPool;
use super::schema::core_food_checkins;

/// Diesel adapter for daily core-food check-ins.
#[derive(Clone)]
pub struct DieselCoreFoodStore {
    pool: DbPool,
}

impl DieselCoreFoodStore {
    /// Create a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CoreFoodStore for DieselCoreFoodStore {
    async fn insert(
        &self,
        user_id: &str,
        checkin_date: NaiveDate,
        recorded_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(core_food_checkins::table)
            .values(NewCoreFoodRow {
                user_id,
                checkin_date,
                completed: true,
                recorded_at,
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn exists(&self, user_id: &str, checkin_date: NaiveDate) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let found: Option<i32> = core_food_checkins::table
            .filter(core_food_checkins::user_id.eq(user_id))
            .filter(core_food_checkins::checkin_date.eq(checkin_date))
            .select(core_food_checkins::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(found.is_some())
    }

    async fn delete(&self, user_id: &str, checkin_date: NaiveDate) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            core_food_checkins::table
                .filter(core_food_checkins::user_id.eq(user_id))
                .filter(core_food_checkins::checkin_date.eq(checkin_date)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn checked_dates(&self, user_id: &str) -> Result<Vec<NaiveDate>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        core_food_checkins::table
            .filter(core_food_checkins::user_id.eq(user_id))
            .order(core_food_checkins::checkin_date.asc())
            .select(core_food_checkins::checkin_date)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
