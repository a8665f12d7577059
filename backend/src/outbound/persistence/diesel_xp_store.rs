//! PostgreSQL-backed [`XpStore`] implementation.
//!
//! The XP increment is one upsert statement; the new total is computed in
//! the database, so concurrent awards for the same user serialise on the
//! row rather than racing in application code.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::game::XpAccount;
use crate::domain::ports::{StoreError, XpStore};

use super::errors::{map_diesel_error, map_pool_error};
use super::models::XpAccountRow;
use super::pool::DbPool;
use super::schema::xp_accounts;

/// Diesel adapter for XP accounts.
#[derive(Clone)]
pub struct DieselXpStore {
    pool: DbPool,
}

impl DieselXpStore {
    /// Create a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl XpStore for DieselXpStore {
    async fn add_xp(
        &self,
        user_id: &str,
        username: &str,
        amount: i64,
        updated_at: DateTime<Utc>,
    ) -> Result<i64, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(xp_accounts::table)
            .values((
                xp_accounts::user_id.eq(user_id),
                xp_accounts::username.eq(username),
                xp_accounts::total_xp.eq(amount),
                xp_accounts::updated_at.eq(updated_at),
            ))
            .on_conflict(xp_accounts::user_id)
            .do_update()
            .set((
                xp_accounts::total_xp.eq(xp_accounts::total_xp + excluded(xp_accounts::total_xp)),
                xp_accounts::username.eq(excluded(xp_accounts::username)),
                xp_accounts::updated_at.eq(excluded(xp_accounts::updated_at)),
            ))
            .returning(xp_accounts::total_xp)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn account(&self, user_id: &str) -> Result<Option<XpAccount>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<XpAccountRow> = xp_accounts::table
            .filter(xp_accounts::user_id.eq(user_id))
            .select(XpAccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }
}
