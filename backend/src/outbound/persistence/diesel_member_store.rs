//! PostgreSQL-backed [`MemberStore`] implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::members::{Member, NewMember};
use crate::domain::ports::{MemberStore, StoreError};

use super::errors::{map_diesel_error, map_pool_error};
use super::models::{MemberRow, NewMemberRow};
use super::pool::DbPool;
use super::schema::dashboard_members;

/// Diesel adapter for dashboard members.
#[derive(Clone)]
pub struct DieselMemberStore {
    pool: DbPool,
}

impl DieselMemberStore {
    /// Create a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberStore for DieselMemberStore {
    async fn insert(&self, member: NewMember) -> Result<Member, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: MemberRow = diesel::insert_into(dashboard_members::table)
            .values(NewMemberRow {
                user_id: &member.user_id,
                username: &member.username,
                access_code: &member.access_code,
                created_at: member.created_at,
            })
            .returning(MemberRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Option<Member>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<MemberRow> = dashboard_members::table
            .filter(dashboard_members::user_id.eq(user_id))
            .select(MemberRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn find_by_code(&self, access_code: &str) -> Result<Option<Member>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<MemberRow> = dashboard_members::table
            .filter(dashboard_members::access_code.eq(access_code))
            .select(MemberRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }
}
