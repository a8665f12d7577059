//! Port abstraction for daily core-food check-ins.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use super::StoreError;

/// Store of one-row-per-day core-food check-ins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoreFoodStore: Send + Sync {
    /// Record a completed check-in for (user, date).
    ///
    /// Returns [`StoreError::Conflict`] when the day is already logged.
    async fn insert(
        &self,
        user_id: &str,
        checkin_date: NaiveDate,
        recorded_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Whether (user, date) has a check-in.
    async fn exists(&self, user_id: &str, checkin_date: NaiveDate) -> Result<bool, StoreError>;

    /// Remove the check-in for (user, date); false when none existed.
    async fn delete(&self, user_id: &str, checkin_date: NaiveDate) -> Result<bool, StoreError>;

    /// Every date the user has checked in on, ascending.
    async fn checked_dates(&self, user_id: &str) -> Result<Vec<NaiveDate>, StoreError>;
}
