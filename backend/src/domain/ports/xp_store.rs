//! Port abstraction for XP account persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::game::XpAccount;

use super::StoreError;

/// Store of per-user XP totals.
///
/// The increment must be a single atomic statement at the storage layer so
/// concurrent awards for the same user never lose an update. Level is not
/// stored; callers derive it from the returned total.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait XpStore: Send + Sync {
    /// Add `amount` XP to the user's account, creating it when absent, and
    /// return the new total.
    async fn add_xp(
        &self,
        user_id: &str,
        username: &str,
        amount: i64,
        updated_at: DateTime<Utc>,
    ) -> Result<i64, StoreError>;

    /// Fetch a user's XP account.
    async fn account(&self, user_id: &str) -> Result<Option<XpAccount>, StoreError>;
}
