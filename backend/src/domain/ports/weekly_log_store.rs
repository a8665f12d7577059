//! Port abstraction for weekly training-log records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::StoreError;

/// Store of weekly training-log submissions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeeklyLogStore: Send + Sync {
    /// Record a submission and the XP it awarded.
    async fn append(
        &self,
        user_id: &str,
        xp_awarded: i32,
        recorded_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Timestamp of the user's most recent submission, if any.
    async fn latest_at(&self, user_id: &str) -> Result<Option<DateTime<Utc>>, StoreError>;
}
