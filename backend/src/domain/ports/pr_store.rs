//! Port abstraction for personal-record persistence.

use async_trait::async_trait;

use crate::domain::training::{NewPrRecord, PrRecord};

use super::StoreError;

/// Append-only store of logged PR attempts.
///
/// History is never rewritten: `append` inserts one row per attempt and the
/// "best" attempt is a read-time maximum over the estimated one-rep-max.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrStore: Send + Sync {
    /// Persist a new attempt and return the stored record.
    async fn append(&self, record: NewPrRecord) -> Result<PrRecord, StoreError>;

    /// Best attempt for (user, exercise) within one comparison pool.
    ///
    /// `bodyweight` selects the zero-weight pool; weighted attempts never
    /// compete against bodyweight ones.
    async fn best(
        &self,
        user_id: &str,
        exercise: &str,
        bodyweight: bool,
    ) -> Result<Option<PrRecord>, StoreError>;

    /// Best attempt for (user, exercise) across both pools, ranked by the
    /// estimated one-rep-max.
    async fn best_overall(
        &self,
        user_id: &str,
        exercise: &str,
    ) -> Result<Option<PrRecord>, StoreError>;

    /// Attempts for a user, newest first, optionally filtered by exercise.
    async fn history(
        &self,
        user_id: &str,
        exercise: Option<String>,
        limit: i64,
    ) -> Result<Vec<PrRecord>, StoreError>;

    /// Full history for one exercise in chronological order.
    async fn history_chronological(
        &self,
        user_id: &str,
        exercise: &str,
    ) -> Result<Vec<PrRecord>, StoreError>;

    /// Distinct exercise names the user has logged attempts for.
    async fn logged_exercises(&self, user_id: &str) -> Result<Vec<String>, StoreError>;
}
