//! XP and weekly-log orchestration.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::Error;
use crate::domain::ports::{WeeklyLogStore, XpStore};

use super::{WEEKLY_LOG_COOLDOWN_DAYS, WeeklyLogGate, XpSummary};

/// Domain service for XP awards and the weekly-log gate.
///
/// XP awards funnel through the store's atomic increment, so concurrent
/// awards for the same user cannot lose an update. The service can be
/// disabled by configuration, in which case direct awards are rejected and
/// bonus awards from other services quietly no-op.
#[derive(Clone)]
pub struct GameService {
    xp: Arc<dyn XpStore>,
    weekly_logs: Arc<dyn WeeklyLogStore>,
    clock: Arc<dyn Clock>,
    xp_enabled: bool,
}

impl GameService {
    /// Create a new service.
    pub fn new(
        xp: Arc<dyn XpStore>,
        weekly_logs: Arc<dyn WeeklyLogStore>,
        clock: Arc<dyn Clock>,
        xp_enabled: bool,
    ) -> Self {
        Self {
            xp,
            weekly_logs,
            clock,
            xp_enabled,
        }
    }

    /// Award XP explicitly, as requested by a client.
    ///
    /// Fails with a validation error when the XP system is disabled or the
    /// amount is not positive. The reason is informational only and is
    /// recorded in the logs, never validated against a list.
    pub async fn award(
        &self,
        user_id: &str,
        username: &str,
        amount: i64,
        reason: &str,
    ) -> Result<XpSummary, Error> {
        if !self.xp_enabled {
            return Err(Error::invalid_request("the XP system is currently disabled"));
        }
        if amount <= 0 {
            return Err(Error::invalid_request("XP amount must be positive"));
        }
        let total = self
            .xp
            .add_xp(user_id, username, amount, self.clock.utc())
            .await?;
        info!(user_id, amount, reason, total, "awarded XP");
        Ok(XpSummary::from_total(
            user_id.to_owned(),
            username.to_owned(),
            total,
        ))
    }

    /// Award a fixed bonus triggered by another domain event.
    ///
    /// Returns the amount actually awarded: the full bonus, or zero when the
    /// XP system is disabled.
    pub async fn award_bonus(
        &self,
        user_id: &str,
        username: &str,
        amount: i64,
        reason: &str,
    ) -> Result<i64, Error> {
        if !self.xp_enabled {
            return Ok(0);
        }
        let total = self
            .xp
            .add_xp(user_id, username, amount, self.clock.utc())
            .await?;
        info!(user_id, amount, reason, total, "awarded XP bonus");
        Ok(amount)
    }

    /// Fetch a user's XP summary with the derived level.
    pub async fn summary(&self, user_id: &str) -> Result<XpSummary, Error> {
        let account = self
            .xp
            .account(user_id)
            .await?
            .ok_or_else(|| Error::not_found("no XP account for that user"))?;
        Ok(XpSummary::from_total(
            account.user_id,
            account.username,
            account.total_xp,
        ))
    }

    /// Record a weekly training-log submission.
    pub async fn record_weekly_log(&self, user_id: &str, xp_awarded: i32) -> Result<(), Error> {
        self.weekly_logs
            .append(user_id, xp_awarded, self.clock.utc())
            .await?;
        Ok(())
    }

    /// Whether the user may submit another weekly log yet.
    pub async fn weekly_log_gate(&self, user_id: &str) -> Result<WeeklyLogGate, Error> {
        let Some(last) = self.weekly_logs.latest_at(user_id).await? else {
            return Ok(WeeklyLogGate {
                can_submit: true,
                days_since_last: None,
            });
        };
        let days = (self.clock.utc() - last).num_days();
        Ok(WeeklyLogGate {
            can_submit: days >= WEEKLY_LOG_COOLDOWN_DAYS,
            days_since_last: Some(days),
        })
    }
}
