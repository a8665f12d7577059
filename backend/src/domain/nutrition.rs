//! Daily core-food check-ins.
//!
//! Direct check-ins enforce a short backfill window so members cannot
//! rewrite history; the dashboard toggle is unrestricted because it exists
//! precisely to correct mistakes.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::Error;
use crate::domain::ports::{CoreFoodStore, StoreError};

/// How many days back a direct check-in may be logged.
pub const BACKFILL_WINDOW_DAYS: i64 = 2;

/// Accepted direct check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckinOutcome {
    /// The day that was checked in.
    pub checkin_date: NaiveDate,
    /// How many days before today that is.
    pub days_ago: i64,
}

/// Domain service for core-food check-ins.
#[derive(Clone)]
pub struct NutritionService {
    checkins: Arc<dyn CoreFoodStore>,
    clock: Arc<dyn Clock>,
}

impl NutritionService {
    /// Create a new service.
    pub fn new(checkins: Arc<dyn CoreFoodStore>, clock: Arc<dyn Clock>) -> Self {
        Self { checkins, clock }
    }

    /// Record a direct check-in, defaulting to today (UTC).
    ///
    /// Future dates, dates beyond the backfill window, and duplicate days
    /// are all rejected as validation errors.
    pub async fn check_in(
        &self,
        user_id: &str,
        checkin_date: Option<NaiveDate>,
    ) -> Result<CheckinOutcome, Error> {
        let today = self.clock.utc().date_naive();
        let date = checkin_date.unwrap_or(today);
        if date > today {
            return Err(Error::invalid_request("cannot log future dates"));
        }
        let days_ago = (today - date).num_days();
        if days_ago > BACKFILL_WINDOW_DAYS {
            return Err(Error::invalid_request(format!(
                "cannot log dates more than {BACKFILL_WINDOW_DAYS} days ago"
            ))
            .with_details(json!({ "date": date.to_string(), "daysAgo": days_ago })));
        }

        match self.checkins.insert(user_id, date, self.clock.utc()).await {
            Ok(()) => {}
            Err(StoreError::Conflict { .. }) => {
                return Err(Error::invalid_request(format!(
                    "already checked in for {date}"
                )));
            }
            Err(other) => return Err(other.into()),
        }
        info!(user_id, %date, "core foods check-in");
        Ok(CheckinOutcome {
            checkin_date: date,
            days_ago,
        })
    }

    /// Flip the check-in state for (user, date); returns the new state.
    pub async fn toggle(&self, user_id: &str, checkin_date: NaiveDate) -> Result<bool, Error> {
        if self.checkins.delete(user_id, checkin_date).await? {
            info!(user_id, date = %checkin_date, "core foods check-in removed");
            return Ok(false);
        }
        match self
            .checkins
            .insert(user_id, checkin_date, self.clock.utc())
            .await
        {
            // A concurrent toggle beat us to the insert; the day is checked
            // either way.
            Ok(()) | Err(StoreError::Conflict { .. }) => Ok(true),
            Err(other) => Err(other.into()),
        }
    }

    /// Whether the user still has today's check-in available.
    pub async fn can_check_in_today(&self, user_id: &str) -> Result<bool, Error> {
        let today = self.clock.utc().date_naive();
        Ok(!self.checkins.exists(user_id, today).await?)
    }

    /// Every date the user has checked in on, ascending.
    pub async fn checked_dates(&self, user_id: &str) -> Result<Vec<NaiveDate>, Error> {
        Ok(self.checkins.checked_dates(user_id).await?)
    }
}
