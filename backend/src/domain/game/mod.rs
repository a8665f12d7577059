//! XP accounts, leveling, and weekly training logs.

mod service;

pub use service::GameService;

use chrono::{DateTime, Utc};

use crate::domain::leveling;

/// XP awarded when a logged attempt sets a new PR.
pub const XP_NEW_PR: i64 = 50;

/// XP awarded when a workout is marked complete.
pub const XP_WORKOUT_COMPLETE: i64 = 30;

/// Days that must pass before another weekly log may be submitted.
pub const WEEKLY_LOG_COOLDOWN_DAYS: i64 = 6;

/// Persisted XP state for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpAccount {
    /// Internal user identifier.
    pub user_id: String,
    /// Display name captured at award time.
    pub username: String,
    /// Lifetime XP total; only ever increases.
    pub total_xp: i64,
    /// Timestamp of the most recent award.
    pub updated_at: DateTime<Utc>,
}

/// XP account enriched with the derived level data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpSummary {
    /// Internal user identifier.
    pub user_id: String,
    /// Display name captured at award time.
    pub username: String,
    /// Lifetime XP total.
    pub total_xp: i64,
    /// Level derived from the XP total.
    pub level: i32,
    /// XP needed to advance out of the current level.
    pub xp_for_next_level: i64,
}

impl XpSummary {
    /// Build a summary by deriving level data from an XP total.
    #[must_use]
    pub fn from_total(user_id: String, username: String, total_xp: i64) -> Self {
        let level = leveling::level_for_xp(total_xp);
        Self {
            user_id,
            username,
            total_xp,
            level,
            xp_for_next_level: leveling::xp_for_next_level(level),
        }
    }
}

/// Outcome of the weekly-log submission gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyLogGate {
    /// Whether a new weekly log may be submitted now.
    pub can_submit: bool,
    /// Whole days since the last submission; `None` when there is none.
    pub days_since_last: Option<i64>,
}
