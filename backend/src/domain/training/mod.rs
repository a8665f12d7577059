//! Personal-record logging and evaluation.

mod service;

pub use service::TrainingService;

use chrono::{DateTime, Utc};

use crate::domain::one_rep_max;

/// A validated attempt submitted for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct PrAttempt {
    /// Internal user identifier.
    pub user_id: String,
    /// Display name captured with the attempt.
    pub username: String,
    /// Canonical exercise name.
    pub exercise: String,
    /// Lifted load; zero marks a bodyweight attempt.
    pub weight: f64,
    /// Repetitions performed.
    pub reps: i32,
}

/// An attempt awaiting persistence, with the derived estimate attached.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPrRecord {
    /// Internal user identifier.
    pub user_id: String,
    /// Display name captured with the attempt.
    pub username: String,
    /// Canonical exercise name.
    pub exercise: String,
    /// Lifted load.
    pub weight: f64,
    /// Repetitions performed.
    pub reps: i32,
    /// Estimated one-rep-max for ranking.
    pub estimated_one_rep_max: f64,
    /// When the attempt was logged.
    pub recorded_at: DateTime<Utc>,
}

/// A persisted PR attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct PrRecord {
    /// Storage identifier.
    pub id: i64,
    /// Internal user identifier.
    pub user_id: String,
    /// Display name captured with the attempt.
    pub username: String,
    /// Canonical exercise name.
    pub exercise: String,
    /// Lifted load.
    pub weight: f64,
    /// Repetitions performed.
    pub reps: i32,
    /// Estimated one-rep-max for ranking.
    pub estimated_one_rep_max: f64,
    /// When the attempt was logged.
    pub recorded_at: DateTime<Utc>,
}

impl PrRecord {
    /// Short display form used by the dashboard: `"100/5"`, `"102.5/3"`,
    /// or `"BW/12"` for bodyweight attempts.
    #[must_use]
    pub fn display(&self) -> String {
        if one_rep_max::is_bodyweight(self.weight) {
            return format!("BW/{}", self.reps);
        }
        if self.weight.fract() == 0.0 {
            format!("{}/{}", self.weight as i64, self.reps)
        } else {
            format!("{}/{}", self.weight, self.reps)
        }
    }
}

/// Result of logging an attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedAttempt {
    /// The persisted record.
    pub record: PrRecord,
    /// Whether the attempt beat the prior best in its pool.
    pub is_new_pr: bool,
    /// XP granted for the attempt (zero unless it was a new PR).
    pub xp_awarded: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(weight: f64, reps: i32) -> PrRecord {
        PrRecord {
            id: 1,
            user_id: "u1".to_owned(),
            username: "ada".to_owned(),
            exercise: "bench press".to_owned(),
            weight,
            reps,
            estimated_one_rep_max: 0.0,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn display_drops_trailing_zero() {
        assert_eq!(record(100.0, 5).display(), "100/5");
        assert_eq!(record(102.5, 3).display(), "102.5/3");
    }

    #[test]
    fn display_marks_bodyweight() {
        assert_eq!(record(0.0, 12).display(), "BW/12");
    }
}
