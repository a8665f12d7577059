//! Workout plans, completion counters, and the deload rule.

mod service;

pub use service::WorkoutService;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Completion count at which a deload is due.
pub const DELOAD_THRESHOLD: i32 = 6;

/// Days without any completion after which counters reset.
pub const STALE_AFTER_DAYS: i64 = 7;

/// Logging treatment for exercises that do not fit the weight/reps mould.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SpecialLogging {
    /// Only the load is meaningful (e.g. loaded carries).
    WeightOnly,
    /// The reps field records seconds held (e.g. planks).
    RepsAsSeconds,
}

impl SpecialLogging {
    /// Stable storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WeightOnly => "weight_only",
            Self::RepsAsSeconds => "reps_as_seconds",
        }
    }

    /// Parse the storage representation; unknown values are dropped rather
    /// than failing reads of old rows.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "weight_only" => Some(Self::WeightOnly),
            "reps_as_seconds" => Some(Self::RepsAsSeconds),
            _ => None,
        }
    }
}

/// One slot of a workout plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanExercise {
    /// Position within the plan, starting at 1.
    pub position: i32,
    /// Exercise name as shown to the member.
    pub exercise_name: String,
    /// Free-text machine/bench setup notes.
    pub setup_notes: Option<String>,
    /// Non-standard logging treatment, if any.
    pub special_logging: Option<SpecialLogging>,
}

/// A full plan for one workout letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedWorkout {
    /// Workout letter (A, B, C, ...).
    pub workout_letter: String,
    /// Ordered exercises.
    pub exercises: Vec<PlanExercise>,
}

/// Persisted completion counter for one (user, letter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionState {
    /// Workout letter.
    pub workout_letter: String,
    /// Completions since the last reset.
    pub completion_count: i32,
    /// Most recent completion, if any.
    pub last_completed_at: Option<DateTime<Utc>>,
}

/// Deload status derived from a completion counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeloadStatus {
    /// Workout letter.
    pub workout_letter: String,
    /// Completions since the last reset.
    pub completion_count: i32,
    /// True once the counter reaches the deload threshold.
    pub needs_deload: bool,
    /// Most recent completion, if any.
    pub last_completed_at: Option<DateTime<Utc>>,
}

impl From<CompletionState> for DeloadStatus {
    fn from(state: CompletionState) -> Self {
        Self {
            workout_letter: state.workout_letter,
            needs_deload: needs_deload(state.completion_count),
            completion_count: state.completion_count,
            last_completed_at: state.last_completed_at,
        }
    }
}

/// Outcome of marking a workout complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    /// Workout letter that was completed.
    pub workout_letter: String,
    /// Counter value after the increment.
    pub completion_count: i32,
    /// True once the counter reaches the deload threshold.
    pub needs_deload: bool,
    /// XP granted for the completion.
    pub xp_awarded: i64,
}

/// True once a counter has reached the deload threshold.
#[must_use]
pub fn needs_deload(completion_count: i32) -> bool {
    completion_count >= DELOAD_THRESHOLD
}

/// True when the gap since the last completion voids the running counters.
///
/// Staleness is judged against the most recent completion across all of the
/// user's workout letters, not per letter.
#[must_use]
pub fn is_stale(last_completed_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - last_completed_at >= Duration::days(STALE_AFTER_DAYS)
}
