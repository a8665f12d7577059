//! Port abstraction for workout plans and completion counters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::workouts::{CompletionState, PlanExercise, PlannedWorkout};

use super::StoreError;

/// Store of per-letter workout plans and their completion counters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Replace the plan for (user, letter) with the given exercises and
    /// seed a zeroed completion row if none exists yet.
    async fn replace_plan(
        &self,
        user_id: &str,
        workout_letter: &str,
        exercises: Vec<PlanExercise>,
    ) -> Result<(), StoreError>;

    /// Ordered exercises for one plan; empty when no plan exists.
    async fn plan(
        &self,
        user_id: &str,
        workout_letter: &str,
    ) -> Result<Vec<PlanExercise>, StoreError>;

    /// All of the user's plans, grouped per letter, letters sorted.
    async fn plans(&self, user_id: &str) -> Result<Vec<PlannedWorkout>, StoreError>;

    /// Completion counters for every letter the user has touched.
    async fn completions(&self, user_id: &str) -> Result<Vec<CompletionState>, StoreError>;

    /// Most recent completion timestamp across all of the user's letters.
    async fn latest_completion_at(
        &self,
        user_id: &str,
    ) -> Result<Option<DateTime<Utc>>, StoreError>;

    /// Zero every completion counter the user has.
    async fn reset_all_counts(&self, user_id: &str) -> Result<(), StoreError>;

    /// Atomically increment the counter for (user, letter), creating the row
    /// when absent, stamping `completed_at`, and returning the new count.
    async fn increment_count(
        &self,
        user_id: &str,
        workout_letter: &str,
        completed_at: DateTime<Utc>,
    ) -> Result<i32, StoreError>;
}
