//! PostgreSQL-backed [`WorkoutStore`] implementation.
//!
//! The completion counter is incremented with a single upsert statement so
//! concurrent completions for the same user never lose an update.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{StoreError, WorkoutStore};
use crate::domain::workouts::{CompletionState, PlanExercise, PlannedWorkout};

use super::errors::{map_diesel_error, map_pool_error};
use super::models::{CompletionRow, NewCompletionRow, NewWorkoutExerciseRow, WorkoutExerciseRow};
use super::pool::DbPool;
use super::schema::{workout_completions, workout_exercises};

/// Diesel adapter for workout plans and completion counters.
#[derive(Clone)]
pub struct DieselWorkoutStore {
    pool: DbPool,
}

impl DieselWorkoutStore {
    /// Create a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkoutStore for DieselWorkoutStore {
    async fn replace_plan(
        &self,
        user_id: &str,
        workout_letter: &str,
        exercises: Vec<PlanExercise>,
    ) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::delete(
                    workout_exercises::table
                        .filter(workout_exercises::user_id.eq(user_id))
                        .filter(workout_exercises::workout_letter.eq(workout_letter)),
                )
                .execute(conn)
                .await?;

                let rows: Vec<NewWorkoutExerciseRow<'_>> = exercises
                    .iter()
                    .map(|exercise| NewWorkoutExerciseRow {
                        user_id,
                        workout_letter,
                        exercise_order: exercise.position,
                        exercise_name: &exercise.exercise_name,
                        setup_notes: exercise.setup_notes.as_deref(),
                        special_logging: exercise.special_logging.map(|s| s.as_str()),
                    })
                    .collect();
                diesel::insert_into(workout_exercises::table)
                    .values(&rows)
                    .execute(conn)
                    .await?;

                // Seed the counter so the deload status lists the letter
                // before its first completion.
                diesel::insert_into(workout_completions::table)
                    .values(NewCompletionRow {
                        user_id,
                        workout_letter,
                        completion_count: 0,
                        last_completed_at: None,
                    })
                    .on_conflict((
                        workout_completions::user_id,
                        workout_completions::workout_letter,
                    ))
                    .do_nothing()
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn plan(
        &self,
        user_id: &str,
        workout_letter: &str,
    ) -> Result<Vec<PlanExercise>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<WorkoutExerciseRow> = workout_exercises::table
            .filter(workout_exercises::user_id.eq(user_id))
            .filter(workout_exercises::workout_letter.eq(workout_letter))
            .order(workout_exercises::exercise_order.asc())
            .select(WorkoutExerciseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn plans(&self, user_id: &str) -> Result<Vec<PlannedWorkout>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<WorkoutExerciseRow> = workout_exercises::table
            .filter(workout_exercises::user_id.eq(user_id))
            .order((
                workout_exercises::workout_letter.asc(),
                workout_exercises::exercise_order.asc(),
            ))
            .select(WorkoutExerciseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut plans: Vec<PlannedWorkout> = Vec::new();
        for row in rows {
            let letter = row.workout_letter.clone();
            match plans.last_mut() {
                Some(plan) if plan.workout_letter == letter => {
                    plan.exercises.push(row.into());
                }
                _ => plans.push(PlannedWorkout {
                    workout_letter: letter,
                    exercises: vec![row.into()],
                }),
            }
        }
        Ok(plans)
    }

    async fn completions(&self, user_id: &str) -> Result<Vec<CompletionState>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CompletionRow> = workout_completions::table
            .filter(workout_completions::user_id.eq(user_id))
            .order(workout_completions::workout_letter.asc())
            .select(CompletionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn latest_completion_at(
        &self,
        user_id: &str,
    ) -> Result<Option<DateTime<Utc>>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let latest: Option<Option<DateTime<Utc>>> = workout_completions::table
            .filter(workout_completions::user_id.eq(user_id))
            .select(diesel::dsl::max(workout_completions::last_completed_at))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(latest.flatten())
    }

    async fn reset_all_counts(&self, user_id: &str) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(workout_completions::table.filter(workout_completions::user_id.eq(user_id)))
            .set(workout_completions::completion_count.eq(0))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn increment_count(
        &self,
        user_id: &str,
        workout_letter: &str,
        completed_at: DateTime<Utc>,
    ) -> Result<i32, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(workout_completions::table)
            .values(NewCompletionRow {
                user_id,
                workout_letter,
                completion_count: 1,
                last_completed_at: Some(completed_at),
            })
            .on_conflict((
                workout_completions::user_id,
                workout_completions::workout_letter,
            ))
            .do_update()
            .set((
                workout_completions::completion_count
                    .eq(workout_completions::completion_count + 1),
                workout_completions::last_completed_at
                    .eq(excluded(workout_completions::last_completed_at)),
            ))
            .returning(workout_completions::completion_count)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
