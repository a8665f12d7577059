//! Diesel row models for the persistence adapters.
//!
//! Row structs mirror the schema exactly and convert to/from domain types at
//! the adapter boundary.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::domain::game::XpAccount;
use crate::domain::members::Member;
use crate::domain::training::PrRecord;
use crate::domain::workouts::{CompletionState, PlanExercise, SpecialLogging};

use super::schema::{
    core_food_checkins, dashboard_members, personal_records, weekly_logs, workout_completions,
    workout_exercises, xp_accounts,
};

/// Stored PR attempt.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = personal_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PrRow {
    pub id: i64,
    pub user_id: String,
    pub username: String,
    pub exercise: String,
    pub weight: f64,
    pub reps: i32,
    pub estimated_one_rep_max: f64,
    pub recorded_at: DateTime<Utc>,
}

impl From<PrRow> for PrRecord {
    fn from(row: PrRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            username: row.username,
            exercise: row.exercise,
            weight: row.weight,
            reps: row.reps,
            estimated_one_rep_max: row.estimated_one_rep_max,
            recorded_at: row.recorded_at,
        }
    }
}

/// PR attempt awaiting insertion.
#[derive(Debug, Insertable)]
#[diesel(table_name = personal_records)]
pub struct NewPrRow<'a> {
    pub user_id: &'a str,
    pub username: &'a str,
    pub exercise: &'a str,
    pub weight: f64,
    pub reps: i32,
    pub estimated_one_rep_max: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Stored workout-plan slot.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = workout_exercises)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkoutExerciseRow {
    pub id: i32,
    pub user_id: String,
    pub workout_letter: String,
    pub exercise_order: i32,
    pub exercise_name: String,
    pub setup_notes: Option<String>,
    pub special_logging: Option<String>,
}

impl From<WorkoutExerciseRow> for PlanExercise {
    fn from(row: WorkoutExerciseRow) -> Self {
        Self {
            position: row.exercise_order,
            exercise_name: row.exercise_name,
            setup_notes: row.setup_notes,
            special_logging: row
                .special_logging
                .as_deref()
                .and_then(SpecialLogging::parse),
        }
    }
}

/// Workout-plan slot awaiting insertion.
#[derive(Debug, Insertable)]
#[diesel(table_name = workout_exercises)]
pub struct NewWorkoutExerciseRow<'a> {
    pub user_id: &'a str,
    pub workout_letter: &'a str,
    pub exercise_order: i32,
    pub exercise_name: &'a str,
    pub setup_notes: Option<&'a str>,
    pub special_logging: Option<&'a str>,
}

/// Stored completion counter.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = workout_completions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CompletionRow {
    pub id: i32,
    pub user_id: String,
    pub workout_letter: String,
    pub completion_count: i32,
    pub last_completed_at: Option<DateTime<Utc>>,
}

impl From<CompletionRow> for CompletionState {
    fn from(row: CompletionRow) -> Self {
        Self {
            workout_letter: row.workout_letter,
            completion_count: row.completion_count,
            last_completed_at: row.last_completed_at,
        }
    }
}

/// Completion counter awaiting insertion.
#[derive(Debug, Insertable)]
#[diesel(table_name = workout_completions)]
pub struct NewCompletionRow<'a> {
    pub user_id: &'a str,
    pub workout_letter: &'a str,
    pub completion_count: i32,
    pub last_completed_at: Option<DateTime<Utc>>,
}

/// Check-in awaiting insertion.
#[derive(Debug, Insertable)]
#[diesel(table_name = core_food_checkins)]
pub struct NewCoreFoodRow<'a> {
    pub user_id: &'a str,
    pub checkin_date: NaiveDate,
    pub completed: bool,
    pub recorded_at: DateTime<Utc>,
}

/// Weekly log awaiting insertion.
#[derive(Debug, Insertable)]
#[diesel(table_name = weekly_logs)]
pub struct NewWeeklyLogRow<'a> {
    pub user_id: &'a str,
    pub recorded_at: DateTime<Utc>,
    pub xp_awarded: i32,
}

/// Stored XP account.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = xp_accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct XpAccountRow {
    pub user_id: String,
    pub username: String,
    pub total_xp: i64,
    pub updated_at: DateTime<Utc>,
}

impl From<XpAccountRow> for XpAccount {
    fn from(row: XpAccountRow) -> Self {
        Self {
            user_id: row.user_id,
            username: row.username,
            total_xp: row.total_xp,
            updated_at: row.updated_at,
        }
    }
}

/// Stored dashboard member.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = dashboard_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MemberRow {
    pub user_id: String,
    pub username: String,
    pub access_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Self {
            user_id: row.user_id,
            username: row.username,
            access_code: row.access_code,
            created_at: row.created_at,
        }
    }
}

/// Dashboard member awaiting insertion.
#[derive(Debug, Insertable)]
#[diesel(table_name = dashboard_members)]
pub struct NewMemberRow<'a> {
    pub user_id: &'a str,
    pub username: &'a str,
    pub access_code: &'a str,
    pub created_at: DateTime<Utc>,
}
