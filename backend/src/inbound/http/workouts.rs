//! Workout plan and completion HTTP handlers.
//!
//! ```text
//! POST /api/workouts
//! GET  /api/workouts/{user_id}/{workout_letter}
//! POST /api/workouts/complete
//! GET  /api/workouts/{user_id}/deload-status
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::workouts::{CompletionOutcome, DeloadStatus, PlanExercise, SpecialLogging};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{require, require_non_empty, validate_workout_letter};

/// One plan slot in a create request.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanExerciseRequest {
    /// Position within the plan; defaults to the slot's list index.
    pub exercise_order: Option<i32>,
    /// Exercise name as shown to the member.
    pub exercise_name: Option<String>,
    /// Free-text setup notes.
    pub setup_notes: Option<String>,
    /// Non-standard logging treatment.
    pub special_logging: Option<SpecialLogging>,
}

/// Request payload for replacing a plan.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanCreateRequest {
    /// Internal user identifier.
    pub user_id: Option<String>,
    /// Workout letter the plan belongs to.
    pub workout_letter: Option<String>,
    /// Ordered exercise slots.
    pub exercises: Option<Vec<PlanExerciseRequest>>,
}

/// One plan slot as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanExerciseResponse {
    /// Position within the plan.
    pub exercise_order: i32,
    /// Exercise name.
    pub exercise_name: String,
    /// Free-text setup notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_notes: Option<String>,
    /// Non-standard logging treatment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_logging: Option<SpecialLogging>,
}

impl From<PlanExercise> for PlanExerciseResponse {
    fn from(exercise: PlanExercise) -> Self {
        Self {
            exercise_order: exercise.position,
            exercise_name: exercise.exercise_name,
            setup_notes: exercise.setup_notes,
            special_logging: exercise.special_logging,
        }
    }
}

/// Request payload for marking a workout complete.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRequest {
    /// Internal user identifier.
    pub user_id: Option<String>,
    /// Workout letter being completed.
    pub workout_letter: Option<String>,
}

/// Response payload after a completion.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResponse {
    /// Workout letter that was completed.
    pub workout_letter: String,
    /// Counter value after the increment.
    pub completion_count: i32,
    /// True once the counter reaches the deload threshold.
    pub needs_deload: bool,
    /// XP granted for the completion.
    pub xp_awarded: i64,
}

impl From<CompletionOutcome> for CompletionResponse {
    fn from(outcome: CompletionOutcome) -> Self {
        Self {
            workout_letter: outcome.workout_letter,
            completion_count: outcome.completion_count,
            needs_deload: outcome.needs_deload,
            xp_awarded: outcome.xp_awarded,
        }
    }
}

/// Per-letter deload status.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeloadStatusResponse {
    /// Workout letter.
    pub workout_letter: String,
    /// Completions since the last reset.
    pub completion_count: i32,
    /// True once the counter reaches the deload threshold.
    pub needs_deload: bool,
    /// Most recent completion, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_completed_at: Option<DateTime<Utc>>,
}

impl From<DeloadStatus> for DeloadStatusResponse {
    fn from(status: DeloadStatus) -> Self {
        Self {
            workout_letter: status.workout_letter,
            completion_count: status.completion_count,
            needs_deload: status.needs_deload,
            last_completed_at: status.last_completed_at,
        }
    }
}

fn parse_plan_exercises(
    slots: Vec<PlanExerciseRequest>,
) -> Result<Vec<PlanExercise>, crate::domain::Error> {
    if slots.is_empty() {
        return Err(crate::domain::Error::invalid_request(
            "a plan needs at least one exercise",
        )
        .with_details(json!({ "field": "exercises", "code": "empty" })));
    }
    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            let exercise_name = require(slot.exercise_name, "exerciseName")?;
            require_non_empty(&exercise_name, "exerciseName")?;
            let fallback = i32::try_from(index).unwrap_or(i32::MAX - 1) + 1;
            Ok(PlanExercise {
                position: slot.exercise_order.unwrap_or(fallback),
                exercise_name,
                setup_notes: slot.setup_notes,
                special_logging: slot.special_logging,
            })
        })
        .collect()
}

/// Replace the plan for (user, letter).
#[utoipa::path(
    post,
    path = "/api/workouts",
    request_body = PlanCreateRequest,
    responses(
        (status = 200, description = "Plan replaced"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["workouts"],
    operation_id = "createWorkoutPlan"
)]
#[post("/api/workouts")]
pub async fn create_plan(
    state: web::Data<HttpState>,
    payload: web::Json<PlanCreateRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let user_id = require(payload.user_id, "userId")?;
    require_non_empty(&user_id, "userId")?;
    let workout_letter = require(payload.workout_letter, "workoutLetter")?;
    validate_workout_letter(&workout_letter)?;
    let exercises = parse_plan_exercises(require(payload.exercises, "exercises")?)?;

    state
        .workouts
        .save_plan(&user_id, &workout_letter, exercises)
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "workoutLetter": workout_letter,
    })))
}

/// Ordered plan for one letter.
#[utoipa::path(
    get,
    path = "/api/workouts/{user_id}/{workout_letter}",
    params(
        ("user_id" = String, Path, description = "Internal user identifier"),
        ("workout_letter" = String, Path, description = "Workout letter")
    ),
    responses(
        (status = 200, description = "Ordered plan", body = [PlanExerciseResponse]),
        (status = 404, description = "No plan for that letter", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["workouts"],
    operation_id = "getWorkoutPlan"
)]
#[get("/api/workouts/{user_id}/{workout_letter}")]
pub async fn get_plan(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<Vec<PlanExerciseResponse>>> {
    let (user_id, workout_letter) = path.into_inner();
    let exercises = state.workouts.plan(&user_id, &workout_letter).await?;
    Ok(web::Json(exercises.into_iter().map(Into::into).collect()))
}

/// Mark a workout complete, applying the deload rollover.
#[utoipa::path(
    post,
    path = "/api/workouts/complete",
    request_body = CompleteRequest,
    responses(
        (status = 200, description = "Completion recorded", body = CompletionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["workouts"],
    operation_id = "completeWorkout"
)]
#[post("/api/workouts/complete")]
pub async fn complete(
    state: web::Data<HttpState>,
    payload: web::Json<CompleteRequest>,
) -> ApiResult<web::Json<CompletionResponse>> {
    let payload = payload.into_inner();
    let user_id = require(payload.user_id, "userId")?;
    require_non_empty(&user_id, "userId")?;
    let workout_letter = require(payload.workout_letter, "workoutLetter")?;
    validate_workout_letter(&workout_letter)?;

    let outcome = state.workouts.complete(&user_id, &workout_letter).await?;
    Ok(web::Json(outcome.into()))
}

/// Deload status for every letter the user has.
#[utoipa::path(
    get,
    path = "/api/workouts/{user_id}/deload-status",
    params(("user_id" = String, Path, description = "Internal user identifier")),
    responses(
        (status = 200, description = "Per-letter status", body = [DeloadStatusResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["workouts"],
    operation_id = "deloadStatus"
)]
#[get("/api/workouts/{user_id}/deload-status")]
pub async fn deload_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<DeloadStatusResponse>>> {
    let user_id = path.into_inner();
    let status = state.workouts.deload_status(&user_id).await?;
    Ok(web::Json(status.into_iter().map(Into::into).collect()))
}
