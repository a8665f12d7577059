//! Dashboard HTTP handlers.
//!
//! Dashboard endpoints are keyed by an opaque access code instead of a user
//! id: the code is resolved to its member first, then the request delegates
//! to the same services as the id-keyed endpoints.
//!
//! ```text
//! POST /api/dashboard/members
//! GET  /api/dashboard/members/{code}
//! GET  /api/dashboard/{code}/workouts
//! GET  /api/dashboard/{code}/best-prs
//! GET  /api/dashboard/{code}/deload-status
//! GET  /api/dashboard/{code}/core-foods
//! POST /api/dashboard/{code}/core-foods/toggle
//! POST /api/dashboard/{code}/log
//! GET  /api/dashboard/{code}/pr-history/{exercise}
//! ```

use std::collections::BTreeMap;

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::members::Member;
use crate::domain::training::{PrAttempt, PrRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_date, require, require_non_empty, validate_reps, validate_weight};
use crate::inbound::http::workouts::PlanExerciseResponse;

/// Request payload for enrolling a dashboard member.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberCreateRequest {
    /// Internal user identifier.
    pub user_id: Option<String>,
    /// Display name.
    pub username: Option<String>,
}

/// A dashboard member as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    /// Internal user identifier.
    pub user_id: String,
    /// Display name.
    pub username: String,
    /// Unique opaque access code.
    pub access_code: String,
    /// When the member was enrolled.
    pub created_at: DateTime<Utc>,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            user_id: member.user_id,
            username: member.username,
            access_code: member.access_code,
            created_at: member.created_at,
        }
    }
}

/// Plans grouped per letter for the dashboard.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardWorkoutsResponse {
    /// Internal user identifier.
    pub user_id: String,
    /// Display name.
    pub username: String,
    /// Letter → ordered exercises.
    pub workouts: BTreeMap<String, Vec<PlanExerciseResponse>>,
}

/// Request payload for the code-keyed attempt logger.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardLogRequest {
    /// Canonical exercise name.
    pub exercise: Option<String>,
    /// Lifted load; zero marks a bodyweight attempt.
    pub weight: Option<f64>,
    /// Repetitions performed.
    pub reps: Option<i32>,
}

/// Response payload for the code-keyed attempt logger.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardLogResponse {
    /// Whether the attempt beat the prior best in its pool.
    pub is_pr: bool,
    /// Display form of the best attempt after this log.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_best_pr: Option<String>,
    /// Estimated one-rep-max of the logged attempt.
    pub estimated_one_rep_max: f64,
}

/// Request payload for the core-food toggle.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    /// Day to toggle (`YYYY-MM-DD`).
    pub date: Option<String>,
}

/// Response payload for the core-food toggle.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    /// Resulting check-in state for the day.
    pub checked: bool,
    /// The toggled day.
    pub date: String,
}

/// One point of an exercise's PR history.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrPointResponse {
    /// Lifted load.
    pub weight: f64,
    /// Repetitions performed.
    pub reps: i32,
    /// Estimated one-rep-max.
    pub estimated_one_rep_max: f64,
    /// When the attempt was logged.
    pub recorded_at: DateTime<Utc>,
}

impl From<PrRecord> for PrPointResponse {
    fn from(record: PrRecord) -> Self {
        Self {
            weight: record.weight,
            reps: record.reps,
            estimated_one_rep_max: record.estimated_one_rep_max,
            recorded_at: record.recorded_at,
        }
    }
}

/// Enroll a dashboard member, issuing a unique access code.
///
/// Enrolling an existing user returns the current member unchanged.
#[utoipa::path(
    post,
    path = "/api/dashboard/members",
    request_body = MemberCreateRequest,
    responses(
        (status = 200, description = "Member enrolled or already present", body = MemberResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "createDashboardMember"
)]
#[post("/api/dashboard/members")]
pub async fn create_member(
    state: web::Data<HttpState>,
    payload: web::Json<MemberCreateRequest>,
) -> ApiResult<web::Json<MemberResponse>> {
    let payload = payload.into_inner();
    let user_id = require(payload.user_id, "userId")?;
    require_non_empty(&user_id, "userId")?;
    let username = require(payload.username, "username")?;
    require_non_empty(&username, "username")?;

    let member = state.members.enroll(&user_id, &username).await?;
    Ok(web::Json(member.into()))
}

/// Resolve an access code to its member.
#[utoipa::path(
    get,
    path = "/api/dashboard/members/{code}",
    params(("code" = String, Path, description = "Access code")),
    responses(
        (status = 200, description = "Member", body = MemberResponse),
        (status = 404, description = "Unknown code", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "getDashboardMember"
)]
#[get("/api/dashboard/members/{code}")]
pub async fn get_member(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MemberResponse>> {
    let member = state.members.resolve(&path.into_inner()).await?;
    Ok(web::Json(member.into()))
}

/// All of the member's plans, grouped per letter.
#[utoipa::path(
    get,
    path = "/api/dashboard/{code}/workouts",
    params(("code" = String, Path, description = "Access code")),
    responses(
        (status = 200, description = "Plans grouped per letter", body = DashboardWorkoutsResponse),
        (status = 404, description = "Unknown code", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "dashboardWorkouts"
)]
#[get("/api/dashboard/{code}/workouts")]
pub async fn workouts(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DashboardWorkoutsResponse>> {
    let member = state.members.resolve(&path.into_inner()).await?;
    let plans = state.workouts.plans(&member.user_id).await?;
    let workouts = plans
        .into_iter()
        .map(|plan| {
            (
                plan.workout_letter,
                plan.exercises.into_iter().map(Into::into).collect(),
            )
        })
        .collect();
    Ok(web::Json(DashboardWorkoutsResponse {
        user_id: member.user_id,
        username: member.username,
        workouts,
    }))
}

/// Best attempt per exercise, in the dashboard's short display form.
#[utoipa::path(
    get,
    path = "/api/dashboard/{code}/best-prs",
    params(("code" = String, Path, description = "Access code")),
    responses(
        (status = 200, description = "Exercise → best attempt display form"),
        (status = 404, description = "Unknown code", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "dashboardBestPrs"
)]
#[get("/api/dashboard/{code}/best-prs")]
pub async fn best_prs(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BTreeMap<String, String>>> {
    let member = state.members.resolve(&path.into_inner()).await?;
    let bests = state.training.best_lifts(&member.user_id).await?;
    Ok(web::Json(
        bests
            .into_iter()
            .map(|best| (best.exercise.clone(), best.display()))
            .collect(),
    ))
}

/// Letter → completion count, as rendered on the deload card.
#[utoipa::path(
    get,
    path = "/api/dashboard/{code}/deload-status",
    params(("code" = String, Path, description = "Access code")),
    responses(
        (status = 200, description = "Letter → completion count"),
        (status = 404, description = "Unknown code", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "dashboardDeloadStatus"
)]
#[get("/api/dashboard/{code}/deload-status")]
pub async fn deload_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BTreeMap<String, i32>>> {
    let member = state.members.resolve(&path.into_inner()).await?;
    let status = state.workouts.deload_status(&member.user_id).await?;
    Ok(web::Json(
        status
            .into_iter()
            .map(|s| (s.workout_letter, s.completion_count))
            .collect(),
    ))
}

/// Date → checked map of the member's core-food history.
#[utoipa::path(
    get,
    path = "/api/dashboard/{code}/core-foods",
    params(("code" = String, Path, description = "Access code")),
    responses(
        (status = 200, description = "Date → checked"),
        (status = 404, description = "Unknown code", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "dashboardCoreFoods"
)]
#[get("/api/dashboard/{code}/core-foods")]
pub async fn core_foods(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BTreeMap<String, bool>>> {
    let member = state.members.resolve(&path.into_inner()).await?;
    let dates = state.nutrition.checked_dates(&member.user_id).await?;
    Ok(web::Json(
        dates
            .into_iter()
            .map(|date| (date.to_string(), true))
            .collect(),
    ))
}

/// Toggle a day's check-in from the dashboard.
#[utoipa::path(
    post,
    path = "/api/dashboard/{code}/core-foods/toggle",
    params(("code" = String, Path, description = "Access code")),
    request_body = ToggleRequest,
    responses(
        (status = 200, description = "Toggled", body = ToggleResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown code", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "dashboardToggleCoreFoods"
)]
#[post("/api/dashboard/{code}/core-foods/toggle")]
pub async fn toggle_core_foods(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ToggleRequest>,
) -> ApiResult<web::Json<ToggleResponse>> {
    let member = state.members.resolve(&path.into_inner()).await?;
    let raw = require(payload.into_inner().date, "date")?;
    let date = parse_date(&raw, "date")?;

    let checked = state.nutrition.toggle(&member.user_id, date).await?;
    Ok(web::Json(ToggleResponse {
        checked,
        date: date.to_string(),
    }))
}

/// Log an attempt against the member resolved from the access code.
#[utoipa::path(
    post,
    path = "/api/dashboard/{code}/log",
    params(("code" = String, Path, description = "Access code")),
    request_body = DashboardLogRequest,
    responses(
        (status = 200, description = "Attempt logged", body = DashboardLogResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown code", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "dashboardLog"
)]
#[post("/api/dashboard/{code}/log")]
pub async fn log_attempt(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<DashboardLogRequest>,
) -> ApiResult<web::Json<DashboardLogResponse>> {
    let member = state.members.resolve(&path.into_inner()).await?;
    let payload = payload.into_inner();
    let exercise = require(payload.exercise, "exercise")?;
    require_non_empty(&exercise, "exercise")?;
    let weight = require(payload.weight, "weight")?;
    validate_weight(weight)?;
    let reps = require(payload.reps, "reps")?;
    validate_reps(reps)?;

    let logged = state
        .training
        .log_attempt(PrAttempt {
            user_id: member.user_id.clone(),
            username: member.username.clone(),
            exercise: exercise.clone(),
            weight,
            reps,
        })
        .await?;
    let new_best = match state.training.best(&member.user_id, &exercise).await {
        Ok(best) => Some(best.display()),
        Err(err) if err.code() == crate::domain::ErrorCode::NotFound => None,
        Err(err) => return Err(err),
    };
    Ok(web::Json(DashboardLogResponse {
        is_pr: logged.is_new_pr,
        new_best_pr: new_best,
        estimated_one_rep_max: logged.record.estimated_one_rep_max,
    }))
}

/// Chronological PR history for one exercise.
#[utoipa::path(
    get,
    path = "/api/dashboard/{code}/pr-history/{exercise}",
    params(
        ("code" = String, Path, description = "Access code"),
        ("exercise" = String, Path, description = "Exercise name")
    ),
    responses(
        (status = 200, description = "Chronological history", body = [PrPointResponse]),
        (status = 404, description = "Unknown code", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "dashboardPrHistory"
)]
#[get("/api/dashboard/{code}/pr-history/{exercise}")]
pub async fn pr_history(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<Vec<PrPointResponse>>> {
    let (code, exercise) = path.into_inner();
    let member = state.members.resolve(&code).await?;
    let records = state
        .training
        .history_chronological(&member.user_id, &exercise)
        .await?;
    Ok(web::Json(records.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::training::NewPrRecord;
    use crate::inbound::http::test_utils::{TestStores, http_state, test_now};
    use actix_web::{App, http::StatusCode, test as actix_test};
    use serde_json::{Value, json};

    fn member() -> Member {
        Member {
            user_id: "u1".to_owned(),
            username: "ada".to_owned(),
            access_code: "code-1234".to_owned(),
            created_at: test_now(),
        }
    }

    fn resolving(stores: &mut TestStores) {
        stores.members.expect_find_by_code().returning(|code| {
            if code == "code-1234" {
                Ok(Some(member()))
            } else {
                Ok(None)
            }
        });
    }

    async fn call(
        stores: TestStores,
        request: actix_test::TestRequest,
    ) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(http_state(stores)))
                .service(create_member)
                .service(get_member)
                .service(workouts)
                .service(best_prs)
                .service(deload_status)
                .service(core_foods)
                .service(toggle_core_foods)
                .service(log_attempt)
                .service(pr_history),
        )
        .await;
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, value)
    }

    #[actix_rt::test]
    async fn enrolling_returns_the_issued_code() {
        let mut stores = TestStores::default();
        stores.members.expect_find_by_user().returning(|_| Ok(None));
        stores.members.expect_insert().returning(|new| {
            Ok(Member {
                user_id: new.user_id,
                username: new.username,
                access_code: new.access_code,
                created_at: new.created_at,
            })
        });

        let request = actix_test::TestRequest::post()
            .uri("/api/dashboard/members")
            .set_json(json!({ "userId": "u1", "username": "ada" }));
        let (status, body) = call(stores, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["userId"], "u1");
        assert_eq!(body["accessCode"].as_str().map(str::len), Some(22));
    }

    #[actix_rt::test]
    async fn unknown_codes_are_404() {
        let mut stores = TestStores::default();
        resolving(&mut stores);

        let request = actix_test::TestRequest::get().uri("/api/dashboard/members/wrong");
        let (status, body) = call(stores, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "unknown dashboard code");
    }

    #[actix_rt::test]
    async fn code_keyed_logging_resolves_the_member() {
        let mut stores = TestStores::default();
        resolving(&mut stores);
        stores.prs.expect_best().returning(|_, _, _| Ok(None));
        stores
            .prs
            .expect_append()
            .withf(|new| new.user_id == "u1" && new.username == "ada")
            .returning(|new: NewPrRecord| {
                Ok(PrRecord {
                    id: 1,
                    user_id: new.user_id,
                    username: new.username,
                    exercise: new.exercise,
                    weight: new.weight,
                    reps: new.reps,
                    estimated_one_rep_max: new.estimated_one_rep_max,
                    recorded_at: new.recorded_at,
                })
            });
        stores
            .prs
            .expect_best_overall()
            .returning(|user_id, exercise| {
                Ok(Some(PrRecord {
                    id: 1,
                    user_id: user_id.to_owned(),
                    username: "ada".to_owned(),
                    exercise: exercise.to_owned(),
                    weight: 100.0,
                    reps: 5,
                    estimated_one_rep_max: 116.0,
                    recorded_at: test_now(),
                }))
            });
        stores
            .xp
            .expect_add_xp()
            .returning(|_, _, amount, _| Ok(amount));

        let request = actix_test::TestRequest::post()
            .uri("/api/dashboard/code-1234/log")
            .set_json(json!({ "exercise": "bench press", "weight": 100.0, "reps": 5 }));
        let (status, body) = call(stores, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isPr"], true);
        assert_eq!(body["newBestPr"], "100/5");
    }

    #[actix_rt::test]
    async fn toggle_reports_the_resulting_state() {
        let mut stores = TestStores::default();
        resolving(&mut stores);
        stores.core_foods.expect_delete().returning(|_, _| Ok(true));

        let request = actix_test::TestRequest::post()
            .uri("/api/dashboard/code-1234/core-foods/toggle")
            .set_json(json!({ "date": "2026-03-13" }));
        let (status, body) = call(stores, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checked"], false);
        assert_eq!(body["date"], "2026-03-13");
    }

    #[actix_rt::test]
    async fn best_prs_map_uses_display_form() {
        let mut stores = TestStores::default();
        resolving(&mut stores);
        stores
            .prs
            .expect_logged_exercises()
            .returning(|_| Ok(vec!["bench press".to_owned(), "pullup".to_owned()]));
        stores
            .prs
            .expect_best_overall()
            .returning(|user_id, exercise| {
                let (weight, reps) = if exercise == "pullup" {
                    (0.0, 12)
                } else {
                    (102.5, 3)
                };
                Ok(Some(PrRecord {
                    id: 1,
                    user_id: user_id.to_owned(),
                    username: "ada".to_owned(),
                    exercise: exercise.to_owned(),
                    weight,
                    reps,
                    estimated_one_rep_max: 1.0,
                    recorded_at: test_now(),
                }))
            });

        let request = actix_test::TestRequest::get().uri("/api/dashboard/code-1234/best-prs");
        let (status, body) = call(stores, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bench press"], "102.5/3");
        assert_eq!(body["pullup"], "BW/12");
    }
}
