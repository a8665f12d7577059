//! Personal-record HTTP handlers.
//!
//! ```text
//! POST /api/prs
//! GET  /api/prs/{user_id}
//! GET  /api/prs/{user_id}/best/{exercise}
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::training::{LoggedAttempt, PrAttempt, PrRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    clamp_limit, require, require_non_empty, validate_reps, validate_weight,
};

/// Request payload for logging an attempt.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrCreateRequest {
    /// Internal user identifier.
    pub user_id: Option<String>,
    /// Display name captured with the attempt.
    pub username: Option<String>,
    /// Canonical exercise name.
    pub exercise: Option<String>,
    /// Lifted load; zero marks a bodyweight attempt.
    pub weight: Option<f64>,
    /// Repetitions performed.
    pub reps: Option<i32>,
}

/// A persisted attempt as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrRecordResponse {
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
    /// Estimated one-rep-max used for ranking.
    pub estimated_one_rep_max: f64,
    /// When the attempt was logged.
    pub recorded_at: DateTime<Utc>,
}

impl From<PrRecord> for PrRecordResponse {
    fn from(record: PrRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            username: record.username,
            exercise: record.exercise,
            weight: record.weight,
            reps: record.reps,
            estimated_one_rep_max: record.estimated_one_rep_max,
            recorded_at: record.recorded_at,
        }
    }
}

/// Response payload for a logged attempt.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogPrResponse {
    /// The persisted record.
    #[serde(flatten)]
    pub record: PrRecordResponse,
    /// Whether the attempt beat the prior best in its pool.
    pub is_new_pr: bool,
    /// XP granted for the attempt.
    pub xp_awarded: i64,
}

impl From<LoggedAttempt> for LogPrResponse {
    fn from(logged: LoggedAttempt) -> Self {
        Self {
            record: logged.record.into(),
            is_new_pr: logged.is_new_pr,
            xp_awarded: logged.xp_awarded,
        }
    }
}

/// Query parameters for the history endpoint.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Restrict history to one exercise.
    pub exercise: Option<String>,
    /// Page size, defaulting to 100 and capped at 1000.
    pub limit: Option<i64>,
}

fn parse_attempt(payload: PrCreateRequest) -> Result<PrAttempt, crate::domain::Error> {
    let user_id = require(payload.user_id, "userId")?;
    require_non_empty(&user_id, "userId")?;
    let username = require(payload.username, "username")?;
    let exercise = require(payload.exercise, "exercise")?;
    require_non_empty(&exercise, "exercise")?;
    let weight = require(payload.weight, "weight")?;
    validate_weight(weight)?;
    let reps = require(payload.reps, "reps")?;
    validate_reps(reps)?;
    Ok(PrAttempt {
        user_id,
        username,
        exercise,
        weight,
        reps,
    })
}

/// Log an attempt and evaluate it against the prior best.
#[utoipa::path(
    post,
    path = "/api/prs",
    request_body = PrCreateRequest,
    responses(
        (status = 200, description = "Attempt logged", body = LogPrResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["prs"],
    operation_id = "logPr"
)]
#[post("/api/prs")]
pub async fn log_pr(
    state: web::Data<HttpState>,
    payload: web::Json<PrCreateRequest>,
) -> ApiResult<web::Json<LogPrResponse>> {
    let attempt = parse_attempt(payload.into_inner())?;
    let logged = state.training.log_attempt(attempt).await?;
    Ok(web::Json(logged.into()))
}

/// Attempt history for a user, newest first.
#[utoipa::path(
    get,
    path = "/api/prs/{user_id}",
    params(
        ("user_id" = String, Path, description = "Internal user identifier"),
        ("exercise" = Option<String>, Query, description = "Restrict to one exercise"),
        ("limit" = Option<i64>, Query, description = "Page size (default 100, max 1000)")
    ),
    responses(
        (status = 200, description = "Attempt history", body = [PrRecordResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["prs"],
    operation_id = "prHistory"
)]
#[get("/api/prs/{user_id}")]
pub async fn history(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<HistoryQuery>,
) -> ApiResult<web::Json<Vec<PrRecordResponse>>> {
    let user_id = path.into_inner();
    let records = state
        .training
        .history(
            &user_id,
            query.exercise.as_deref(),
            clamp_limit(query.limit),
        )
        .await?;
    Ok(web::Json(records.into_iter().map(Into::into).collect()))
}

/// Best attempt for (user, exercise), ranked by estimated one-rep-max.
#[utoipa::path(
    get,
    path = "/api/prs/{user_id}/best/{exercise}",
    params(
        ("user_id" = String, Path, description = "Internal user identifier"),
        ("exercise" = String, Path, description = "Exercise name")
    ),
    responses(
        (status = 200, description = "Best attempt", body = PrRecordResponse),
        (status = 404, description = "No attempts for that exercise", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["prs"],
    operation_id = "bestPr"
)]
#[get("/api/prs/{user_id}/best/{exercise}")]
pub async fn best(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<PrRecordResponse>> {
    let (user_id, exercise) = path.into_inner();
    let record = state.training.best(&user_id, &exercise).await?;
    Ok(web::Json(record.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockPrStore;
    use crate::domain::training::NewPrRecord;
    use crate::inbound::http::test_utils::{TestStores, http_state, test_now};
    use actix_web::{App, http::StatusCode, test as actix_test};
    use serde_json::{Value, json};

    fn stored(new: &NewPrRecord) -> PrRecord {
        PrRecord {
            id: 1,
            user_id: new.user_id.clone(),
            username: new.username.clone(),
            exercise: new.exercise.clone(),
            weight: new.weight,
            reps: new.reps,
            estimated_one_rep_max: new.estimated_one_rep_max,
            recorded_at: new.recorded_at,
        }
    }

    async fn call(
        stores: TestStores,
        request: actix_test::TestRequest,
    ) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(http_state(stores)))
                .service(log_pr)
                .service(history)
                .service(best),
        )
        .await;
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, value)
    }

    #[actix_rt::test]
    async fn logging_a_first_attempt_reports_a_new_pr() {
        let mut stores = TestStores::default();
        stores.prs.expect_best().returning(|_, _, _| Ok(None));
        stores.prs.expect_append().returning(|new| Ok(stored(&new)));
        stores
            .xp
            .expect_add_xp()
            .returning(|_, _, amount, _| Ok(amount));

        let request = actix_test::TestRequest::post().uri("/api/prs").set_json(json!({
            "userId": "u1",
            "username": "ada",
            "exercise": "bench press",
            "weight": 100.0,
            "reps": 5,
        }));
        let (status, body) = call(stores, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isNewPr"], true);
        assert_eq!(body["xpAwarded"], 50);
        let expected = 100.0 * (1.0 + 5.0 / 30.0);
        assert!((body["estimatedOneRepMax"].as_f64().unwrap() - expected).abs() < 1e-9);
    }

    #[actix_rt::test]
    async fn negative_weight_is_rejected_before_any_persistence() {
        let mut stores = TestStores::default();
        stores.prs.expect_append().times(0);

        let request = actix_test::TestRequest::post().uri("/api/prs").set_json(json!({
            "userId": "u1",
            "username": "ada",
            "exercise": "bench press",
            "weight": -10.0,
            "reps": 5,
        }));
        let (status, body) = call(stores, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], "weight");
    }

    #[actix_rt::test]
    async fn missing_reps_is_a_structured_validation_error() {
        let request = actix_test::TestRequest::post().uri("/api/prs").set_json(json!({
            "userId": "u1",
            "username": "ada",
            "exercise": "bench press",
            "weight": 100.0,
        }));
        let (status, body) = call(TestStores::default(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], "reps");
        assert_eq!(body["details"]["code"], "missing_field");
    }

    #[actix_rt::test]
    async fn history_passes_filters_through() {
        let mut stores = TestStores::default();
        stores
            .prs
            .expect_history()
            .withf(|user_id, exercise, limit| {
                user_id == "u1" && exercise.as_deref() == Some("squat") && *limit == 5
            })
            .returning(|user_id, _, _| {
                Ok(vec![PrRecord {
                    id: 3,
                    user_id: user_id.to_owned(),
                    username: "ada".to_owned(),
                    exercise: "squat".to_owned(),
                    weight: 140.0,
                    reps: 3,
                    estimated_one_rep_max: 154.0,
                    recorded_at: test_now(),
                }])
            });

        let request =
            actix_test::TestRequest::get().uri("/api/prs/u1?exercise=squat&limit=5");
        let (status, body) = call(stores, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["exercise"], "squat");
    }

    #[actix_rt::test]
    async fn best_returns_404_when_nothing_is_logged() {
        let mut stores = TestStores::default();
        stores.prs.expect_best_overall().returning(|_, _| Ok(None));

        let request = actix_test::TestRequest::get().uri("/api/prs/u1/best/deadlift");
        let (status, body) = call(stores, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }
}
