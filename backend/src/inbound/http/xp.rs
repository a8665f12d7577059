//! XP and weekly-log HTTP handlers.
//!
//! ```text
//! POST /api/xp/award
//! GET  /api/xp/{user_id}
//! POST /api/weekly-logs
//! GET  /api/weekly-logs/{user_id}/can-submit
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::game::XpSummary;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{require, require_non_empty};

/// Request payload for an explicit XP award.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct XpAwardRequest {
    /// Internal user identifier.
    pub user_id: Option<String>,
    /// Display name recorded on the account.
    pub username: Option<String>,
    /// XP to add; must be positive.
    pub xp_amount: Option<i64>,
    /// Informational reason, recorded in logs only.
    pub reason: Option<String>,
}

/// XP state as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct XpResponse {
    /// Internal user identifier.
    pub user_id: String,
    /// Display name recorded on the account.
    pub username: String,
    /// Lifetime XP total.
    pub total_xp: i64,
    /// Level derived from the total.
    pub level: i32,
    /// XP needed to advance out of the current level.
    pub xp_for_next_level: i64,
}

impl From<XpSummary> for XpResponse {
    fn from(summary: XpSummary) -> Self {
        Self {
            user_id: summary.user_id,
            username: summary.username,
            total_xp: summary.total_xp,
            level: summary.level,
            xp_for_next_level: summary.xp_for_next_level,
        }
    }
}

/// Request payload for recording a weekly log.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyLogRequest {
    /// Internal user identifier.
    pub user_id: Option<String>,
    /// XP granted for the submission.
    pub xp_awarded: Option<i32>,
}

/// Response payload for the weekly-log gate.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CanSubmitResponse {
    /// Whether a new weekly log may be submitted now.
    pub can_submit: bool,
    /// Whole days since the last submission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_since_last: Option<i64>,
}

/// Award XP to a user.
#[utoipa::path(
    post,
    path = "/api/xp/award",
    request_body = XpAwardRequest,
    responses(
        (status = 200, description = "XP awarded", body = XpResponse),
        (status = 400, description = "Invalid request or XP disabled", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["xp"],
    operation_id = "awardXp"
)]
#[post("/api/xp/award")]
pub async fn award(
    state: web::Data<HttpState>,
    payload: web::Json<XpAwardRequest>,
) -> ApiResult<web::Json<XpResponse>> {
    let payload = payload.into_inner();
    let user_id = require(payload.user_id, "userId")?;
    require_non_empty(&user_id, "userId")?;
    let username = require(payload.username, "username")?;
    let amount = require(payload.xp_amount, "xpAmount")?;
    let reason = payload.reason.unwrap_or_else(|| "unspecified".to_owned());

    let summary = state.game.award(&user_id, &username, amount, &reason).await?;
    Ok(web::Json(summary.into()))
}

/// Fetch a user's XP and derived level.
#[utoipa::path(
    get,
    path = "/api/xp/{user_id}",
    params(("user_id" = String, Path, description = "Internal user identifier")),
    responses(
        (status = 200, description = "XP state", body = XpResponse),
        (status = 404, description = "No XP account", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["xp"],
    operation_id = "getXp"
)]
#[get("/api/xp/{user_id}")]
pub async fn get_xp(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<XpResponse>> {
    let user_id = path.into_inner();
    let summary = state.game.summary(&user_id).await?;
    Ok(web::Json(summary.into()))
}

/// Record a weekly training-log submission.
#[utoipa::path(
    post,
    path = "/api/weekly-logs",
    request_body = WeeklyLogRequest,
    responses(
        (status = 200, description = "Weekly log recorded"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["xp"],
    operation_id = "recordWeeklyLog"
)]
#[post("/api/weekly-logs")]
pub async fn record_weekly_log(
    state: web::Data<HttpState>,
    payload: web::Json<WeeklyLogRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let user_id = require(payload.user_id, "userId")?;
    require_non_empty(&user_id, "userId")?;
    let xp_awarded = require(payload.xp_awarded, "xpAwarded")?;
    if xp_awarded < 0 {
        return Err(Error::invalid_request("xpAwarded must not be negative"));
    }

    state.game.record_weekly_log(&user_id, xp_awarded).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "xpAwarded": xp_awarded })))
}

/// Whether the user may submit another weekly log yet.
#[utoipa::path(
    get,
    path = "/api/weekly-logs/{user_id}/can-submit",
    params(("user_id" = String, Path, description = "Internal user identifier")),
    responses(
        (status = 200, description = "Submission gate", body = CanSubmitResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["xp"],
    operation_id = "canSubmitWeeklyLog"
)]
#[get("/api/weekly-logs/{user_id}/can-submit")]
pub async fn can_submit(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CanSubmitResponse>> {
    let user_id = path.into_inner();
    let gate = state.game.weekly_log_gate(&user_id).await?;
    Ok(web::Json(CanSubmitResponse {
        can_submit: gate.can_submit,
        days_since_last: gate.days_since_last,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::game::XpAccount;
    use crate::inbound::http::test_utils::{TestStores, http_state, test_now};
    use actix_web::{App, http::StatusCode, test as actix_test};
    use chrono::Duration;
    use serde_json::Value;

    async fn call(
        stores: TestStores,
        request: actix_test::TestRequest,
    ) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(http_state(stores)))
                .service(award)
                .service(get_xp)
                .service(record_weekly_log)
                .service(can_submit),
        )
        .await;
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, value)
    }

    #[actix_rt::test]
    async fn awarding_xp_reports_the_new_level() {
        let mut stores = TestStores::default();
        stores.xp.expect_add_xp().returning(|_, _, _, _| Ok(1250));

        let request = actix_test::TestRequest::post().uri("/api/xp/award").set_json(
            serde_json::json!({
                "userId": "u1",
                "username": "ada",
                "xpAmount": 100,
                "reason": "weekly_log",
            }),
        );
        let (status, body) = call(stores, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalXp"], 1250);
        assert_eq!(body["level"], 3);
        assert_eq!(body["xpForNextLevel"], 1000);
    }

    #[actix_rt::test]
    async fn zero_awards_are_rejected() {
        let request = actix_test::TestRequest::post().uri("/api/xp/award").set_json(
            serde_json::json!({
                "userId": "u1",
                "username": "ada",
                "xpAmount": 0,
            }),
        );
        let (status, body) = call(TestStores::default(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");
    }

    #[actix_rt::test]
    async fn xp_query_derives_the_level_from_the_total() {
        let mut stores = TestStores::default();
        stores.xp.expect_account().returning(|user_id| {
            Ok(Some(XpAccount {
                user_id: user_id.to_owned(),
                username: "ada".to_owned(),
                total_xp: 499,
                updated_at: test_now(),
            }))
        });

        let request = actix_test::TestRequest::get().uri("/api/xp/u1");
        let (status, body) = call(stores, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["level"], 1);
        assert_eq!(body["xpForNextLevel"], 500);
    }

    #[actix_rt::test]
    async fn unknown_xp_account_is_404() {
        let mut stores = TestStores::default();
        stores.xp.expect_account().returning(|_| Ok(None));

        let request = actix_test::TestRequest::get().uri("/api/xp/nobody");
        let (status, body) = call(stores, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }

    #[actix_rt::test]
    async fn weekly_log_gate_round_trips() {
        let mut stores = TestStores::default();
        stores
            .weekly_logs
            .expect_latest_at()
            .returning(|_| Ok(Some(test_now() - Duration::days(3))));

        let request = actix_test::TestRequest::get().uri("/api/weekly-logs/u1/can-submit");
        let (status, body) = call(stores, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["canSubmit"], false);
        assert_eq!(body["daysSinceLast"], 3);
    }
}
