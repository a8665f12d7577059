//! Core-food check-in HTTP handlers.
//!
//! ```text
//! POST /api/core-foods
//! GET  /api/core-foods/{user_id}/can-checkin
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_date, require, require_non_empty};

/// Request payload for a direct check-in.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRequest {
    /// Internal user identifier.
    pub user_id: Option<String>,
    /// Day to check in (`YYYY-MM-DD`); defaults to today (UTC).
    pub date: Option<String>,
}

/// Response payload for an accepted check-in.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckinResponse {
    /// Accepted day.
    pub date: String,
    /// How many days before today that is.
    pub days_ago: i64,
}

/// Response payload for the availability query.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CanCheckinResponse {
    /// Whether today's check-in is still available.
    pub can_checkin: bool,
}

/// Record a core-food check-in.
#[utoipa::path(
    post,
    path = "/api/core-foods",
    request_body = CheckinRequest,
    responses(
        (status = 200, description = "Check-in recorded", body = CheckinResponse),
        (status = 400, description = "Invalid date, duplicate, or outside the window", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["core-foods"],
    operation_id = "coreFoodCheckin"
)]
#[post("/api/core-foods")]
pub async fn check_in(
    state: web::Data<HttpState>,
    payload: web::Json<CheckinRequest>,
) -> ApiResult<web::Json<CheckinResponse>> {
    let payload = payload.into_inner();
    let user_id = require(payload.user_id, "userId")?;
    require_non_empty(&user_id, "userId")?;
    let date = payload
        .date
        .map(|raw| parse_date(&raw, "date"))
        .transpose()?;

    let outcome = state.nutrition.check_in(&user_id, date).await?;
    Ok(web::Json(CheckinResponse {
        date: outcome.checkin_date.to_string(),
        days_ago: outcome.days_ago,
    }))
}

/// Whether the user still has today's check-in available.
#[utoipa::path(
    get,
    path = "/api/core-foods/{user_id}/can-checkin",
    params(("user_id" = String, Path, description = "Internal user identifier")),
    responses(
        (status = 200, description = "Availability", body = CanCheckinResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["core-foods"],
    operation_id = "canCheckinCoreFoods"
)]
#[get("/api/core-foods/{user_id}/can-checkin")]
pub async fn can_check_in(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CanCheckinResponse>> {
    let user_id = path.into_inner();
    let available = state.nutrition.can_check_in_today(&user_id).await?;
    Ok(web::Json(CanCheckinResponse {
        can_checkin: available,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::StoreError;
    use crate::inbound::http::test_utils::{TestStores, http_state};
    use actix_web::{App, http::StatusCode, test as actix_test};
    use serde_json::{Value, json};

    async fn call(
        stores: TestStores,
        request: actix_test::TestRequest,
    ) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(http_state(stores)))
                .service(check_in)
                .service(can_check_in),
        )
        .await;
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, value)
    }

    #[actix_rt::test]
    async fn checkin_defaults_to_today() {
        let mut stores = TestStores::default();
        stores.core_foods.expect_insert().returning(|_, _, _| Ok(()));

        let request = actix_test::TestRequest::post()
            .uri("/api/core-foods")
            .set_json(json!({ "userId": "u1" }));
        let (status, body) = call(stores, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["date"], "2026-03-14");
        assert_eq!(body["daysAgo"], 0);
    }

    #[actix_rt::test]
    async fn future_dates_are_rejected() {
        let request = actix_test::TestRequest::post()
            .uri("/api/core-foods")
            .set_json(json!({ "userId": "u1", "date": "2026-03-20" }));
        let (status, body) = call(TestStores::default(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "cannot log future dates");
    }

    #[actix_rt::test]
    async fn duplicate_days_are_rejected() {
        let mut stores = TestStores::default();
        stores
            .core_foods
            .expect_insert()
            .returning(|_, _, _| Err(StoreError::conflict("duplicate")));

        let request = actix_test::TestRequest::post()
            .uri("/api/core-foods")
            .set_json(json!({ "userId": "u1", "date": "2026-03-14" }));
        let (status, body) = call(stores, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "already checked in for 2026-03-14");
    }

    #[actix_rt::test]
    async fn malformed_dates_are_rejected() {
        let request = actix_test::TestRequest::post()
            .uri("/api/core-foods")
            .set_json(json!({ "userId": "u1", "date": "03/14/2026" }));
        let (status, body) = call(TestStores::default(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["code"], "invalid_date");
    }

    #[actix_rt::test]
    async fn availability_reflects_todays_row() {
        let mut stores = TestStores::default();
        stores.core_foods.expect_exists().returning(|_, _| Ok(false));

        let request = actix_test::TestRequest::get().uri("/api/core-foods/u1/can-checkin");
        let (status, body) = call(stores, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["canCheckin"], true);
    }
}
