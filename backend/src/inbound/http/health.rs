//! Service status handler.

use actix_web::{HttpResponse, get};
use serde::Serialize;
use utoipa::ToSchema;

/// Status envelope returned from the root path.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    /// Always `healthy` while the service is able to answer.
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Crate version.
    pub version: &'static str,
}

/// Report service liveness.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service status", body = StatusResponse)),
    tags = ["health"],
    operation_id = "serviceStatus"
)]
#[get("/")]
pub async fn status() -> HttpResponse {
    HttpResponse::Ok().json(StatusResponse {
        status: "healthy",
        service: "coach-metrics",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test as actix_test};
    use serde_json::Value;

    #[actix_rt::test]
    async fn root_reports_healthy() {
        let app = actix_test::init_service(App::new().service(status)).await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;
        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "coach-metrics");
    }
}
