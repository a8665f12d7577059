//! HTTP server assembly.

pub mod config;

pub use config::AppConfig;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::ApiDoc;
use crate::inbound::http::{self, HttpState};
use crate::middleware::Trace;

/// Assemble the application with every route and middleware attached.
///
/// Route order matters where a literal segment shadows a path parameter:
/// `deload-status` must register before the plan-by-letter route, and the
/// member routes before the code-keyed dashboard scope.
pub fn build_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    #[cfg_attr(not(debug_assertions), expect(unused_mut, reason = "Swagger UI is debug-only"))]
    let mut app = App::new()
        .app_data(state)
        .wrap(Trace)
        .service(http::health::status)
        .service(http::prs::log_pr)
        .service(http::prs::best)
        .service(http::prs::history)
        .service(http::workouts::create_plan)
        .service(http::workouts::complete)
        .service(http::workouts::deload_status)
        .service(http::workouts::get_plan)
        .service(http::xp::award)
        .service(http::xp::get_xp)
        .service(http::xp::record_weekly_log)
        .service(http::xp::can_submit)
        .service(http::core_foods::check_in)
        .service(http::core_foods::can_check_in)
        .service(http::dashboard::create_member)
        .service(http::dashboard::get_member)
        .service(http::dashboard::workouts)
        .service(http::dashboard::best_prs)
        .service(http::dashboard::deload_status)
        .service(http::dashboard::core_foods)
        .service(http::dashboard::toggle_core_foods)
        .service(http::dashboard::log_attempt)
        .service(http::dashboard::pr_history);

    #[cfg(debug_assertions)]
    {
        app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app
}
