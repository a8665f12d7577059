//! OpenAPI document served through Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::inbound::http;

/// Public OpenAPI surface used by Swagger UI and tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "coach-metrics",
        description = "Fitness-coaching metrics API: PRs, workout plans, deload counters, nutrition check-ins, and XP."
    ),
    paths(
        http::health::status,
        http::prs::log_pr,
        http::prs::history,
        http::prs::best,
        http::workouts::create_plan,
        http::workouts::get_plan,
        http::workouts::complete,
        http::workouts::deload_status,
        http::xp::award,
        http::xp::get_xp,
        http::xp::record_weekly_log,
        http::xp::can_submit,
        http::core_foods::check_in,
        http::core_foods::can_check_in,
        http::dashboard::create_member,
        http::dashboard::get_member,
        http::dashboard::workouts,
        http::dashboard::best_prs,
        http::dashboard::deload_status,
        http::dashboard::core_foods,
        http::dashboard::toggle_core_foods,
        http::dashboard::log_attempt,
        http::dashboard::pr_history,
    ),
    components(schemas(
        crate::domain::workouts::SpecialLogging,
        http::schemas::ErrorSchema,
        http::health::StatusResponse,
        http::prs::PrCreateRequest,
        http::prs::PrRecordResponse,
        http::prs::LogPrResponse,
        http::workouts::PlanCreateRequest,
        http::workouts::PlanExerciseRequest,
        http::workouts::PlanExerciseResponse,
        http::workouts::CompleteRequest,
        http::workouts::CompletionResponse,
        http::workouts::DeloadStatusResponse,
        http::xp::XpAwardRequest,
        http::xp::XpResponse,
        http::xp::WeeklyLogRequest,
        http::xp::CanSubmitResponse,
        http::core_foods::CheckinRequest,
        http::core_foods::CheckinResponse,
        http::core_foods::CanCheckinResponse,
        http::dashboard::MemberCreateRequest,
        http::dashboard::MemberResponse,
        http::dashboard::DashboardWorkoutsResponse,
        http::dashboard::DashboardLogRequest,
        http::dashboard::DashboardLogResponse,
        http::dashboard::ToggleRequest,
        http::dashboard::ToggleResponse,
        http::dashboard::PrPointResponse,
    )),
    tags(
        (name = "health", description = "Service status"),
        (name = "prs", description = "Personal records"),
        (name = "workouts", description = "Plans, completions, deload"),
        (name = "xp", description = "XP, levels, weekly logs"),
        (name = "core-foods", description = "Nutrition check-ins"),
        (name = "dashboard", description = "Access-code-keyed member endpoints")
    )
)]
pub struct ApiDoc;
