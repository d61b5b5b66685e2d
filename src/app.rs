use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/weeks", get(handlers::list_weeks))
        .route("/api/weeks/by-month", get(handlers::weeks_by_month))
        .route("/api/members", get(handlers::list_members).post(handlers::add_member))
        .route(
            "/api/members/:id",
            put(handlers::update_member).delete(handlers::remove_member),
        )
        .route(
            "/api/attendance/:member_id/:week",
            get(handlers::get_attendance).put(handlers::set_attendance),
        )
        .route(
            "/api/attendance/:member_id/:week/toggle",
            post(handlers::toggle_attendance),
        )
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/stats/members/:id", get(handlers::get_member_stats))
        .route("/api/stats/weeks/:week", get(handlers::get_week_stats))
        .route("/api/absentees", get(handlers::get_absentees))
        .route("/api/export", get(handlers::export))
        .route("/api/import", post(handlers::import))
        .route("/api/snapshot", get(handlers::snapshot))
        .with_state(state)
}
