use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/stats", get(handlers::get_stats))
        .route(
            "/api/sessions",
            get(handlers::list_sessions).post(handlers::save_session),
        )
        .route("/api/last-session", get(handlers::get_last_session))
        .route(
            "/api/sessions/:date",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/api/calendar", get(handlers::get_calendar))
        .route(
            "/api/resources",
            get(handlers::list_resources).post(handlers::create_resource),
        )
        .route(
            "/api/resources/:id",
            delete(handlers::delete_resource),
        )
        .route(
            "/api/resources/:id/complete",
            post(handlers::complete_resource),
        )
        .route(
            "/api/resources/:id/spotlight",
            post(handlers::spotlight_resource),
        )
        .route("/api/spotlight", get(handlers::get_spotlight))
        .route("/api/prompts", get(handlers::get_prompts))
        .with_state(state)
}
