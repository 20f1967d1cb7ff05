use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/delta", post(handlers::form_delta))
        .route("/backlog", post(handlers::form_backlog))
        .route("/goal", post(handlers::form_goal))
        .route("/entries/:date/delete", post(handlers::form_delete))
        .route("/api/today", get(handlers::get_today))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/entries", get(handlers::get_entries))
        .route("/api/entries/:date", delete(handlers::delete_entry))
        .route("/api/delta", post(handlers::add_delta))
        .route("/api/backlog", post(handlers::add_backlog))
        .route("/api/goal", put(handlers::set_goal))
        .with_state(state)
}
