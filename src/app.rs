use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/today", get(handlers::get_today))
        .route("/api/today/mood", post(handlers::select_mood))
        .route("/api/today/note", post(handlers::edit_note))
        .route("/api/today/clear", post(handlers::clear_today))
        .route("/api/today/flush", post(handlers::flush))
        .route("/api/moods", get(handlers::list_moods))
        .route("/api/entries", get(handlers::list_entries))
        .route("/api/entries/month", get(handlers::month_entries))
        .route(
            "/api/entries/:date",
            get(handlers::get_entry).delete(handlers::delete_entry),
        )
        .route("/api/reset", post(handlers::reset))
        .route("/api/calendar", get(handlers::calendar))
        .with_state(state)
}
