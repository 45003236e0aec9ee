use crate::dates::{format_long, parse_date_key, today_date};
use crate::errors::AppError;
use crate::history::{build_calendar, current_month_entries, entry_views, sorted_entries};
use crate::models::{
    CalendarQuery, CalendarResponse, DeleteResponse, EntryView, FlushResponse, MAX_MOOD_CHARS,
    MOOD_OPTIONS, MoodEntry, MoodOption, MoodRequest, NoteRequest,
};
use crate::session::SessionSnapshot;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use chrono::Datelike;
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.session.snapshot();
    Html(render_index(&format_long(today_date()), &snapshot.mood))
}

pub async fn get_today(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.snapshot())
}

pub async fn select_mood(
    State(state): State<AppState>,
    Json(payload): Json<MoodRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mood = payload.mood.trim();
    if mood.chars().count() > MAX_MOOD_CHARS {
        return Err(AppError::bad_request(format!(
            "mood must be at most {MAX_MOOD_CHARS} characters"
        )));
    }

    state.session.select_mood(mood);
    Ok(Json(state.session.snapshot()))
}

pub async fn edit_note(
    State(state): State<AppState>,
    Json(payload): Json<NoteRequest>,
) -> Json<SessionSnapshot> {
    state.session.edit_note(&payload.note);
    Json(state.session.snapshot())
}

pub async fn clear_today(State(state): State<AppState>) -> Json<SessionSnapshot> {
    state.session.clear_today();
    Json(state.session.snapshot())
}

pub async fn flush(State(state): State<AppState>) -> Json<FlushResponse> {
    Json(FlushResponse {
        saved: state.session.flush(),
    })
}

pub async fn list_moods() -> Json<Vec<MoodOption>> {
    Json(MOOD_OPTIONS.to_vec())
}

pub async fn list_entries(State(state): State<AppState>) -> Json<Vec<EntryView>> {
    Json(entry_views(sorted_entries(&state.storage)))
}

pub async fn month_entries(State(state): State<AppState>) -> Json<Vec<EntryView>> {
    Json(entry_views(current_month_entries(&state.storage)))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<MoodEntry>, AppError> {
    parse_date_key(&date)?;
    state
        .storage
        .get(&date)
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no entry for {date}")))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    parse_date_key(&date)?;
    if !state.storage.delete(&date) {
        return Err(AppError::internal("failed to delete entry"));
    }

    info!(%date, "deleted mood entry");
    state.session.refresh_history();
    Ok(Json(DeleteResponse { deleted: true }))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<DeleteResponse>, AppError> {
    if !state.storage.clear() {
        return Err(AppError::internal("failed to clear mood data"));
    }

    info!("cleared all mood data");
    state.session.refresh_history();
    Ok(Json(DeleteResponse { deleted: true }))
}

pub async fn calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let today = today_date();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    build_calendar(&state.storage, year, month)
        .map(Json)
        .ok_or_else(|| AppError::bad_request("month is not a displayable calendar month"))
}
