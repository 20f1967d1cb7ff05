use crate::errors::AppError;
use crate::models::{
    BacklogRequest, CalendarResponse, DayCountResponse, DeleteResponse, DeltaRequest, GoalRequest,
    MonthQuery, RecentEntry, RecentQuery, StatsResponse,
};
use crate::state::AppState;
use crate::stats::date_key;
use crate::storage::save_snapshot;
use crate::tracker::{parse_date, parse_optional_date, Tracker};
use crate::ui::{render_index, PAGE_RECENT_LIMIT};
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use chrono::{Datelike, Local, NaiveDate};
use tracing::{error, info};

const DEFAULT_RECENT_LIMIT: usize = 15;

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Html<String>, AppError> {
    let today = today();
    let tracker = state.tracker.lock().await;
    let (year, month) = month_or_current(&query, today);
    let stats = tracker.stats(today);
    let calendar = tracker.calendar(year, month, today)?;
    let recent = tracker.recent(today, PAGE_RECENT_LIMIT);
    Ok(Html(render_index(&stats, &calendar, &recent)))
}

pub async fn get_today(State(state): State<AppState>) -> Json<DayCountResponse> {
    let today = today();
    let tracker = state.tracker.lock().await;
    Json(DayCountResponse {
        date: date_key(today),
        count: tracker.count_on(today),
    })
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let tracker = state.tracker.lock().await;
    Json(tracker.stats(today()))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let today = today();
    let (year, month) = month_or_current(&query, today);
    let tracker = state.tracker.lock().await;
    Ok(Json(tracker.calendar(year, month, today)?))
}

pub async fn get_entries(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Json<Vec<RecentEntry>> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let tracker = state.tracker.lock().await;
    Json(tracker.recent(today(), limit))
}

pub async fn add_delta(
    State(state): State<AppState>,
    Json(payload): Json<DeltaRequest>,
) -> Json<DayCountResponse> {
    Json(apply_delta(&state, payload.delta).await)
}

pub async fn add_backlog(
    State(state): State<AppState>,
    Json(payload): Json<BacklogRequest>,
) -> Result<Json<DayCountResponse>, AppError> {
    Ok(Json(apply_backlog(&state, payload).await?))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let date = parse_date(&date)?;
    let removed = apply_delete(&state, date).await;
    Ok(Json(DeleteResponse {
        date: date_key(date),
        removed,
    }))
}

pub async fn set_goal(
    State(state): State<AppState>,
    Json(payload): Json<GoalRequest>,
) -> Result<Json<StatsResponse>, AppError> {
    Ok(Json(apply_goal(&state, payload.yearly_goal).await?))
}

pub async fn form_delta(
    State(state): State<AppState>,
    Form(payload): Form<DeltaRequest>,
) -> Redirect {
    apply_delta(&state, payload.delta).await;
    Redirect::to("/")
}

pub async fn form_backlog(
    State(state): State<AppState>,
    Form(payload): Form<BacklogRequest>,
) -> Result<Redirect, AppError> {
    apply_backlog(&state, payload).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_goal(
    State(state): State<AppState>,
    Form(payload): Form<GoalRequest>,
) -> Result<Redirect, AppError> {
    apply_goal(&state, payload.yearly_goal).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_delete(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Redirect, AppError> {
    apply_delete(&state, parse_date(&date)?).await;
    Ok(Redirect::to("/"))
}

async fn apply_delta(state: &AppState, delta: i64) -> DayCountResponse {
    let today = today();
    let mut tracker = state.tracker.lock().await;
    let count = tracker.add_delta(today, delta);
    persist(state, &tracker).await;

    DayCountResponse {
        date: date_key(today),
        count,
    }
}

async fn apply_backlog(
    state: &AppState,
    payload: BacklogRequest,
) -> Result<DayCountResponse, AppError> {
    let date = parse_optional_date(payload.date.as_deref())?;
    let mut tracker = state.tracker.lock().await;
    let count = tracker.add_backlog(date, payload.amount, today())?;
    persist(state, &tracker).await;

    let date = date.map(date_key).unwrap_or_default();
    info!(%date, amount = payload.amount, count, "backfilled entry");
    Ok(DayCountResponse { date, count })
}

async fn apply_delete(state: &AppState, date: NaiveDate) -> bool {
    let mut tracker = state.tracker.lock().await;
    let removed = tracker.delete_day(date);
    if removed {
        persist(state, &tracker).await;
        info!(date = %date_key(date), "deleted entry");
    }
    removed
}

async fn apply_goal(state: &AppState, goal: u64) -> Result<StatsResponse, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.set_goal(goal)?;
    persist(state, &tracker).await;
    info!(goal, "updated yearly goal");
    Ok(tracker.stats(today()))
}

// A failed write is logged and otherwise ignored: the in-memory state stays
// authoritative until the next successful save.
async fn persist(state: &AppState, tracker: &Tracker) {
    if let Err(err) = save_snapshot(state.store.as_ref(), tracker.snapshot()).await {
        error!("failed to persist snapshot: {err}");
    }
}

fn month_or_current(query: &MonthQuery, today: NaiveDate) -> (i32, u32) {
    (
        query.year.unwrap_or_else(|| today.year()),
        query.month.unwrap_or_else(|| today.month()),
    )
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
