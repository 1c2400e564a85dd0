use crate::calendar::{CalendarMonth, build_month};
use crate::dates::{date_key, month_start, parse_date, parse_month_key};
use crate::errors::AppError;
use crate::models::{
    CalendarQuery, NewResourceRequest, PromptsResponse, Resource, ResourceCategory, ResourceQuery,
    ResourceView, SavedSessionResponse, Session, StatsResponse,
};
use crate::prompts::{PROMPTS_PER_SESSION, pick_prompts};
use crate::resources::{
    SpotlightChange, add_resource, filter_resources, remove_resource, resolve_spotlight,
    to_view, toggle_complete,
};
use crate::sessions::{find_session, latest_session, recent_sessions, remove_session, upsert_session};
use crate::state::AppState;
use crate::stats::{compute_stats_at, motivation_message, streak_message, streak_summary};
use crate::ui::{DashboardView, render_dashboard};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
};
use chrono::{Local, NaiveDate, Utc};
use tracing::info;

const RECENT_SESSIONS: usize = 5;
const LIST_PREVIEW: usize = 4;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let today = today();
    let sessions = state.log.read_sessions().await;
    let resources = state.log.read_resources().await;
    let spotlight = current_spotlight(&state, &resources).await?;

    let stats = compute_stats_at(today, &sessions);
    let motivation = motivation_message(&stats);
    let recent = recent_sessions(&sessions, RECENT_SESSIONS);
    let preview = |category: ResourceCategory| {
        resources
            .iter()
            .filter(|resource| resource.category == category)
            .take(LIST_PREVIEW)
            .cloned()
            .collect::<Vec<_>>()
    };
    let articles = preview(ResourceCategory::Article);
    let videos = preview(ResourceCategory::Video);

    Ok(Html(render_dashboard(&DashboardView {
        today,
        stats: &stats,
        motivation: &motivation,
        recent: &recent,
        spotlight: spotlight.as_ref(),
        articles: &articles,
        videos: &videos,
    })))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let sessions = state.log.read_sessions().await;
    let stats = compute_stats_at(today(), &sessions);
    Json(StatsResponse {
        motivation: motivation_message(&stats),
        streak_message: streak_message(&stats),
        streak_summary: streak_summary(&stats),
        stats,
    })
}

pub async fn list_sessions(State(state): State<AppState>) -> Json<Vec<Session>> {
    let sessions = state.log.read_sessions().await;
    Json(recent_sessions(&sessions, sessions.len()))
}

pub async fn get_last_session(State(state): State<AppState>) -> Result<Json<Session>, AppError> {
    let sessions = state.log.read_sessions().await;
    latest_session(&sessions)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found("No previous sessions logged yet."))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Session>, AppError> {
    let sessions = state.log.read_sessions().await;
    find_session(&sessions, &date)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no session logged on {date}")))
}

pub async fn save_session(
    State(state): State<AppState>,
    Json(payload): Json<Session>,
) -> Result<Json<SavedSessionResponse>, AppError> {
    let today = today();
    let mut session = payload.normalized();
    let date = if session.date.is_empty() {
        today
    } else {
        parse_date(&session.date)
            .ok_or_else(|| AppError::bad_request("date must be formatted as YYYY-MM-DD"))?
    };
    session.date = date_key(date);

    let _writer = state.writer.lock().await;
    let mut sessions = state.log.read_sessions().await;
    let replaced = upsert_session(&mut sessions, session.clone());
    state.log.save_sessions(&sessions).await?;
    info!(date = %session.date, replaced, "session saved");

    Ok(Json(SavedSessionResponse {
        session,
        replaced,
        stats: compute_stats_at(today, &sessions),
    }))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<StatusCode, AppError> {
    let _writer = state.writer.lock().await;
    let mut sessions = state.log.read_sessions().await;
    if !remove_session(&mut sessions, &date) {
        return Err(AppError::not_found(format!("no session logged on {date}")));
    }
    state.log.save_sessions(&sessions).await?;
    info!(%date, "session deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarMonth>, AppError> {
    let today = today();
    let first = match query.month.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
        Some(raw) => parse_month_key(raw)
            .ok_or_else(|| AppError::bad_request("month must be formatted as YYYY-MM"))?,
        None => month_start(today),
    };

    let sessions = state.log.read_sessions().await;
    let stats = compute_stats_at(today, &sessions);
    Ok(Json(build_month(first, today, &sessions, &stats)))
}

pub async fn list_resources(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> Json<Vec<ResourceView>> {
    let resources = state.log.read_resources().await;
    let spotlight = state.log.spotlight_id().await;
    Json(
        filter_resources(&resources, query.category.as_deref())
            .into_iter()
            .map(|resource| to_view(resource, spotlight.as_deref()))
            .collect(),
    )
}

pub async fn create_resource(
    State(state): State<AppState>,
    Json(payload): Json<NewResourceRequest>,
) -> Result<(StatusCode, Json<ResourceView>), AppError> {
    let _writer = state.writer.lock().await;
    let mut resources = state.log.read_resources().await;
    let resource = add_resource(&mut resources, payload, now_ms())?;
    state.log.save_resources(&resources).await?;

    let mut spotlight = state.log.spotlight_id().await;
    if spotlight.is_none() {
        state.log.set_spotlight_id(&resource.id).await?;
        spotlight = Some(resource.id.clone());
    }
    info!(id = %resource.id, "resource added");

    Ok((
        StatusCode::CREATED,
        Json(to_view(resource, spotlight.as_deref())),
    ))
}

pub async fn complete_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResourceView>, AppError> {
    let _writer = state.writer.lock().await;
    let mut resources = state.log.read_resources().await;
    let completed = toggle_complete(&mut resources, &id)?;
    state.log.save_resources(&resources).await?;
    info!(%id, completed, "resource completion toggled");

    let spotlight = state.log.spotlight_id().await;
    resource_view(resources, &id, spotlight.as_deref())
}

pub async fn spotlight_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResourceView>, AppError> {
    let _writer = state.writer.lock().await;
    let resources = state.log.read_resources().await;
    if !resources.iter().any(|resource| resource.id == id) {
        return Err(AppError::not_found(format!("resource '{id}' not found")));
    }
    state.log.set_spotlight_id(&id).await?;
    info!(%id, "spotlight updated");
    resource_view(resources, &id, Some(id.as_str()))
}

pub async fn delete_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let _writer = state.writer.lock().await;
    let mut resources = state.log.read_resources().await;
    let spotlight = state.log.spotlight_id().await;
    let (_, change) = remove_resource(&mut resources, &id, spotlight.as_deref())?;
    state.log.save_resources(&resources).await?;

    match change {
        SpotlightChange::Keep => {}
        SpotlightChange::Move(next) => state.log.set_spotlight_id(&next).await?,
        SpotlightChange::Clear => state.log.clear_spotlight().await?,
    }
    info!(%id, "resource removed");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_spotlight(
    State(state): State<AppState>,
) -> Result<Json<Option<ResourceView>>, AppError> {
    let resources = state.log.read_resources().await;
    let spotlight = current_spotlight(&state, &resources).await?;
    Ok(Json(spotlight.map(|resource| {
        let id = resource.id.clone();
        to_view(resource, Some(&id))
    })))
}

pub async fn get_prompts() -> Json<PromptsResponse> {
    let mut rng = rand::thread_rng();
    Json(PromptsResponse {
        prompts: pick_prompts(&mut rng, PROMPTS_PER_SESSION),
    })
}

/// Featured resource, persisting the first resource when the stored id is
/// missing or no longer exists.
///
/// The fallback is decided again under the writer lock so a concurrent
/// spotlight change or delete is never overwritten with a stale choice.
async fn current_spotlight(
    state: &AppState,
    resources: &[Resource],
) -> Result<Option<Resource>, AppError> {
    let stored = state.log.spotlight_id().await;
    match resolve_spotlight(resources, stored.as_deref()) {
        None => return Ok(None),
        Some((resource, false)) => return Ok(Some(resource.clone())),
        Some((_, true)) => {}
    }

    let _writer = state.writer.lock().await;
    let resources = state.log.read_resources().await;
    let stored = state.log.spotlight_id().await;
    let Some((resource, fallback)) = resolve_spotlight(&resources, stored.as_deref()) else {
        return Ok(None);
    };
    if fallback {
        state.log.set_spotlight_id(&resource.id).await?;
        info!(id = %resource.id, "spotlight reassigned to first resource");
    }
    Ok(Some(resource.clone()))
}

fn resource_view(
    resources: Vec<Resource>,
    id: &str,
    spotlight: Option<&str>,
) -> Result<Json<ResourceView>, AppError> {
    resources
        .into_iter()
        .find(|resource| resource.id == id)
        .map(|resource| Json(to_view(resource, spotlight)))
        .ok_or_else(|| AppError::not_found(format!("resource '{id}' not found")))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, PracticeLog};
    use std::sync::Arc;

    fn resource(id: &str) -> Resource {
        Resource {
            id: id.to_string(),
            title: format!("Guide {id}"),
            url: format!("https://example.com/{id}"),
            category: ResourceCategory::Article,
            notes: String::new(),
            added: 0,
            completed: false,
        }
    }

    async fn state_with(resources: &[Resource], spotlight: Option<&str>) -> AppState {
        let log = PracticeLog::new(Arc::new(MemoryStore::new()));
        log.save_resources(resources).await.unwrap();
        if let Some(id) = spotlight {
            log.set_spotlight_id(id).await.unwrap();
        }
        AppState::new(log)
    }

    async fn spotlight_of(state: &AppState) -> Option<String> {
        let Json(view) = get_spotlight(State(state.clone())).await.unwrap();
        view.map(|view| {
            assert!(view.spotlighted);
            view.resource.id
        })
    }

    #[tokio::test]
    async fn stale_spotlight_falls_back_and_persists_first() {
        let state = state_with(&[resource("a"), resource("b")], Some("gone")).await;
        assert_eq!(spotlight_of(&state).await.as_deref(), Some("a"));
        assert_eq!(state.log.spotlight_id().await.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn missing_spotlight_falls_back_and_persists_first() {
        let state = state_with(&[resource("a"), resource("b")], None).await;
        assert_eq!(spotlight_of(&state).await.as_deref(), Some("a"));
        assert_eq!(state.log.spotlight_id().await.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn valid_spotlight_is_left_alone() {
        let state = state_with(&[resource("a"), resource("b")], Some("b")).await;
        assert_eq!(spotlight_of(&state).await.as_deref(), Some("b"));
        assert_eq!(state.log.spotlight_id().await.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn no_resources_means_no_spotlight() {
        let state = state_with(&[], Some("gone")).await;
        assert_eq!(spotlight_of(&state).await, None);
        assert_eq!(state.log.spotlight_id().await.as_deref(), Some("gone"));
    }

    #[tokio::test]
    async fn fallback_honours_changes_made_before_the_lock() {
        let state = state_with(&[resource("a"), resource("b")], Some("gone")).await;
        let snapshot = state.log.read_resources().await;
        // A writer settles the spotlight after this reader took its snapshot.
        state.log.set_spotlight_id("b").await.unwrap();

        let chosen = current_spotlight(&state, &snapshot).await.unwrap();
        assert_eq!(chosen.map(|r| r.id).as_deref(), Some("b"));
        assert_eq!(state.log.spotlight_id().await.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn deleting_spotlight_moves_then_clears() {
        let state = state_with(&[resource("a"), resource("b")], Some("a")).await;

        let status = delete_resource(State(state.clone()), Path("a".to_string()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(state.log.spotlight_id().await.as_deref(), Some("b"));

        delete_resource(State(state.clone()), Path("b".to_string()))
            .await
            .unwrap();
        assert_eq!(state.log.spotlight_id().await, None);
        assert_eq!(spotlight_of(&state).await, None);
    }
}
