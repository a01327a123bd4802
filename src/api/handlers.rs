//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    response::{Html, Json},
};
use tracing::{debug, info};

use crate::{
    presentation::{session_label, TimerView},
    state::{AppState, SessionKind},
};
use super::{
    page::PAGE,
    responses::{ApiResponse, DurationRequest, HealthResponse, StatusResponse},
};

/// Handle GET / - Serve the widget page
pub async fn page_handler() -> Html<&'static str> {
    Html(PAGE)
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.engine.start();
    info!("Start endpoint called");
    Json(ApiResponse::from_view(
        "Timer started".to_string(),
        TimerView::from_state(&timer),
    ))
}

/// Handle POST /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.engine.pause();
    info!("Pause endpoint called");
    Json(ApiResponse::from_view(
        "Timer paused".to_string(),
        TimerView::from_state(&timer),
    ))
}

/// Handle POST /reset - Refill the current session
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.engine.reset();
    info!("Reset endpoint called");
    Json(ApiResponse::from_view(
        "Timer reset".to_string(),
        TimerView::from_state(&timer),
    ))
}

/// Handle POST /skip - Switch to the other session
pub async fn skip_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.engine.skip_session();
    info!("Skip endpoint called");
    Json(ApiResponse::from_view(
        format!("Skipped to {} session", session_label(timer.session())),
        TimerView::from_state(&timer),
    ))
}

/// Handle POST /work-duration - Commit the work duration draft
pub async fn work_duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> Json<ApiResponse> {
    commit_duration(&state, SessionKind::Work, &request)
}

/// Handle POST /break-duration - Commit the break duration draft
pub async fn break_duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> Json<ApiResponse> {
    commit_duration(&state, SessionKind::Break, &request)
}

fn commit_duration(state: &AppState, kind: SessionKind, request: &DurationRequest) -> Json<ApiResponse> {
    let Some(minutes) = request.minutes.minutes() else {
        debug!("Discarding unparseable {:?} duration draft: {:?}", kind, request.minutes);
        return Json(ApiResponse::unchanged(
            "Draft ignored, duration unchanged".to_string(),
            TimerView::from_state(&state.engine.snapshot()),
        ));
    };

    let seconds = match kind {
        SessionKind::Work => state.engine.set_work_duration(minutes),
        SessionKind::Break => state.engine.set_break_duration(minutes),
    };
    Json(ApiResponse::from_view(
        format!("{:?} duration set to {} minutes", kind, seconds / 60),
        TimerView::from_state(&state.engine.snapshot()),
    ))
}

/// Handle GET /status - Return the current render model
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.engine.last_action();

    Json(StatusResponse {
        timer: TimerView::from_state(&state.engine.snapshot()),
        uptime: state.get_uptime(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
