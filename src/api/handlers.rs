//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Local;
use tracing::{error, info};

use crate::{
    presets::EXAM_PRESETS,
    state::{AppState, DisplaySettings, ExamDetails, TimeEdit, TimerUpdate},
};
use super::responses::{
    AdjustRequest, ExamResponse, HealthResponse, PresetView, SettingsRequest, StatusResponse,
    TimerResponse, TimerView,
};

fn timer_reply(action: &str, result: Result<TimerUpdate, String>) -> Result<Json<TimerResponse>, StatusCode> {
    match result {
        Ok(update) => {
            info!("Timer {} endpoint called (applied={})", action, update.applied);
            Ok(Json(TimerResponse::from_update(action, update)))
        }
        Err(e) => {
            error!("Failed to {} timer: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn internal_error(context: &str, e: String) -> StatusCode {
    error!("{}: {}", context, e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Handle GET /timer - Current countdown values
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerView>, StatusCode> {
    state.get_timer_state()
        .map(|timer| Json(timer.into()))
        .map_err(|e| internal_error("Failed to get timer state", e))
}

/// Handle POST /timer/start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    timer_reply("start", state.start_timer())
}

/// Handle POST /timer/stop - Pause the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    timer_reply("stop", state.stop_timer())
}

/// Handle POST /timer/reset - Stop and restore the configured duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    timer_reply("reset", state.reset_timer())
}

/// Handle POST /timer/adjust - Shift the remaining time of a stopped timer
pub async fn adjust_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AdjustRequest>,
) -> Result<Json<TimerResponse>, StatusCode> {
    timer_reply("adjust", state.adjust_timer(request.delta_seconds))
}

/// Handle POST /timer/remaining - Overwrite the remaining time of a stopped timer
pub async fn remaining_handler(
    State(state): State<Arc<AppState>>,
    Json(edit): Json<TimeEdit>,
) -> Result<Json<TimerResponse>, StatusCode> {
    timer_reply("edit", state.set_remaining(edit.total_seconds()))
}

/// Handle GET /exam - Current exam details
pub async fn exam_handler(State(state): State<Arc<AppState>>) -> Result<Json<ExamDetails>, StatusCode> {
    state.get_exam_details()
        .map(Json)
        .map_err(|e| internal_error("Failed to get exam details", e))
}

/// Handle PUT /exam - Save exam details and reconfigure the timer
pub async fn update_exam_handler(
    State(state): State<Arc<AppState>>,
    Json(details): Json<ExamDetails>,
) -> Result<Json<ExamResponse>, StatusCode> {
    let language = state.get_settings()
        .map_err(|e| internal_error("Failed to get settings", e))?
        .language;

    match state.update_exam_details(details) {
        Ok((exam, update)) => Ok(Json(ExamResponse::new(exam, update, language))),
        Err(e) => Err(internal_error("Failed to update exam details", e)),
    }
}

/// Handle GET /presets - List exam presets
pub async fn presets_handler(State(state): State<Arc<AppState>>) -> Result<Json<Vec<PresetView>>, StatusCode> {
    let language = state.get_settings()
        .map_err(|e| internal_error("Failed to get settings", e))?
        .language;

    Ok(Json(
        EXAM_PRESETS
            .iter()
            .map(|preset| PresetView::new(*preset, language))
            .collect(),
    ))
}

/// Handle POST /presets/:preset_id/apply - Fill exam details from a preset
pub async fn apply_preset_handler(
    State(state): State<Arc<AppState>>,
    Path(preset_id): Path<String>,
) -> Result<Json<ExamResponse>, StatusCode> {
    let language = state.get_settings()
        .map_err(|e| internal_error("Failed to get settings", e))?
        .language;

    match state.apply_preset(&preset_id) {
        Ok(Some((exam, update))) => {
            info!("Applied exam preset {}", preset_id);
            Ok(Json(ExamResponse::new(exam, update, language)))
        }
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(internal_error("Failed to apply preset", e)),
    }
}

/// Handle GET /settings - Current display settings
pub async fn settings_handler(State(state): State<Arc<AppState>>) -> Result<Json<DisplaySettings>, StatusCode> {
    state.get_settings()
        .map(Json)
        .map_err(|e| internal_error("Failed to get settings", e))
}

/// Handle PUT /settings - Change language and/or font scale
pub async fn update_settings_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SettingsRequest>,
) -> Result<Json<DisplaySettings>, StatusCode> {
    state.update_settings(|settings| {
        if let Some(language) = request.language {
            settings.language = language;
        }
        if let Some(font_scale) = request.font_scale {
            settings.set_font_scale(font_scale);
        }
    })
    .map(Json)
    .map_err(|e| internal_error("Failed to update settings", e))
}

/// Handle GET /status - Return current system status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = state.get_timer_state()
        .map_err(|e| internal_error("Failed to get timer state", e))?;
    let exam = state.get_exam_details()
        .map_err(|e| internal_error("Failed to get exam details", e))?;
    let settings = state.get_settings()
        .map_err(|e| internal_error("Failed to get settings", e))?;

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer: timer.into(),
        exam,
        settings,
        current_time: Local::now().format("%H:%M:%S").to_string(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
