//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    presets::{format_duration_from_minutes, ExamPreset},
    state::{format_hms, DisplaySettings, ExamDetails, Language, TimerPhase, TimerState, TimerUpdate},
};

/// Timer values as rendered by clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerView {
    pub configured_seconds: u64,
    pub remaining_seconds: u64,
    pub is_running: bool,
    pub phase: TimerPhase,
    pub display: String,
}

impl From<TimerState> for TimerView {
    fn from(timer: TimerState) -> Self {
        Self {
            configured_seconds: timer.configured_seconds,
            remaining_seconds: timer.remaining_seconds,
            is_running: timer.is_running,
            phase: timer.phase(),
            display: format_hms(timer.remaining_seconds),
        }
    }
}

/// Response for timer operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl TimerResponse {
    /// Build a response from an operation outcome
    pub fn from_update(action: &str, update: TimerUpdate) -> Self {
        let (status, message) = if update.applied {
            ("applied", format!("timer {} applied", action))
        } else {
            ("ignored", format!("timer {} ignored while {}", action, update.timer.phase().as_str()))
        };

        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            timer: update.timer.into(),
        }
    }
}

/// Response for exam setup changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub exam: ExamDetails,
    pub duration_label: String,
    pub timer_reconfigured: bool,
    pub timer: TimerView,
}

impl ExamResponse {
    pub fn new(exam: ExamDetails, update: TimerUpdate, language: Language) -> Self {
        Self {
            status: "saved".to_string(),
            timestamp: Utc::now(),
            duration_label: format_duration_from_minutes(exam.duration_minutes, language),
            exam,
            timer_reconfigured: update.applied,
            timer: update.timer.into(),
        }
    }
}

/// Body of `POST /timer/adjust`
#[derive(Debug, Clone, Deserialize)]
pub struct AdjustRequest {
    pub delta_seconds: i64,
}

/// Body of `PUT /settings`, absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsRequest {
    pub language: Option<Language>,
    pub font_scale: Option<f64>,
}

/// Preset entry with its length spelled out in the display language
#[derive(Debug, Clone, Serialize)]
pub struct PresetView {
    #[serde(flatten)]
    pub preset: ExamPreset,
    pub duration_label: String,
}

impl PresetView {
    pub fn new(preset: ExamPreset, language: Language) -> Self {
        Self {
            duration_label: format_duration_from_minutes(preset.duration_minutes, language),
            preset,
        }
    }
}

/// Overall status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerView,
    pub exam: ExamDetails,
    pub settings: DisplaySettings,
    /// Local wall-clock time shown beside the countdown, `HH:MM:SS`
    pub current_time: String,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
