//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

use super::{DisplaySettings, ExamDetails, TimerEngine, TimerState};
use crate::{presets::find_preset, storage::KeyValueStore};

/// Result of a timer operation: whether it took effect, and the state after it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerUpdate {
    pub applied: bool,
    pub timer: TimerState,
}

/// Main application state shared by the HTTP handlers and the countdown task
pub struct AppState {
    /// Durable storage shared by every persisted value
    pub store: Arc<dyn KeyValueStore>,
    /// Countdown engine
    pub timer: Arc<Mutex<TimerEngine>>,
    /// Exam metadata and display preferences
    pub exam_details: Arc<Mutex<ExamDetails>>,
    pub settings: Arc<Mutex<DisplaySettings>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for timer updates
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Load all state from `store`.
    ///
    /// `default_duration_minutes` only applies when no exam has been saved yet.
    pub fn new(
        port: u16,
        host: String,
        store: Arc<dyn KeyValueStore>,
        default_duration_minutes: u64,
        resume: bool,
    ) -> Self {
        let exam_details = ExamDetails::load(
            store.as_ref(),
            ExamDetails::with_duration(default_duration_minutes),
        );
        if let Err(e) = exam_details.save(store.as_ref()) {
            warn!("Failed to persist exam details: {}", e);
        }

        let settings = DisplaySettings::load(store.as_ref());
        if let Err(e) = settings.save(store.as_ref()) {
            warn!("Failed to persist display settings: {}", e);
        }

        let timer = TimerEngine::load(Arc::clone(&store), exam_details.duration_seconds(), resume);
        let (timer_update_tx, timer_update_rx) = watch::channel(timer.snapshot());

        Self {
            store,
            timer: Arc::new(Mutex::new(timer)),
            exam_details: Arc::new(Mutex::new(exam_details)),
            settings: Arc::new(Mutex::new(settings)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Apply an operation to the timer engine and notify timer watchers
    pub fn update_timer<F>(&self, action: &str, op: F) -> Result<TimerUpdate, String>
    where
        F: FnOnce(&mut TimerEngine) -> bool,
    {
        let mut engine = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer: {}", e))?;

        let applied = op(&mut engine);
        let timer = engine.snapshot();

        // Publish under the lock so watchers never see an older snapshot last
        // (this will start or cancel the countdown)
        if applied {
            self.timer_update_tx.send_replace(timer);
        }
        drop(engine);

        if applied {
            self.record_action(action);
        }

        Ok(TimerUpdate { applied, timer })
    }

    pub fn start_timer(&self) -> Result<TimerUpdate, String> {
        self.update_timer("start", TimerEngine::start)
    }

    pub fn stop_timer(&self) -> Result<TimerUpdate, String> {
        self.update_timer("stop", TimerEngine::stop)
    }

    pub fn reset_timer(&self) -> Result<TimerUpdate, String> {
        self.update_timer("reset", TimerEngine::reset)
    }

    pub fn adjust_timer(&self, delta_seconds: i64) -> Result<TimerUpdate, String> {
        self.update_timer("adjust", |engine| engine.adjust_by(delta_seconds))
    }

    pub fn set_remaining(&self, seconds: i64) -> Result<TimerUpdate, String> {
        self.update_timer("set-remaining", |engine| engine.set_remaining(seconds))
    }

    /// Advance a running countdown by one second (countdown task only)
    pub fn tick_timer(&self) -> Result<TimerState, String> {
        let mut engine = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer: {}", e))?;

        let applied = engine.tick();
        let timer = engine.snapshot();
        if applied {
            self.timer_update_tx.send_replace(timer);
        }
        drop(engine);

        Ok(timer)
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.timer.lock()
            .map(|engine| engine.snapshot())
            .map_err(|e| format!("Failed to lock timer: {}", e))
    }

    /// Watch timer state changes
    pub fn subscribe_timer(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Get current exam details
    pub fn get_exam_details(&self) -> Result<ExamDetails, String> {
        self.exam_details.lock()
            .map(|details| details.clone())
            .map_err(|e| format!("Failed to lock exam details: {}", e))
    }

    /// Replace the exam details and hand the new duration to the timer
    pub fn update_exam_details(&self, details: ExamDetails) -> Result<(ExamDetails, TimerUpdate), String> {
        let mut current = self.exam_details.lock()
            .map_err(|e| format!("Failed to lock exam details: {}", e))?;

        *current = details.clone();
        if let Err(e) = current.save(self.store.as_ref()) {
            warn!("Failed to persist exam details: {}", e);
        }
        drop(current);

        info!("Exam details updated: {} ({} min)", details.subject, details.duration_minutes);
        self.record_action("exam-setup");

        let duration_seconds = details.duration_seconds();
        let update = self.update_timer("reconfigure", |engine| {
            engine.reconfigure_duration(duration_seconds)
        })?;
        if !update.applied && update.timer.is_running {
            info!("Timer is running, keeping configured duration of {}s", update.timer.configured_seconds);
        }

        Ok((details, update))
    }

    /// Fill the exam details from a preset. Returns `None` for unknown ids.
    pub fn apply_preset(&self, preset_id: &str) -> Result<Option<(ExamDetails, TimerUpdate)>, String> {
        let Some(preset) = find_preset(preset_id) else {
            warn!("Unknown exam preset: {}", preset_id);
            return Ok(None);
        };

        let mut details = self.get_exam_details()?;
        details.apply_preset(preset);
        self.update_exam_details(details).map(Some)
    }

    /// Get current display settings
    pub fn get_settings(&self) -> Result<DisplaySettings, String> {
        self.settings.lock()
            .map(|settings| *settings)
            .map_err(|e| format!("Failed to lock settings: {}", e))
    }

    /// Update display settings and persist them
    pub fn update_settings<F>(&self, updater: F) -> Result<DisplaySettings, String>
    where
        F: FnOnce(&mut DisplaySettings),
    {
        let mut settings = self.settings.lock()
            .map_err(|e| format!("Failed to lock settings: {}", e))?;

        updater(&mut settings);
        let new_settings = *settings;
        drop(settings);

        if let Err(e) = new_settings.save(self.store.as_ref()) {
            warn!("Failed to persist display settings: {}", e);
        }
        self.record_action("settings");

        Ok(new_settings)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }
}
