//! Persistent timer engine
//!
//! Wraps [`TimerState`] and writes all three timer values to storage after
//! every applied transition and every tick.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::TimerState;
use crate::storage::{load_json, save_json, KeyValueStore};

/// Storage key for the configured duration
pub const CONFIGURED_KEY: &str = "timerInitialSeconds";
/// Storage key for the remaining time
pub const REMAINING_KEY: &str = "timerTimeLeft";
/// Storage key for the running flag
pub const RUNNING_KEY: &str = "timerIsRunning";

pub struct TimerEngine {
    state: TimerState,
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine").field("state", &self.state).finish()
    }
}

impl TimerEngine {
    /// Load the timer from storage.
    ///
    /// Missing or malformed entries fall back to `default_configured_seconds`,
    /// a full remaining time and a stopped clock. With `resume` unset a
    /// persisted running flag is dropped.
    pub fn load(store: Arc<dyn KeyValueStore>, default_configured_seconds: u64, resume: bool) -> Self {
        let configured = load_json::<u64>(store.as_ref(), CONFIGURED_KEY)
            .unwrap_or(default_configured_seconds);
        let remaining = load_json::<u64>(store.as_ref(), REMAINING_KEY).unwrap_or(configured);
        let was_running = load_json::<bool>(store.as_ref(), RUNNING_KEY).unwrap_or(false);

        let state = TimerState::restore(configured, remaining, was_running && resume);
        if was_running && !state.is_running {
            info!("Persisted timer was running, starting stopped");
        }
        info!(
            "Timer loaded: configured={}s, remaining={}s, running={}",
            state.configured_seconds, state.remaining_seconds, state.is_running
        );

        let engine = Self { state, store };
        engine.persist();
        engine
    }

    /// Current values for rendering
    pub fn snapshot(&self) -> TimerState {
        self.state
    }

    pub fn start(&mut self) -> bool {
        self.apply("start", TimerState::start)
    }

    pub fn stop(&mut self) -> bool {
        self.apply("stop", TimerState::stop)
    }

    pub fn reset(&mut self) -> bool {
        self.apply("reset", TimerState::reset)
    }

    pub fn adjust_by(&mut self, delta_seconds: i64) -> bool {
        self.apply("adjust", |state| state.adjust_by(delta_seconds))
    }

    pub fn set_remaining(&mut self, new_seconds: i64) -> bool {
        self.apply("set-remaining", |state| state.set_remaining(new_seconds))
    }

    pub fn reconfigure_duration(&mut self, new_duration_seconds: u64) -> bool {
        self.apply("reconfigure", |state| state.reconfigure_duration(new_duration_seconds))
    }

    /// Consume one second of a running timer
    pub fn tick(&mut self) -> bool {
        let applied = self.state.tick();
        if applied {
            debug!("Tick: {}s remaining", self.state.remaining_seconds);
            if !self.state.is_running {
                info!("Countdown expired");
            }
            self.persist();
        }
        applied
    }

    fn apply<F>(&mut self, action: &str, op: F) -> bool
    where
        F: FnOnce(&mut TimerState) -> bool,
    {
        let applied = op(&mut self.state);
        if applied {
            info!(
                "Timer {}: remaining={}s, configured={}s, running={}",
                action,
                self.state.remaining_seconds,
                self.state.configured_seconds,
                self.state.is_running
            );
            self.persist();
        } else {
            debug!("Timer {} ignored in phase {:?}", action, self.state.phase());
        }
        applied
    }

    fn persist(&self) {
        let store = self.store.as_ref();
        let results = [
            save_json(store, CONFIGURED_KEY, &self.state.configured_seconds),
            save_json(store, REMAINING_KEY, &self.state.remaining_seconds),
            save_json(store, RUNNING_KEY, &self.state.is_running),
        ];
        for result in results {
            if let Err(e) = result {
                warn!("Failed to persist timer state: {}", e);
            }
        }
    }
}
