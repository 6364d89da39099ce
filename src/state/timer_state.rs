//! Timer state structure and transitions

use serde::{Deserialize, Serialize};

/// Extra headroom a direct edit may add above the larger of the configured
/// and remaining values
pub const EDIT_CEILING_SECONDS: u64 = 10 * 3600;

/// Observable phase of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    Stopped,
    Running,
    /// Stopped with nothing left on the clock
    Expired,
}

impl TimerPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            TimerPhase::Stopped => "stopped",
            TimerPhase::Running => "running",
            TimerPhase::Expired => "expired",
        }
    }
}

/// Countdown state: configured duration, time left and running flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub configured_seconds: u64,
    pub remaining_seconds: u64,
    pub is_running: bool,
}

impl TimerState {
    /// Create a stopped timer with the full duration remaining
    pub fn new(configured_seconds: u64) -> Self {
        Self {
            configured_seconds,
            remaining_seconds: configured_seconds,
            is_running: false,
        }
    }

    /// Rebuild a state from persisted values, restoring the invariants
    pub fn restore(configured_seconds: u64, remaining_seconds: u64, is_running: bool) -> Self {
        Self {
            configured_seconds,
            remaining_seconds,
            is_running: is_running && remaining_seconds > 0,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        if self.is_running {
            TimerPhase::Running
        } else if self.remaining_seconds == 0 {
            TimerPhase::Expired
        } else {
            TimerPhase::Stopped
        }
    }

    /// Start counting down. Requires a stopped timer with time left.
    pub fn start(&mut self) -> bool {
        if self.is_running || self.remaining_seconds == 0 {
            return false;
        }
        self.is_running = true;
        true
    }

    /// Pause the countdown, keeping the remaining time
    pub fn stop(&mut self) -> bool {
        if !self.is_running {
            return false;
        }
        self.is_running = false;
        true
    }

    /// Consume one second. Stops the timer when it reaches zero.
    pub fn tick(&mut self) -> bool {
        if !self.is_running {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.is_running = false;
        }
        true
    }

    /// Stop and restore the configured duration. Valid in any phase.
    pub fn reset(&mut self) -> bool {
        self.is_running = false;
        self.remaining_seconds = self.configured_seconds;
        true
    }

    /// Shift the remaining time, clamped to `[0, configured_seconds]`
    pub fn adjust_by(&mut self, delta_seconds: i64) -> bool {
        if self.is_running {
            return false;
        }
        let target = i128::from(self.remaining_seconds) + i128::from(delta_seconds);
        self.remaining_seconds = clamp_seconds(target, self.configured_seconds);
        true
    }

    /// Largest value a direct edit may set right now
    pub fn max_editable_seconds(&self) -> u64 {
        self.configured_seconds
            .max(self.remaining_seconds)
            .saturating_add(EDIT_CEILING_SECONDS)
    }

    /// Overwrite the remaining time. Values above the configured duration
    /// raise it, so the edit becomes the new reset target.
    pub fn set_remaining(&mut self, new_seconds: i64) -> bool {
        if self.is_running {
            return false;
        }
        let value = clamp_seconds(i128::from(new_seconds), self.max_editable_seconds());
        self.remaining_seconds = value;
        if value > self.configured_seconds {
            self.configured_seconds = value;
        }
        true
    }

    /// Apply a new exam duration. Ignored while running or when unchanged.
    pub fn reconfigure_duration(&mut self, new_duration_seconds: u64) -> bool {
        if self.is_running || new_duration_seconds == self.configured_seconds {
            return false;
        }
        self.configured_seconds = new_duration_seconds;
        self.remaining_seconds = new_duration_seconds;
        true
    }
}

fn clamp_seconds(value: i128, max: u64) -> u64 {
    value.clamp(0, i128::from(max)) as u64
}

/// Render seconds as `HH:MM:SS` with unbounded hours
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
