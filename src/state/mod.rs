//! State management module
//!
//! This module contains the timer engine, exam setup and their shared owner.

pub mod app_state;
pub mod exam;
pub mod time_edit;
pub mod timer_engine;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, TimerUpdate};
pub use exam::{DisplaySettings, ExamDetails, Language};
pub use time_edit::TimeEdit;
pub use timer_engine::TimerEngine;
pub use timer_state::{format_hms, TimerPhase, TimerState};
