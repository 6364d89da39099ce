//! Exam Clock - exam information display with a persistent countdown timer
//!
//! This library provides the countdown timer engine, its durable storage,
//! exam setup state and the HTTP API used by display clients.

pub mod config;
pub mod state;
pub mod api;
pub mod presets;
pub mod storage;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
