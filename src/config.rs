//! Configuration and CLI argument handling

use std::{path::PathBuf, sync::Arc};
use clap::Parser;

use crate::storage::{JsonFileStore, KeyValueStore, MemoryStore};

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "exam-clock")]
#[command(about = "Exam information display and persistent countdown timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Exam duration in minutes used until an exam is configured
    #[arg(short, long, default_value = "90")]
    pub duration: u64,

    /// File holding the persisted timer, exam and display state
    #[arg(long, default_value = "exam-clock-state.json")]
    pub state_file: PathBuf,

    /// Keep state in memory only
    #[arg(long)]
    pub ephemeral: bool,

    /// Start stopped even if the timer was running at shutdown
    #[arg(long)]
    pub no_resume: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Whether a persisted running timer keeps counting after restart
    pub fn resume(&self) -> bool {
        !self.no_resume
    }

    /// Open the configured storage backend
    pub fn open_store(&self) -> Arc<dyn KeyValueStore> {
        if self.ephemeral {
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(JsonFileStore::open(&self.state_file))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_ninety_minute_exam() {
        let config = Config::try_parse_from(["exam-clock"]).unwrap();
        assert_eq!(config.duration, 90);
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert!(config.resume());
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "exam-clock", "-p", "8080", "--host", "127.0.0.1", "-d", "120",
            "--ephemeral", "--no-resume", "-v",
        ])
        .unwrap();

        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.duration, 120);
        assert!(config.ephemeral);
        assert!(!config.resume());
        assert_eq!(config.log_level(), "debug");
    }
}
