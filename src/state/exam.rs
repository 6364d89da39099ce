//! Exam details and display settings

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::presets::ExamPreset;
use crate::storage::{load_json, save_json, KeyValueStore, StorageError};

/// Storage key for the exam details record
pub const EXAM_DETAILS_KEY: &str = "examDetails";
/// Storage key for the interface language
pub const LANGUAGE_KEY: &str = "language";
/// Storage key for the font scale factor
pub const FONT_SCALE_KEY: &str = "fontScale";

pub const MIN_FONT_SCALE: f64 = 0.8;
pub const MAX_FONT_SCALE: f64 = 1.5;
pub const FONT_SCALE_STEP: f64 = 0.05;

/// Supported display and exam languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[default]
    #[serde(rename = "zh-hk")]
    TraditionalChinese,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::English => Language::TraditionalChinese,
            Language::TraditionalChinese => Language::English,
        }
    }
}

/// Metadata shown alongside the countdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamDetails {
    pub title: String,
    pub centre_name: String,
    pub centre_number: String,
    pub subject: String,
    pub paper: String,
    pub duration_minutes: u64,
    pub exam_start_time: String,
    pub exam_end_time: String,
    pub exam_language: Language,
}

impl Default for ExamDetails {
    fn default() -> Self {
        Self {
            title: "Chinese Language Paper 1".to_string(),
            centre_name: "ABC Secondary School".to_string(),
            centre_number: "A1234".to_string(),
            subject: "Chinese Language".to_string(),
            paper: "Paper 1".to_string(),
            duration_minutes: 90,
            exam_start_time: "08:30".to_string(),
            exam_end_time: "10:00".to_string(),
            exam_language: Language::TraditionalChinese,
        }
    }
}

impl ExamDetails {
    /// Defaults with a different exam length
    pub fn with_duration(duration_minutes: u64) -> Self {
        let mut details = Self {
            duration_minutes,
            ..Self::default()
        };
        details.recompute_end_time();
        details
    }

    /// Load from storage, falling back to `fallback` when missing or malformed
    pub fn load(store: &dyn KeyValueStore, fallback: ExamDetails) -> Self {
        load_json(store, EXAM_DETAILS_KEY).unwrap_or(fallback)
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        save_json(store, EXAM_DETAILS_KEY, self)
    }

    /// Configured timer duration for this exam
    pub fn duration_seconds(&self) -> u64 {
        self.duration_minutes.saturating_mul(60)
    }

    /// Take subject, title and duration from a preset, in the exam language
    pub fn apply_preset(&mut self, preset: &ExamPreset) {
        let title = preset.title(self.exam_language).to_string();
        self.title = title.clone();
        self.subject = title;
        self.duration_minutes = preset.duration_minutes;
        self.recompute_end_time();
    }

    /// Derive the end time from the start time and duration.
    ///
    /// Leaves the end time alone when the start time is not `HH:MM`.
    pub fn recompute_end_time(&mut self) -> bool {
        let Ok(start) = NaiveTime::parse_from_str(&self.exam_start_time, "%H:%M") else {
            return false;
        };
        // Only the time of day matters, whole days wrap away.
        let minutes = (self.duration_minutes % (24 * 60)) as i64;
        let end = start + Duration::minutes(minutes);
        self.exam_end_time = end.format("%H:%M").to_string();
        true
    }
}

/// Language and font scale of the display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub language: Language,
    pub font_scale: f64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            font_scale: 1.0,
        }
    }
}

impl DisplaySettings {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let defaults = Self::default();
        let language = load_json(store, LANGUAGE_KEY).unwrap_or(defaults.language);
        let font_scale = load_json::<f64>(store, FONT_SCALE_KEY)
            .map(clamp_font_scale)
            .unwrap_or(defaults.font_scale);
        Self { language, font_scale }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        save_json(store, LANGUAGE_KEY, &self.language)?;
        save_json(store, FONT_SCALE_KEY, &self.font_scale)
    }

    pub fn set_font_scale(&mut self, value: f64) {
        self.font_scale = clamp_font_scale(value);
    }

    pub fn increase_font(&mut self) {
        self.set_font_scale(self.font_scale + FONT_SCALE_STEP);
    }

    pub fn decrease_font(&mut self) {
        self.set_font_scale(self.font_scale - FONT_SCALE_STEP);
    }
}

fn clamp_font_scale(value: f64) -> f64 {
    if !value.is_finite() {
        return 1.0;
    }
    let rounded = (value * 100.0).round() / 100.0;
    rounded.clamp(MIN_FONT_SCALE, MAX_FONT_SCALE)
}
