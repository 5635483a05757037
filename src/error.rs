//! Error types.
//!
//! Only contract violations are errors. Data-shape problems in job
//! records (missing dates, malformed workload payloads, unknown types)
//! degrade by exclusion and never surface here, with the exception of
//! [`WorkloadError`], which is carried inside [`crate::models::Workload`]
//! so callers can inspect why a payload was skipped.

/// Invalid board configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("max_rows must be at least 1")]
    ZeroRows,

    #[error("max_per_row must be at least 1")]
    ZeroPerRow,

    #[error("days_per_week must be at least 1")]
    ZeroDaysPerWeek,

    #[error("layout expects {config}-day weeks but the window has {window}-day weeks")]
    WeekLengthMismatch { config: usize, window: usize },

    #[error("daily capacity for '{production_type}' must be finite and non-negative, got {value}")]
    InvalidCapacity {
        production_type: String,
        value: f64,
    },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Invalid calendar window shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    #[error("days_per_week must be at least 1")]
    ZeroDaysPerWeek,

    #[error("window length {length} is not a positive multiple of {days_per_week}")]
    InvalidLength { length: usize, days_per_week: usize },

    #[error("invalid month {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("window extends past the supported date range")]
    DateOverflow,
}

/// A workload payload that could not be decoded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkloadError {
    #[error("workload is not valid JSON: {0}")]
    Json(String),

    #[error("workload must be an object keyed by production type, got {0}")]
    NotAnObject(&'static str),
}

impl From<serde_json::Error> for WorkloadError {
    fn from(e: serde_json::Error) -> Self {
        WorkloadError::Json(e.to_string())
    }
}
