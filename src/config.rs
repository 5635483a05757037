//! Board configuration.
//!
//! All tunables the layout and capacity computations read are carried in
//! an immutable [`BoardConfig`] value passed into each call, never held
//! in globals. Every field has a default, so a TOML file only needs the
//! keys it overrides:
//!
//! ```toml
//! [layout]
//! max_rows = 6
//!
//! [capacity]
//! day_count = "exact"
//!
//! [capacity.daily_capacity]
//! screen = 3500
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::capacity::DayCountPolicy;
use crate::error::{ConfigError, WindowError};
use crate::models::{CalendarWindow, ProductionType, DAYS_PER_WEEK};

/// Complete configuration for one board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub capacity: CapacityConfig,
}

/// Row-packing limits for the calendar view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Maximum number of rows per window.
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
    /// Maximum timelines per row.
    #[serde(default = "default_max_per_row")]
    pub max_per_row: usize,
    #[serde(default = "default_days_per_week")]
    pub days_per_week: usize,
}

/// Capacity aggregation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityConfig {
    /// Daily throughput per production type. Missing types have zero capacity.
    #[serde(default = "default_daily_capacity")]
    pub daily_capacity: BTreeMap<ProductionType, f64>,
    /// Types that get a stats bucket, in report order. Work for any other
    /// type is ignored.
    #[serde(default = "ProductionType::builtin")]
    pub production_types: Vec<ProductionType>,
    /// Statuses (case-insensitive) that count a job as active.
    #[serde(default = "default_active_statuses")]
    pub active_statuses: Vec<String>,
    #[serde(default)]
    pub day_count: DayCountPolicy,
}

fn default_max_rows() -> usize {
    4
}

fn default_max_per_row() -> usize {
    2
}

fn default_days_per_week() -> usize {
    DAYS_PER_WEEK
}

fn default_daily_capacity() -> BTreeMap<ProductionType, f64> {
    BTreeMap::from([
        (ProductionType::SCREEN, 3000.0),
        (ProductionType::DTF, 1500.0),
        (ProductionType::SUBLIMATION, 2000.0),
        (ProductionType::EMBROIDERY, 800.0),
    ])
}

fn default_active_statuses() -> Vec<String> {
    ["in_progress", "in-progress", "in progress", "pending"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_rows: default_max_rows(),
            max_per_row: default_max_per_row(),
            days_per_week: default_days_per_week(),
        }
    }
}

impl LayoutConfig {
    pub fn new(max_rows: usize, max_per_row: usize) -> Self {
        Self {
            max_rows,
            max_per_row,
            ..Default::default()
        }
    }

    pub fn with_days_per_week(mut self, days_per_week: usize) -> Self {
        self.days_per_week = days_per_week;
        self
    }

    /// Upper bound on displayed timelines (`max_rows * max_per_row`).
    pub fn display_cap(&self) -> usize {
        self.max_rows.saturating_mul(self.max_per_row)
    }

    /// A window of `weeks` whole weeks starting at `first_day`.
    pub fn window(
        &self,
        first_day: NaiveDate,
        weeks: usize,
    ) -> Result<CalendarWindow, WindowError> {
        CalendarWindow::new(
            first_day,
            weeks.saturating_mul(self.days_per_week),
            self.days_per_week,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        if self.max_per_row == 0 {
            return Err(ConfigError::ZeroPerRow);
        }
        if self.days_per_week == 0 {
            return Err(ConfigError::ZeroDaysPerWeek);
        }
        Ok(())
    }
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            daily_capacity: default_daily_capacity(),
            production_types: ProductionType::builtin(),
            active_statuses: default_active_statuses(),
            day_count: DayCountPolicy::default(),
        }
    }
}

impl CapacityConfig {
    /// Sets (or replaces) the daily capacity of a type.
    pub fn with_daily_capacity(mut self, production_type: ProductionType, daily: f64) -> Self {
        self.daily_capacity.insert(production_type, daily);
        self
    }

    /// Adds a production type bucket if not already present.
    pub fn with_production_type(mut self, production_type: ProductionType) -> Self {
        if !self.production_types.contains(&production_type) {
            self.production_types.push(production_type);
        }
        self
    }

    /// Replaces the active status set.
    pub fn with_active_statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.active_statuses = statuses.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_day_count(mut self, policy: DayCountPolicy) -> Self {
        self.day_count = policy;
        self
    }

    /// Daily capacity of a type (0 if not configured).
    pub fn daily(&self, production_type: &ProductionType) -> f64 {
        self.daily_capacity
            .get(production_type)
            .copied()
            .unwrap_or(0.0)
    }

    /// Whether a status string counts as active (case-insensitive, trimmed).
    pub fn is_active_status(&self, status: &str) -> bool {
        let status = status.trim();
        self.active_statuses
            .iter()
            .any(|s| s.trim().eq_ignore_ascii_case(status))
    }

    /// Whether work for this type is accumulated.
    pub fn is_recognized(&self, production_type: &ProductionType) -> bool {
        self.production_types.contains(production_type)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (production_type, &value) in &self.daily_capacity {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidCapacity {
                    production_type: production_type.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

impl BoardConfig {
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_capacity(mut self, capacity: CapacityConfig) -> Self {
        self.capacity = capacity;
        self
    }

    /// Parses and validates a TOML configuration.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        self.capacity.validate()
    }
}
