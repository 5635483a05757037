//! Period capacity utilization.
//!
//! Resolves a period token to a date range and aggregates the active
//! jobs' workload per production type against configured daily capacity.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use u_board::capacity::compute_capacity;
//! use u_board::config::CapacityConfig;
//! use u_board::models::{Job, ProductionType};
//!
//! let jobs = vec![Job::new("J1")
//!     .with_status("in_progress")
//!     .with_work(ProductionType::SCREEN, 4500.0)];
//! let now = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
//!
//! let report = compute_capacity(&jobs, "today", now, &CapacityConfig::default());
//! let screen = report.get(&ProductionType::SCREEN).unwrap();
//! assert_eq!(screen.utilization_pct, 150);
//! ```

mod aggregate;
mod period;

pub use aggregate::{CapacityReport, WorkloadAggregator};
pub use period::{resolve_period, DayCountPolicy, Period, PeriodResolver};

use chrono::NaiveDate;

use crate::config::CapacityConfig;
use crate::models::Job;

/// Resolves `token` relative to `now` and aggregates `jobs` over it,
/// using the configured day-count policy.
pub fn compute_capacity(
    jobs: &[Job],
    token: &str,
    now: NaiveDate,
    config: &CapacityConfig,
) -> CapacityReport {
    let period = PeriodResolver::new(config.day_count).resolve(token, now);
    WorkloadAggregator::new(config).aggregate(jobs, &period)
}
