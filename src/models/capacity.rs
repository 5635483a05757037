//! Period and capacity models.
//!
//! # Utilization
//! `utilization_pct = round(current_workload / capacity_total * 100)`,
//! defined as `0` when `capacity_total == 0`. Not capped at 100.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DateSpan, ProductionType};

/// A resolved reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Day count used for capacity math (may be an approximation).
    pub days: u32,
}

impl PeriodRange {
    pub fn new(start: NaiveDate, end: NaiveDate, days: u32) -> Self {
        Self { start, end, days }
    }

    /// The covered dates as a span.
    pub fn span(&self) -> DateSpan {
        DateSpan::new(self.start, self.end)
    }

    /// Number of calendar days actually covered by `[start, end]`.
    pub fn calendar_days(&self) -> i64 {
        self.span().days()
    }
}

/// Capacity statistics for one production type over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityStats {
    pub production_type: ProductionType,
    /// Number of jobs contributing positive work.
    pub job_count: usize,
    pub current_workload: f64,
    /// Daily throughput from configuration (0 if not configured).
    pub capacity_daily: f64,
    /// `capacity_daily * period.days`.
    pub capacity_total: f64,
    /// Rounded percentage, 0 when there is no capacity.
    pub utilization_pct: u64,
    /// `capacity_total - current_workload`; negative when overloaded.
    pub remaining_capacity: f64,
}

impl CapacityStats {
    /// Derives capacity figures from accumulated work.
    pub fn compute(
        production_type: ProductionType,
        job_count: usize,
        current_workload: f64,
        capacity_daily: f64,
        days: u32,
    ) -> Self {
        let capacity_total = capacity_daily * f64::from(days);
        Self {
            production_type,
            job_count,
            current_workload,
            capacity_daily,
            capacity_total,
            utilization_pct: utilization_pct(current_workload, capacity_total),
            remaining_capacity: capacity_total - current_workload,
        }
    }

    /// Whether workload exceeds capacity.
    pub fn is_overloaded(&self) -> bool {
        self.current_workload > self.capacity_total
    }
}

/// Rounded utilization percentage with a zero-capacity guard.
pub fn utilization_pct(workload: f64, capacity: f64) -> u64 {
    if capacity > 0.0 {
        // float → int casts saturate; negative or NaN become 0
        (workload / capacity * 100.0).round() as u64
    } else {
        0
    }
}
