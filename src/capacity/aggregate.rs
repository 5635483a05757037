//! Per-type workload aggregation against period capacity.
//!
//! # Algorithm
//!
//! 1. Keep jobs whose status is in the active set and whose start date
//!    (if any) is on or before the period end. Jobs without a start date
//!    are treated as currently running.
//! 2. For each kept job with a decodable workload, every recognized type
//!    with `total_work > 0` adds one job and its work to that bucket.
//!    Undecodable payloads are logged and skipped.
//! 3. Each bucket is turned into [`CapacityStats`] with the type's daily
//!    capacity and the period's day count.
//!
//! # Complexity
//! O(n * t) where n=jobs, t=workload entries per job.

use serde::Serialize;
use std::collections::HashMap;

use crate::config::CapacityConfig;
use crate::models::{utilization_pct, CapacityStats, Job, PeriodRange, ProductionType};

/// Capacity figures for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityReport {
    pub period: PeriodRange,
    /// One entry per configured production type, in configuration order.
    pub stats: Vec<CapacityStats>,
    /// Jobs that passed the status and date filter.
    pub included_jobs: usize,
    /// IDs of included jobs whose workload could not be decoded.
    pub skipped_jobs: Vec<String>,
}

impl CapacityReport {
    /// Stats for a production type.
    pub fn get(&self, production_type: &ProductionType) -> Option<&CapacityStats> {
        self.stats
            .iter()
            .find(|s| &s.production_type == production_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CapacityStats> {
        self.stats.iter()
    }

    /// Workload summed across all types.
    pub fn total_workload(&self) -> f64 {
        self.stats.iter().map(|s| s.current_workload).sum()
    }

    /// Capacity summed across all types.
    pub fn total_capacity(&self) -> f64 {
        self.stats.iter().map(|s| s.capacity_total).sum()
    }

    /// Utilization of the combined capacity (0 when there is none).
    pub fn overall_utilization_pct(&self) -> u64 {
        utilization_pct(self.total_workload(), self.total_capacity())
    }

    /// Types whose utilization is above 100%.
    pub fn overloaded(&self) -> Vec<&CapacityStats> {
        self.stats.iter().filter(|s| s.utilization_pct > 100).collect()
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    job_count: usize,
    workload: f64,
}

/// Aggregates job workload per production type.
#[derive(Debug, Clone, Copy)]
pub struct WorkloadAggregator<'c> {
    config: &'c CapacityConfig,
}

impl<'c> WorkloadAggregator<'c> {
    pub fn new(config: &'c CapacityConfig) -> Self {
        Self { config }
    }

    /// Whether a job counts toward the period.
    pub fn is_relevant(&self, job: &Job, period: &PeriodRange) -> bool {
        if !self.config.is_active_status(&job.status) {
            return false;
        }
        match job.start_date.as_deref().filter(|s| !s.trim().is_empty()) {
            None => true,
            Some(_) => job.start().is_some_and(|start| start <= period.end),
        }
    }

    /// Aggregates jobs into per-type capacity stats.
    pub fn aggregate(&self, jobs: &[Job], period: &PeriodRange) -> CapacityReport {
        let mut buckets: HashMap<&ProductionType, Bucket> = HashMap::new();
        let mut included_jobs = 0;
        let mut skipped_jobs = Vec::new();

        for job in jobs.iter().filter(|j| self.is_relevant(j, period)) {
            included_jobs += 1;

            let entries = match job.workload.entries() {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("Skipping workload of job {}: {}", job.id, e);
                    skipped_jobs.push(job.id.clone());
                    continue;
                }
            };

            for (production_type, entry) in entries {
                // Non-finite and non-positive work contribute nothing
                let has_work = entry.total_work.is_finite() && entry.total_work > 0.0;
                if !has_work || !self.config.is_recognized(production_type) {
                    continue;
                }
                let bucket = buckets.entry(production_type).or_default();
                bucket.job_count += 1;
                bucket.workload += entry.total_work;
            }
        }

        let mut stats: Vec<CapacityStats> = Vec::with_capacity(self.config.production_types.len());
        for production_type in &self.config.production_types {
            if stats.iter().any(|s| &s.production_type == production_type) {
                continue;
            }
            let bucket = buckets.get(production_type).copied().unwrap_or_default();
            stats.push(CapacityStats::compute(
                production_type.clone(),
                bucket.job_count,
                bucket.workload,
                self.config.daily(production_type),
                period.days,
            ));
        }

        CapacityReport {
            period: *period,
            stats,
            included_jobs,
            skipped_jobs,
        }
    }
}
