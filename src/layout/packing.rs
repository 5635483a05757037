//! Greedy bounded row packing.
//!
//! # Algorithm
//!
//! 1. Stable-sort timelines by priority rank, then start column
//!    (ascending), then width (descending), then job ID.
//! 2. For each timeline:
//!    - once `max_rows * max_per_row` timelines are displayed, every
//!      remaining timeline goes to overflow without further attempts;
//!    - otherwise place it in the first existing row that has a free
//!      slot and no overlapping timeline;
//!    - otherwise open a new row if fewer than `max_rows` exist;
//!    - otherwise it overflows.
//!
//! This is first-fit interval partitioning, not an optimal packer: a
//! narrow timeline sorted after the display cap is reached overflows even
//! if some row could still hold it.
//!
//! # Complexity
//! O(n log n + n * max_rows * max_per_row).
//!
//! # Reference
//! Kleinberg & Tardos (2005), "Algorithm Design", Ch. 4.1 (Interval Partitioning)

use std::cmp::Ordering;

use crate::config::LayoutConfig;
use crate::error::ConfigError;
use crate::models::{AllocationResult, Timeline};

/// Placement order: urgent first, earlier first, wider first, then by ID.
pub fn placement_order(a: &Timeline<'_>, b: &Timeline<'_>) -> Ordering {
    a.job
        .priority
        .rank()
        .cmp(&b.job.priority.rank())
        .then(a.start_col.cmp(&b.start_col))
        .then(b.width.cmp(&a.width))
        .then_with(|| a.job.id.cmp(&b.job.id))
}

/// Row allocator with fixed row and per-row limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPacker {
    max_rows: usize,
    max_per_row: usize,
}

impl RowPacker {
    /// Creates a packer.
    ///
    /// # Errors
    /// Both limits must be at least 1.
    pub fn new(max_rows: usize, max_per_row: usize) -> Result<Self, ConfigError> {
        if max_rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        if max_per_row == 0 {
            return Err(ConfigError::ZeroPerRow);
        }
        Ok(Self {
            max_rows,
            max_per_row,
        })
    }

    /// Creates a packer from layout configuration.
    pub fn from_config(config: &LayoutConfig) -> Result<Self, ConfigError> {
        Self::new(config.max_rows, config.max_per_row)
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    pub fn max_per_row(&self) -> usize {
        self.max_per_row
    }

    /// Maximum number of timelines that can be displayed.
    pub fn display_cap(&self) -> usize {
        self.max_rows.saturating_mul(self.max_per_row)
    }

    /// Assigns timelines to rows.
    ///
    /// Any incoming `row_index` is discarded. Placed timelines carry their
    /// row index; overflow timelines have `row_index == None`.
    pub fn allocate<'a>(&self, mut timelines: Vec<Timeline<'a>>) -> AllocationResult<'a> {
        let total = timelines.len();
        timelines.sort_by(placement_order);

        let cap = self.display_cap();
        let mut rows: Vec<Vec<Timeline<'a>>> = Vec::new();
        let mut overflow = Vec::new();
        let mut displayed = 0;

        for mut timeline in timelines {
            timeline.row_index = None;

            if displayed >= cap {
                log::debug!("job {} overflows: display cap {} reached", timeline.job.id, cap);
                overflow.push(timeline);
                continue;
            }

            let slot = rows.iter().position(|row| {
                row.len() < self.max_per_row && !row.iter().any(|t| t.overlaps(&timeline))
            });

            match slot {
                Some(index) => {
                    timeline.row_index = Some(index);
                    rows[index].push(timeline);
                    displayed += 1;
                }
                None if rows.len() < self.max_rows => {
                    timeline.row_index = Some(rows.len());
                    rows.push(vec![timeline]);
                    displayed += 1;
                }
                None => {
                    log::debug!("job {} overflows: no free row", timeline.job.id);
                    overflow.push(timeline);
                }
            }
        }

        AllocationResult {
            rows,
            overflow,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColumnSpan, Job, Priority};

    fn job(id: &str, priority: Priority) -> Job {
        Job::new(id).with_priority(priority)
    }

    fn timeline(job: &Job, start: usize, end: usize) -> Timeline<'_> {
        Timeline::new(job, ColumnSpan::new(start, end))
    }

    fn row_ids<'a>(result: &'a AllocationResult<'_>, row: usize) -> Vec<&'a str> {
        result.rows[row].iter().map(|t| t.job.id.as_str()).collect()
    }

    #[test]
    fn test_rejects_zero_limits() {
        assert!(matches!(RowPacker::new(0, 2), Err(ConfigError::ZeroRows)));
        assert!(matches!(RowPacker::new(4, 0), Err(ConfigError::ZeroPerRow)));
        assert!(RowPacker::from_config(&LayoutConfig::default()).is_ok());
    }

    #[test]
    fn test_same_column_separate_rows() {
        let a = job("a", Priority::Urgent);
        let b = job("b", Priority::High);
        let c = job("c", Priority::Normal);
        let packer = RowPacker::new(4, 2).unwrap();

        let result = packer.allocate(vec![
            timeline(&c, 5, 5),
            timeline(&a, 5, 5),
            timeline(&b, 5, 5),
        ]);

        assert_eq!(result.row_count(), 3);
        assert_eq!(row_ids(&result, 0), vec!["a"]);
        assert_eq!(row_ids(&result, 1), vec!["b"]);
        assert_eq!(row_ids(&result, 2), vec!["c"]);
        assert!(result.overflow.is_empty());
        assert_eq!(result.total, 3);
    }

    #[test]
    fn test_non_overlapping_share_row() {
        let a = job("a", Priority::Normal);
        let b = job("b", Priority::Normal);
        let packer = RowPacker::new(4, 2).unwrap();

        let result = packer.allocate(vec![timeline(&b, 4, 6), timeline(&a, 0, 3)]);
        assert_eq!(result.row_count(), 1);
        assert_eq!(row_ids(&result, 0), vec!["a", "b"]);
        assert!(result.rows[0].iter().all(|t| t.row_index == Some(0)));
    }

    #[test]
    fn test_touching_columns_overlap() {
        let a = job("a", Priority::Normal);
        let b = job("b", Priority::Normal);
        let packer = RowPacker::new(4, 2).unwrap();

        let result = packer.allocate(vec![timeline(&a, 0, 3), timeline(&b, 3, 6)]);
        assert_eq!(result.row_count(), 2);
    }

    #[test]
    fn test_per_row_limit_opens_new_row() {
        let jobs: Vec<Job> = ["a", "b", "c"]
            .iter()
            .map(|id| job(id, Priority::Normal))
            .collect();
        let packer = RowPacker::new(4, 2).unwrap();

        let result = packer.allocate(vec![
            timeline(&jobs[0], 0, 0),
            timeline(&jobs[1], 2, 2),
            timeline(&jobs[2], 4, 4),
        ]);
        assert_eq!(row_ids(&result, 0), vec!["a", "b"]);
        assert_eq!(row_ids(&result, 1), vec!["c"]);
    }

    #[test]
    fn test_row_limit_overflow() {
        let jobs: Vec<Job> = ["a", "b", "c"]
            .iter()
            .map(|id| job(id, Priority::Normal))
            .collect();
        let packer = RowPacker::new(2, 3).unwrap();

        let result = packer.allocate(jobs.iter().map(|j| timeline(j, 0, 6)).collect());
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.overflow.len(), 1);
        assert_eq!(result.overflow[0].job.id, "c");
        assert_eq!(result.overflow[0].row_index, None);
        assert_eq!(result.total, 3);
    }

    #[test]
    fn test_display_cap_cuts_off() {
        // Cap = 2: once "wide" and "left" are shown, everything else overflows.
        let wide = job("wide", Priority::Urgent);
        let left = job("left", Priority::High);
        let right = job("right", Priority::Low);
        let tiny = job("tiny", Priority::Low);
        let packer = RowPacker::new(2, 1).unwrap();

        let result = packer.allocate(vec![
            timeline(&tiny, 13, 13),
            timeline(&right, 10, 12),
            timeline(&wide, 0, 13),
            timeline(&left, 0, 2),
        ]);
        assert_eq!(result.placed_count(), 2);
        let overflow: Vec<&str> = result.overflow.iter().map(|t| t.job.id.as_str()).collect();
        assert_eq!(overflow, vec!["right", "tiny"]);
        assert_eq!(result.total, 4);

        // With room for two per row, "right" shares the row with "left"
        let packer = RowPacker::new(2, 2).unwrap();
        let result = packer.allocate(vec![
            timeline(&right, 10, 12),
            timeline(&wide, 0, 13),
            timeline(&left, 0, 2),
        ]);
        assert_eq!(row_ids(&result, 1), vec!["left", "right"]);
    }

    #[test]
    fn test_order_start_then_width() {
        let short = job("short", Priority::Normal);
        let long = job("long", Priority::Normal);
        let later = job("later", Priority::Normal);

        let mut items = vec![
            timeline(&later, 3, 4),
            timeline(&short, 1, 1),
            timeline(&long, 1, 5),
        ];
        items.sort_by(placement_order);
        let ids: Vec<&str> = items.iter().map(|t| t.job.id.as_str()).collect();
        assert_eq!(ids, vec!["long", "short", "later"]);
    }

    #[test]
    fn test_priority_beats_start() {
        let early_low = job("early", Priority::Low);
        let late_urgent = job("late", Priority::Urgent);
        let packer = RowPacker::new(1, 1).unwrap();

        let result = packer.allocate(vec![timeline(&early_low, 0, 1), timeline(&late_urgent, 9, 9)]);
        assert_eq!(row_ids(&result, 0), vec!["late"]);
        assert_eq!(result.overflow[0].job.id, "early");
    }

    #[test]
    fn test_ties_broken_by_id() {
        let x = job("x", Priority::Normal);
        let y = job("y", Priority::Normal);
        let packer = RowPacker::new(1, 1).unwrap();

        let forward = packer.allocate(vec![timeline(&x, 2, 4), timeline(&y, 2, 4)]);
        let backward = packer.allocate(vec![timeline(&y, 2, 4), timeline(&x, 2, 4)]);
        assert_eq!(forward, backward);
        assert_eq!(row_ids(&forward, 0), vec!["x"]);
    }

    #[test]
    fn test_empty_input() {
        let result = RowPacker::new(4, 2).unwrap().allocate(Vec::new());
        assert_eq!(result.total, 0);
        assert!(result.rows.is_empty());
        assert!(result.overflow.is_empty());
    }
}
