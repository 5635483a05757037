//! Timeline layout models.
//!
//! A [`Timeline`] is a job's clipped column range inside a calendar
//! window, optionally assigned to a display row. An [`AllocationResult`]
//! groups placed timelines into rows and collects the ones that did not
//! fit.
//!
//! # Invariants
//! - `width == end_col - start_col + 1 >= 1`
//! - No two timelines in the same row overlap.
//! - `total == Σ rows[i].len() + overflow.len()`

use serde::Serialize;

use super::Job;

/// An inclusive column range `[start_col, end_col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnSpan {
    pub start_col: usize,
    pub end_col: usize,
}

impl ColumnSpan {
    /// Creates a span. `start_col` must not exceed `end_col`.
    pub fn new(start_col: usize, end_col: usize) -> Self {
        debug_assert!(start_col <= end_col, "inverted column span");
        Self { start_col, end_col }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.end_col - self.start_col + 1
    }

    /// Whether two spans share a column.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        !(other.end_col < self.start_col || self.end_col < other.start_col)
    }
}

/// A job mapped onto window columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Timeline<'a> {
    pub job: &'a Job,
    pub start_col: usize,
    pub end_col: usize,
    pub width: usize,
    /// Assigned display row. `None` until placed, and for overflow.
    pub row_index: Option<usize>,
}

impl<'a> Timeline<'a> {
    /// Creates an unplaced timeline for a job over a column span.
    pub fn new(job: &'a Job, span: ColumnSpan) -> Self {
        Self {
            job,
            start_col: span.start_col,
            end_col: span.end_col,
            width: span.width(),
            row_index: None,
        }
    }

    #[inline]
    pub fn span(&self) -> ColumnSpan {
        ColumnSpan {
            start_col: self.start_col,
            end_col: self.end_col,
        }
    }

    #[inline]
    pub fn overlaps(&self, other: &Timeline<'_>) -> bool {
        self.span().overlaps(&other.span())
    }

    pub fn is_placed(&self) -> bool {
        self.row_index.is_some()
    }
}

/// Output of row packing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllocationResult<'a> {
    /// Rows in creation order; each row holds non-overlapping timelines.
    pub rows: Vec<Vec<Timeline<'a>>>,
    /// Timelines that could not be placed, in placement order.
    pub overflow: Vec<Timeline<'a>>,
    /// Number of timelines considered.
    pub total: usize,
}

impl<'a> AllocationResult<'a> {
    /// Number of placed timelines.
    pub fn placed_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_overflow(&self) -> bool {
        !self.overflow.is_empty()
    }

    /// All placed timelines, row by row.
    pub fn placed(&self) -> impl Iterator<Item = &Timeline<'a>> {
        self.rows.iter().flatten()
    }

    /// Finds the placed timeline for a job.
    pub fn find(&self, job_id: &str) -> Option<&Timeline<'a>> {
        self.placed().find(|t| t.job.id == job_id)
    }
}

/// The part of a timeline that falls within one calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WeekSegment {
    pub week_index: usize,
    /// First covered day within the week (inclusive).
    pub from_day_in_week: usize,
    /// Last covered day within the week (inclusive).
    pub to_day_in_week: usize,
}

impl WeekSegment {
    #[inline]
    pub fn width(&self) -> usize {
        self.to_day_in_week - self.from_day_in_week + 1
    }

    /// Absolute window columns this segment covers.
    pub fn columns(&self, days_per_week: usize) -> ColumnSpan {
        let base = self.week_index * days_per_week;
        ColumnSpan {
            start_col: base + self.from_day_in_week,
            end_col: base + self.to_day_in_week,
        }
    }
}
