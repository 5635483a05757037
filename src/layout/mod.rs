//! Calendar timeline layout.
//!
//! Turns a flat job list into a bounded, collision-free month view:
//!
//! ```text
//! jobs ─► map_interval ─► RowPacker::allocate ─► split_weeks ─► BoardLayout
//! ```
//!
//! # Usage
//!
//! ```
//! use u_board::config::LayoutConfig;
//! use u_board::layout::build_layout;
//! use u_board::models::{CalendarWindow, Job};
//!
//! let jobs = vec![Job::new("J1").with_dates("2024-05-04", "2024-05-08")];
//! let window = CalendarWindow::month_grid(2024, 5).unwrap();
//!
//! let layout = build_layout(&jobs, &window, &LayoutConfig::default()).unwrap();
//! assert_eq!(layout.allocation.placed_count(), 1);
//! assert_eq!(layout.placed[0].segments.len(), 2); // Sat-Sun, then Mon-Wed
//! ```

mod interval;
mod packing;
mod segments;

pub use interval::{map_interval, map_timelines};
pub use packing::{placement_order, RowPacker};
pub use segments::{split_span, split_weeks};

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::error::ConfigError;
use crate::models::{AllocationResult, CalendarWindow, Job, Timeline, WeekSegment};

/// A placed timeline with its renderable week segments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedTimeline<'a> {
    pub timeline: Timeline<'a>,
    pub segments: Vec<WeekSegment>,
}

/// Complete layout of one calendar window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardLayout<'a> {
    pub allocation: AllocationResult<'a>,
    /// Placed timelines in row order, each split into week segments.
    pub placed: Vec<PlacedTimeline<'a>>,
    /// Jobs not shown because of missing, invalid, or out-of-window dates.
    pub excluded: usize,
    pub days_per_week: usize,
}

impl<'a> BoardLayout<'a> {
    /// Segments drawn in one calendar week, as `(row_index, timeline, segment)`.
    pub fn segments_for_week(
        &self,
        week_index: usize,
    ) -> Vec<(usize, &Timeline<'a>, WeekSegment)> {
        self.placed
            .iter()
            .flat_map(|p| {
                p.segments
                    .iter()
                    .filter(move |s| s.week_index == week_index)
                    .map(move |s| (p.timeline.row_index.unwrap_or_default(), &p.timeline, *s))
            })
            .collect()
    }

    /// Jobs that intersect the window but did not fit.
    pub fn overflow(&self) -> &[Timeline<'a>] {
        &self.allocation.overflow
    }
}

/// Lays out jobs on a calendar window.
///
/// # Errors
/// Fails if `config` has zero limits, or if its `days_per_week` differs
/// from the window's.
pub fn build_layout<'a>(
    jobs: &'a [Job],
    window: &CalendarWindow,
    config: &LayoutConfig,
) -> Result<BoardLayout<'a>, ConfigError> {
    config.validate()?;
    if window.days_per_week() != config.days_per_week {
        return Err(ConfigError::WeekLengthMismatch {
            config: config.days_per_week,
            window: window.days_per_week(),
        });
    }
    let packer = RowPacker::from_config(config)?;

    let (timelines, excluded) = map_timelines(jobs, window);
    let allocation = packer.allocate(timelines);

    let days_per_week = config.days_per_week;
    let placed = allocation
        .placed()
        .map(|timeline| PlacedTimeline {
            timeline: *timeline,
            segments: split_weeks(timeline, days_per_week),
        })
        .collect();

    Ok(BoardLayout {
        allocation,
        placed,
        excluded,
        days_per_week,
    })
}
