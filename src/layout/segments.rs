//! Splitting timelines into per-week segments.
//!
//! A month grid renders one row of cells per week, so a timeline that
//! crosses a week boundary is drawn as several bars. Segments are emitted
//! in week order and together cover `[start_col, end_col]` exactly once.

use crate::models::{ColumnSpan, Timeline, WeekSegment};

/// Splits a timeline into week segments.
///
/// Returns an empty list for a zero-width timeline or `days_per_week == 0`.
pub fn split_weeks(timeline: &Timeline<'_>, days_per_week: usize) -> Vec<WeekSegment> {
    if timeline.width == 0 {
        return Vec::new();
    }
    split_span(
        ColumnSpan {
            start_col: timeline.start_col,
            end_col: timeline.start_col + timeline.width - 1,
        },
        days_per_week,
    )
}

/// Splits an absolute column span into week segments.
pub fn split_span(span: ColumnSpan, days_per_week: usize) -> Vec<WeekSegment> {
    if days_per_week == 0 || span.end_col < span.start_col {
        return Vec::new();
    }
    let last_day = days_per_week - 1;

    let start_week = span.start_col / days_per_week;
    let start_day = span.start_col % days_per_week;
    let end_week = span.end_col / days_per_week;
    let end_day = span.end_col % days_per_week;

    if start_week == end_week {
        return vec![WeekSegment {
            week_index: start_week,
            from_day_in_week: start_day,
            to_day_in_week: end_day,
        }];
    }

    let mut segments = Vec::with_capacity(end_week - start_week + 1);
    segments.push(WeekSegment {
        week_index: start_week,
        from_day_in_week: start_day,
        to_day_in_week: last_day,
    });
    segments.extend((start_week + 1..end_week).map(|week_index| WeekSegment {
        week_index,
        from_day_in_week: 0,
        to_day_in_week: last_day,
    }));
    segments.push(WeekSegment {
        week_index: end_week,
        from_day_in_week: 0,
        to_day_in_week: end_day,
    });
    segments
}
