//! Job date range → window column mapping.
//!
//! # Algorithm
//! 1. Resolve the job's `[start, end]` dates; fail closed if either is
//!    missing, malformed, or the range is inverted.
//! 2. Discard ranges that do not intersect the window.
//! 3. Clip to the window: a start before the first day maps to column 0,
//!    an end after the last day maps to the last column.
//!
//! On success `0 <= start_col <= end_col < window.len()`.

use crate::models::{CalendarWindow, ColumnSpan, DateSpan, Job, Timeline};

/// Maps a job onto window columns, or `None` if it cannot be shown.
pub fn map_interval(job: &Job, window: &CalendarWindow) -> Option<ColumnSpan> {
    let Some((start, end)) = job.date_range() else {
        log::debug!("job {} has missing or invalid dates, not shown", job.id);
        return None;
    };
    if end < start {
        log::debug!("job {} ends before it starts, not shown", job.id);
        return None;
    }

    let clipped = DateSpan::new(start, end).intersect(&window.span())?;
    let start_col = window.column_of(clipped.start)?;
    let end_col = window.column_of(clipped.end)?;
    Some(ColumnSpan::new(start_col, end_col))
}

/// Maps every job, returning the visible timelines (unplaced) and the
/// number of jobs that were excluded.
pub fn map_timelines<'a>(
    jobs: &'a [Job],
    window: &CalendarWindow,
) -> (Vec<Timeline<'a>>, usize) {
    let timelines: Vec<Timeline<'a>> = jobs
        .iter()
        .filter_map(|job| map_interval(job, window).map(|span| Timeline::new(job, span)))
        .collect();
    let excluded = jobs.len() - timelines.len();
    (timelines, excluded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // Two weeks: Mon 2024-04-29 .. Sun 2024-05-12
    fn window() -> CalendarWindow {
        CalendarWindow::new(NaiveDate::from_ymd_opt(2024, 4, 29).unwrap(), 14, 7).unwrap()
    }

    fn job(start: &str, end: &str) -> Job {
        Job::new("J").with_dates(start, end)
    }

    #[test]
    fn test_inside_window() {
        let span = map_interval(&job("2024-05-04", "2024-05-08"), &window()).unwrap();
        assert_eq!(span, ColumnSpan::new(5, 9));
        assert_eq!(span.width(), 5);
    }

    #[test]
    fn test_single_day() {
        let span = map_interval(&job("2024-04-29", "2024-04-29"), &window()).unwrap();
        assert_eq!(span, ColumnSpan::new(0, 0));
    }

    #[test]
    fn test_clipped_start() {
        let span = map_interval(&job("2024-04-01", "2024-05-01"), &window()).unwrap();
        assert_eq!(span, ColumnSpan::new(0, 2));
    }

    #[test]
    fn test_clipped_end() {
        let span = map_interval(&job("2024-05-10", "2024-06-30"), &window()).unwrap();
        assert_eq!(span, ColumnSpan::new(11, 13));
    }

    #[test]
    fn test_clipped_both_ends() {
        let span = map_interval(&job("2024-01-01", "2024-12-31"), &window()).unwrap();
        assert_eq!(span, ColumnSpan::new(0, 13));
    }

    #[test]
    fn test_outside_window() {
        assert!(map_interval(&job("2024-04-01", "2024-04-28"), &window()).is_none());
        assert!(map_interval(&job("2024-05-13", "2024-05-20"), &window()).is_none());
    }

    #[test]
    fn test_boundary_days_intersect() {
        assert_eq!(
            map_interval(&job("2024-04-20", "2024-04-29"), &window()),
            Some(ColumnSpan::new(0, 0))
        );
        assert_eq!(
            map_interval(&job("2024-05-12", "2024-05-20"), &window()),
            Some(ColumnSpan::new(13, 13))
        );
    }

    #[test]
    fn test_fails_closed() {
        assert!(map_interval(&Job::new("J"), &window()).is_none());
        assert!(map_interval(&Job::new("J").with_start_date("2024-05-01"), &window()).is_none());
        assert!(map_interval(&job("2024-05-01", "not a date"), &window()).is_none());
        assert!(map_interval(&job("2024-13-01", "2024-05-03"), &window()).is_none());
        assert!(map_interval(&job("2024-05-05", "2024-05-01"), &window()).is_none());
    }

    #[test]
    fn test_completion_date_used_as_end() {
        let j = job("2024-05-01", "2024-05-20").with_completion_date("2024-05-03");
        assert_eq!(map_interval(&j, &window()), Some(ColumnSpan::new(2, 4)));
    }

    #[test]
    fn test_map_timelines_counts_excluded() {
        let jobs = vec![
            Job::new("A").with_dates("2024-05-01", "2024-05-02"),
            Job::new("B"),
            Job::new("C").with_dates("2025-01-01", "2025-01-02"),
        ];
        let (timelines, excluded) = map_timelines(&jobs, &window());
        assert_eq!(timelines.len(), 1);
        assert_eq!(timelines[0].job.id, "A");
        assert_eq!(timelines[0].width, 2);
        assert_eq!(excluded, 2);
    }
}
