//! Property tests for the calendar layout pipeline.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use u_board::layout::{map_interval, map_timelines, split_span, split_weeks, RowPacker};
use u_board::models::{CalendarWindow, ColumnSpan, Job, Priority};

const WINDOW_DAYS: usize = 35;

fn window_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 29).unwrap()
}

fn window() -> CalendarWindow {
    CalendarWindow::new(window_start(), WINDOW_DAYS, 7).unwrap()
}

fn priority(p: u8) -> Priority {
    match p {
        0 => Priority::Urgent,
        1 => Priority::High,
        2 => Priority::Normal,
        _ => Priority::Low,
    }
}

/// (priority, start offset from window start in days, length in days)
fn job_spec() -> impl Strategy<Value = (u8, i64, u64)> {
    (0u8..4, -20i64..50, 0u64..25)
}

fn build_jobs(specs: &[(u8, i64, u64)]) -> Vec<Job> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(p, offset, len))| {
            let start = if offset >= 0 {
                window_start() + Days::new(offset as u64)
            } else {
                window_start() - Days::new(offset.unsigned_abs())
            };
            let end = start + Days::new(len);
            Job::new(format!("J{i:03}"))
                .with_priority(priority(p))
                .with_dates(start.to_string(), end.to_string())
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_mapped_columns_in_bounds(specs in prop::collection::vec(job_spec(), 0..40)) {
        let window = window();
        for job in build_jobs(&specs) {
            let (start, end) = job.date_range().unwrap();
            match map_interval(&job, &window) {
                Some(span) => {
                    prop_assert!(span.start_col <= span.end_col);
                    prop_assert!(span.end_col < window.len());
                }
                None => {
                    prop_assert!(end < window.first_day() || start > window.last_day());
                }
            }
        }
    }

    #[test]
    fn prop_rows_respect_limits(
        specs in prop::collection::vec(job_spec(), 0..40),
        max_rows in 1usize..6,
        max_per_row in 1usize..5,
    ) {
        let jobs = build_jobs(&specs);
        let (timelines, _) = map_timelines(&jobs, &window());
        let count = timelines.len();
        let result = RowPacker::new(max_rows, max_per_row).unwrap().allocate(timelines);

        prop_assert_eq!(result.total, count);
        prop_assert_eq!(result.total, result.placed_count() + result.overflow.len());
        prop_assert!(result.rows.len() <= max_rows);
        prop_assert!(result.placed_count() <= max_rows * max_per_row);

        for (index, row) in result.rows.iter().enumerate() {
            prop_assert!(!row.is_empty());
            prop_assert!(row.len() <= max_per_row);
            for (i, a) in row.iter().enumerate() {
                prop_assert_eq!(a.row_index, Some(index));
                prop_assert_eq!(a.width, a.end_col - a.start_col + 1);
                for b in &row[i + 1..] {
                    prop_assert!(a.end_col < b.start_col || b.end_col < a.start_col);
                }
            }
        }
        prop_assert!(result.overflow.iter().all(|t| t.row_index.is_none()));
    }

    #[test]
    fn prop_allocation_ignores_input_order(
        specs in prop::collection::vec(job_spec(), 1..40),
        rotate in 0usize..40,
    ) {
        let jobs = build_jobs(&specs);
        let (timelines, _) = map_timelines(&jobs, &window());
        let packer = RowPacker::new(3, 2).unwrap();

        let mut reversed = timelines.clone();
        reversed.reverse();
        let mut rotated = timelines.clone();
        if !rotated.is_empty() {
            let k = rotate % rotated.len();
            rotated.rotate_left(k);
        }

        let expected = packer.allocate(timelines);
        prop_assert_eq!(&packer.allocate(reversed), &expected);
        prop_assert_eq!(&packer.allocate(rotated), &expected);
    }

    #[test]
    fn prop_segments_reconstruct_span(
        start in 0usize..70,
        width in 1usize..40,
        days_per_week in 1usize..10,
    ) {
        let span = ColumnSpan::new(start, start + width - 1);
        let segments = split_span(span, days_per_week);

        let mut columns = Vec::new();
        for (i, seg) in segments.iter().enumerate() {
            prop_assert!(seg.from_day_in_week <= seg.to_day_in_week);
            prop_assert!(seg.to_day_in_week < days_per_week);
            if i > 0 {
                prop_assert_eq!(seg.week_index, segments[i - 1].week_index + 1);
            }
            let cols = seg.columns(days_per_week);
            columns.extend(cols.start_col..=cols.end_col);
        }
        prop_assert_eq!(columns, (span.start_col..=span.end_col).collect::<Vec<_>>());
    }

    #[test]
    fn prop_placed_segments_stay_in_window(specs in prop::collection::vec(job_spec(), 0..30)) {
        let jobs = build_jobs(&specs);
        let window = window();
        let (timelines, _) = map_timelines(&jobs, &window);
        let result = RowPacker::new(4, 2).unwrap().allocate(timelines);

        for timeline in result.placed() {
            let segments = split_weeks(timeline, 7);
            let width: usize = segments.iter().map(|s| s.width()).sum();
            prop_assert_eq!(width, timeline.width);
            prop_assert!(segments.iter().all(|s| s.week_index < window.weeks()));
        }
    }
}
