//! Calendar window and date span models.
//!
//! A [`CalendarWindow`] is the bounded, week-aligned run of days a month
//! view renders. Columns are zero-based offsets from the first day;
//! consecutive runs of `days_per_week` columns form calendar weeks.
//!
//! # Date model
//! All spans are inclusive on both ends, in whole days.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::WindowError;

/// Default number of columns per calendar week.
pub const DAYS_PER_WEEK: usize = 7;

/// An inclusive date interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of days covered (inclusive). Zero or negative if inverted.
    #[inline]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Whether two spans share at least one day.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Intersection of two spans, if any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        if self.overlaps(other) {
            Some(Self::new(
                self.start.max(other.start),
                self.end.min(other.end),
            ))
        } else {
            None
        }
    }
}

/// One column of a calendar window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    /// Absolute column index in `[0, window.len())`.
    pub column: usize,
    pub date: NaiveDate,
    /// Whether the day belongs to the focus month (false for padding days).
    pub in_focus: bool,
}

/// A fixed-length, week-aligned sequence of days.
///
/// Only constructible through [`CalendarWindow::new`] or
/// [`CalendarWindow::month_grid`], so it is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarWindow {
    days: Vec<Day>,
    days_per_week: usize,
}

impl CalendarWindow {
    /// Creates a window of `length` consecutive days starting at `first_day`.
    ///
    /// # Errors
    /// `length` must be a positive multiple of `days_per_week`.
    pub fn new(
        first_day: NaiveDate,
        length: usize,
        days_per_week: usize,
    ) -> Result<Self, WindowError> {
        if days_per_week == 0 {
            return Err(WindowError::ZeroDaysPerWeek);
        }
        if length == 0 || length % days_per_week != 0 {
            return Err(WindowError::InvalidLength {
                length,
                days_per_week,
            });
        }

        let days = (0..length)
            .map(|column| {
                first_day
                    .checked_add_days(Days::new(column as u64))
                    .map(|date| Day {
                        column,
                        date,
                        in_focus: true,
                    })
                    .ok_or(WindowError::DateOverflow)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            days,
            days_per_week,
        })
    }

    /// Month view padded to whole Monday-started weeks.
    ///
    /// Padding days before the 1st and after the last day of the month
    /// have `in_focus == false`.
    pub fn month_grid(year: i32, month: u32) -> Result<Self, WindowError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(WindowError::InvalidMonth { year, month })?;
        let last = last_day_of_month(year, month).ok_or(WindowError::DateOverflow)?;

        let lead = first.weekday().num_days_from_monday() as u64;
        let grid_start = first
            .checked_sub_days(Days::new(lead))
            .ok_or(WindowError::DateOverflow)?;
        let covered = lead as usize + last.day() as usize;
        let length = covered.div_ceil(DAYS_PER_WEEK) * DAYS_PER_WEEK;

        let mut window = Self::new(grid_start, length, DAYS_PER_WEEK)?;
        for day in &mut window.days {
            day.in_focus = day.date.year() == year && day.date.month() == month;
        }
        Ok(window)
    }

    /// Number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    #[inline]
    pub fn days_per_week(&self) -> usize {
        self.days_per_week
    }

    /// Number of week rows.
    pub fn weeks(&self) -> usize {
        self.days.len() / self.days_per_week
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// Days of the given week row.
    pub fn week(&self, index: usize) -> Option<&[Day]> {
        let start = index.checked_mul(self.days_per_week)?;
        self.days.get(start..start + self.days_per_week)
    }

    pub fn first_day(&self) -> NaiveDate {
        self.days[0].date
    }

    pub fn last_day(&self) -> NaiveDate {
        self.days[self.days.len() - 1].date
    }

    /// The inclusive date span the window covers.
    pub fn span(&self) -> DateSpan {
        DateSpan::new(self.first_day(), self.last_day())
    }

    /// Column index of a date, if it falls inside the window.
    pub fn column_of(&self, date: NaiveDate) -> Option<usize> {
        let offset = (date - self.first_day()).num_days();
        usize::try_from(offset)
            .ok()
            .filter(|&col| col < self.days.len())
    }
}

/// Last calendar day of a month.
pub(crate) fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}
