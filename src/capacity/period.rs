//! Period token resolution.
//!
//! Maps a named period (`today`, `thisWeek`, ...) to a concrete inclusive
//! date range and the day count used for capacity math.
//!
//! # Rules
//!
//! | Token | Range | `days` (approximate) |
//! |-------|-------|------|
//! | `today` | now | 1 |
//! | `tomorrow` | now + 1 | 1 |
//! | `thisWeek` | Monday..Sunday of now | 7 |
//! | `nextWeek` | following Monday..Sunday | 7 |
//! | `thisMonth` | 1st..last of now's month | 30 |
//! | `nextMonth` | 1st..last of the next month | 30 |
//! | `thisQuarter` | first..last day of now's quarter | 90 |
//!
//! Unknown tokens resolve as `today`. With [`DayCountPolicy::Exact`] the
//! month and quarter rows report the true number of days instead.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{last_day_of_month, PeriodRange};

/// A named reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Period {
    Today,
    Tomorrow,
    ThisWeek,
    NextWeek,
    ThisMonth,
    NextMonth,
    ThisQuarter,
}

impl Period {
    /// All periods, in selector order.
    pub const ALL: [Period; 7] = [
        Period::Today,
        Period::Tomorrow,
        Period::ThisWeek,
        Period::NextWeek,
        Period::ThisMonth,
        Period::NextMonth,
        Period::ThisQuarter,
    ];

    /// Parses a period token (case-insensitive). Unknown tokens fall back to `Today`.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        match Self::ALL
            .into_iter()
            .find(|p| p.token().eq_ignore_ascii_case(token))
        {
            Some(period) => period,
            None => {
                log::debug!("unknown period token '{token}', using today");
                Period::Today
            }
        }
    }

    /// Wire token.
    pub fn token(self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Tomorrow => "tomorrow",
            Period::ThisWeek => "thisWeek",
            Period::NextWeek => "nextWeek",
            Period::ThisMonth => "thisMonth",
            Period::NextMonth => "nextMonth",
            Period::ThisQuarter => "thisQuarter",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Period::Today => "Today",
            Period::Tomorrow => "Tomorrow",
            Period::ThisWeek => "This Week",
            Period::NextWeek => "Next Week",
            Period::ThisMonth => "This Month",
            Period::NextMonth => "Next Month",
            Period::ThisQuarter => "This Quarter",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How month and quarter periods report their day count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayCountPolicy {
    /// Fixed 30 days for months and 90 for quarters.
    #[default]
    Approximate,
    /// The inclusive length of the resolved range.
    Exact,
}

const APPROX_MONTH_DAYS: u32 = 30;
const APPROX_QUARTER_DAYS: u32 = 90;

/// Resolves period tokens against a reference date.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodResolver {
    policy: DayCountPolicy,
}

impl PeriodResolver {
    pub fn new(policy: DayCountPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DayCountPolicy {
        self.policy
    }

    /// Resolves a token. Unknown tokens resolve as `today`.
    pub fn resolve(&self, token: &str, now: NaiveDate) -> PeriodRange {
        self.resolve_period(Period::parse(token), now)
    }

    /// Resolves a parsed period.
    pub fn resolve_period(&self, period: Period, now: NaiveDate) -> PeriodRange {
        self.try_resolve(period, now)
            .unwrap_or_else(|| PeriodRange::new(now, now, 1))
    }

    /// `None` only when the range leaves chrono's supported dates.
    fn try_resolve(&self, period: Period, now: NaiveDate) -> Option<PeriodRange> {
        let range = match period {
            Period::Today => PeriodRange::new(now, now, 1),
            Period::Tomorrow => {
                let day = now.succ_opt()?;
                PeriodRange::new(day, day, 1)
            }
            Period::ThisWeek => week_of(now)?,
            Period::NextWeek => week_of(now.checked_add_days(Days::new(7))?)?,
            Period::ThisMonth => {
                let (start, end) = month_bounds(now.year(), now.month())?;
                self.approximate(start, end, APPROX_MONTH_DAYS)
            }
            Period::NextMonth => {
                let (year, month) = if now.month() == 12 {
                    (now.year().checked_add(1)?, 1)
                } else {
                    (now.year(), now.month() + 1)
                };
                let (start, end) = month_bounds(year, month)?;
                self.approximate(start, end, APPROX_MONTH_DAYS)
            }
            Period::ThisQuarter => {
                let first_month = (now.month0() / 3) * 3 + 1;
                let start = NaiveDate::from_ymd_opt(now.year(), first_month, 1)?;
                let end = last_day_of_month(now.year(), first_month + 2)?;
                self.approximate(start, end, APPROX_QUARTER_DAYS)
            }
        };
        Some(range)
    }

    fn approximate(&self, start: NaiveDate, end: NaiveDate, approx_days: u32) -> PeriodRange {
        let days = match self.policy {
            DayCountPolicy::Approximate => approx_days,
            DayCountPolicy::Exact => ((end - start).num_days() + 1) as u32,
        };
        PeriodRange::new(start, end, days)
    }
}

/// Resolves a token with the default (approximate) day-count policy.
pub fn resolve_period(token: &str, now: NaiveDate) -> PeriodRange {
    PeriodResolver::default().resolve(token, now)
}

/// Monday-aligned 7-day week containing `date`.
fn week_of(date: NaiveDate) -> Option<PeriodRange> {
    let monday =
        date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))?;
    let sunday = monday.checked_add_days(Days::new(6))?;
    Some(PeriodRange::new(monday, sunday, 7))
}

fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, month, 1)?,
        last_day_of_month(year, month)?,
    ))
}
