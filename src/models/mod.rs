//! Production board domain models.
//!
//! Inputs are [`Job`] records borrowed from the data layer; everything
//! else is derived fresh on each computation and never persisted.
//!
//! | Model | Role |
//! |-------|------|
//! | Job | Input record: dates, priority, status, workload |
//! | CalendarWindow | Week-aligned run of rendered days |
//! | Timeline | Job clipped to window columns, with row |
//! | AllocationResult | Rows of timelines plus overflow |
//! | WeekSegment | Per-week slice of a timeline |
//! | PeriodRange | Resolved reporting period |
//! | CapacityStats | Per-type workload vs capacity |

mod calendar;
mod capacity;
mod job;
mod timeline;

pub(crate) use calendar::last_day_of_month;
pub use calendar::{CalendarWindow, DateSpan, Day, DAYS_PER_WEEK};
pub use capacity::{utilization_pct, CapacityStats, PeriodRange};
pub use job::{parse_date, Job, Priority, ProductionType, WorkEntry, Workload};
pub use timeline::{AllocationResult, ColumnSpan, Timeline, WeekSegment};
