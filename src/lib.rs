//! Production board core for the U-Engine ecosystem.
//!
//! Turns a flat list of production jobs into the two computed views a
//! production-scheduling dashboard shows: a bounded, collision-free month
//! timeline and per-type capacity utilization for a period. Every
//! computation is pure and synchronous; inputs are borrowed, outputs are
//! freshly allocated, and no state survives a call.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `CalendarWindow`, `Timeline`,
//!   `AllocationResult`, `WeekSegment`, `PeriodRange`, `CapacityStats`
//! - **`layout`**: Interval clipping, greedy row packing, week splitting
//! - **`capacity`**: Period resolution and workload aggregation
//! - **`config`**: Immutable board configuration (TOML-loadable)
//! - **`validation`**: Advisory input checks for job lists
//!
//! # Architecture
//!
//! The crate visualizes and aggregates decisions made elsewhere. It does
//! not fetch data, persist anything, or resolve scheduling conflicts.
//!
//! # References
//!
//! - Kleinberg & Tardos (2005), "Algorithm Design", Ch. 4.1
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1.2

pub mod capacity;
pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod validation;
