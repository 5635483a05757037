//! Production job model.
//!
//! A job is the read-only input record supplied by the data-fetching
//! layer. Dates arrive as raw strings and are parsed on demand, so a
//! malformed date excludes the job from the calendar instead of failing
//! the whole batch.
//!
//! # Date resolution
//! - start: `start_date`
//! - end: `completion_date` if present, otherwise `due_date`

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::WorkloadError;

/// Scheduling priority of a job.
///
/// Ordered by [`Priority::rank`]: lower rank is placed first. A missing
/// or `null` priority is `Normal`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Priority {
    Urgent,
    High,
    #[default]
    Normal,
    Low,
}

impl Priority {
    /// Numeric placement rank (`urgent=0` .. `low=3`).
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            Priority::Urgent => 0,
            Priority::High => 1,
            Priority::Normal => 2,
            Priority::Low => 3,
        }
    }

    /// Parses a priority token case-insensitively. Unknown tokens map to `Normal`.
    pub fn parse(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "urgent" => Priority::Urgent,
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Normal,
        }
    }

    /// Lowercase wire token.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Normal => "normal",
            Priority::Low => "low",
        }
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        Priority::parse(&s)
    }
}

impl From<Option<String>> for Priority {
    fn from(s: Option<String>) -> Self {
        s.map(Priority::from).unwrap_or_default()
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        p.as_str().to_string()
    }
}

/// Production category (print method) a workload is attributed to.
///
/// The set is open: the four built-in types are provided as constants,
/// and configuration decides which types get capacity buckets.
/// Names are normalized to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ProductionType(Cow<'static, str>);

impl ProductionType {
    pub const SCREEN: ProductionType = ProductionType(Cow::Borrowed("screen"));
    pub const DTF: ProductionType = ProductionType(Cow::Borrowed("dtf"));
    pub const SUBLIMATION: ProductionType = ProductionType(Cow::Borrowed("sublimation"));
    pub const EMBROIDERY: ProductionType = ProductionType(Cow::Borrowed("embroidery"));

    /// Creates a production type from a name (trimmed, lowercased).
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Cow::Owned(name.as_ref().trim().to_ascii_lowercase()))
    }

    /// The four built-in types, in display order.
    pub fn builtin() -> Vec<ProductionType> {
        vec![
            Self::SCREEN,
            Self::DTF,
            Self::SUBLIMATION,
            Self::EMBROIDERY,
        ]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProductionType {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ProductionType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<ProductionType> for String {
    fn from(t: ProductionType) -> Self {
        t.0.into_owned()
    }
}

impl fmt::Display for ProductionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Work attributed to one production type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkEntry {
    /// Unit-less amount of work (non-negative in well-formed data).
    pub total_work: f64,
}

/// A job's workload, decoded once from either a JSON object or a
/// JSON-encoded string.
///
/// Decoding never fails the enclosing [`Job`]: a bad payload is kept as
/// [`Workload::Invalid`] and skipped by aggregation. The raw payload is
/// kept too, so serializing and decoding again yields the same error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Workload {
    /// Successfully decoded entries keyed by production type.
    Decoded(BTreeMap<ProductionType, WorkEntry>),
    /// The payload could not be decoded.
    Invalid {
        raw: serde_json::Value,
        error: WorkloadError,
    },
}

impl Default for Workload {
    fn default() -> Self {
        Workload::Decoded(BTreeMap::new())
    }
}

impl Workload {
    /// Creates an empty decoded workload.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decodes a JSON-encoded workload string.
    ///
    /// A blank string is treated as an empty workload.
    pub fn from_json_str(s: &str) -> Self {
        if s.trim().is_empty() {
            return Self::empty();
        }
        let raw = || serde_json::Value::String(s.to_string());
        match serde_json::from_str::<serde_json::Value>(s) {
            Ok(serde_json::Value::String(_)) => Workload::Invalid {
                raw: raw(),
                error: WorkloadError::NotAnObject("string"),
            },
            Ok(value) => Self::from(value),
            Err(e) => Workload::Invalid {
                raw: raw(),
                error: e.into(),
            },
        }
    }

    /// Adds (or replaces) an entry. Turns an invalid workload into a decoded one.
    pub fn with_entry(self, production_type: ProductionType, total_work: f64) -> Self {
        let mut entries = match self {
            Workload::Decoded(entries) => entries,
            Workload::Invalid { .. } => BTreeMap::new(),
        };
        entries.insert(production_type, WorkEntry { total_work });
        Workload::Decoded(entries)
    }

    /// Decoded entries, or the decode error.
    pub fn entries(&self) -> Result<&BTreeMap<ProductionType, WorkEntry>, &WorkloadError> {
        match self {
            Workload::Decoded(entries) => Ok(entries),
            Workload::Invalid { error, .. } => Err(error),
        }
    }

    /// Total work for one type (0 when absent or undecodable).
    pub fn total_work(&self, production_type: &ProductionType) -> f64 {
        self.entries()
            .ok()
            .and_then(|e| e.get(production_type))
            .map_or(0.0, |e| e.total_work)
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Workload::Decoded(_))
    }
}

impl From<serde_json::Value> for Workload {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Workload::empty(),
            Value::String(s) => Workload::from_json_str(&s),
            Value::Object(map) => {
                let entries = map
                    .into_iter()
                    .map(|(key, entry)| {
                        let total_work = entry.get("total_work").map_or(0.0, number_like);
                        (ProductionType::new(key), WorkEntry { total_work })
                    })
                    .collect();
                Workload::Decoded(entries)
            }
            other => {
                let kind = match other {
                    Value::Array(_) => "array",
                    Value::Bool(_) => "boolean",
                    _ => "number",
                };
                Workload::Invalid {
                    raw: other,
                    error: WorkloadError::NotAnObject(kind),
                }
            }
        }
    }
}

impl From<Workload> for serde_json::Value {
    fn from(workload: Workload) -> Self {
        match workload {
            Workload::Decoded(entries) => serde_json::Value::Object(
                entries
                    .into_iter()
                    .map(|(t, e)| {
                        (
                            String::from(t),
                            serde_json::json!({ "total_work": e.total_work }),
                        )
                    })
                    .collect(),
            ),
            Workload::Invalid { raw, .. } => raw,
        }
    }
}

/// Numbers and numeric strings both count; anything else, including
/// `"inf"`, `"NaN"` and out-of-range literals, is zero work.
fn number_like(value: &serde_json::Value) -> f64 {
    let work = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    work.filter(|w| w.is_finite()).unwrap_or(0.0)
}

/// A production job as supplied by the data layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier (numeric ids are accepted and stringified).
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Human-readable title.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Planned start date (raw).
    #[serde(default)]
    pub start_date: Option<String>,
    /// Actual completion date (raw). Preferred over `due_date` as the end.
    #[serde(default)]
    pub completion_date: Option<String>,
    /// Due date (raw).
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    /// Primary production type, if the job has one.
    #[serde(default)]
    pub production_type: Option<ProductionType>,
    /// Free-form status, compared case-insensitively.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(default)]
    pub workload: Workload,
}

impl Job {
    /// Creates a job with the given ID and no dates.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the start and due dates.
    pub fn with_dates(mut self, start: impl Into<String>, due: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self.due_date = Some(due.into());
        self
    }

    pub fn with_start_date(mut self, start: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self
    }

    pub fn with_due_date(mut self, due: impl Into<String>) -> Self {
        self.due_date = Some(due.into());
        self
    }

    pub fn with_completion_date(mut self, completed: impl Into<String>) -> Self {
        self.completion_date = Some(completed.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_production_type(mut self, production_type: ProductionType) -> Self {
        self.production_type = Some(production_type);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Adds a workload entry for a production type.
    pub fn with_work(mut self, production_type: ProductionType, total_work: f64) -> Self {
        self.workload = std::mem::take(&mut self.workload).with_entry(production_type, total_work);
        self
    }

    pub fn with_workload(mut self, workload: Workload) -> Self {
        self.workload = workload;
        self
    }

    /// Parsed start date. `None` if missing or malformed.
    pub fn start(&self) -> Option<NaiveDate> {
        self.start_date.as_deref().and_then(parse_date)
    }

    /// Raw end date: completion date if present, otherwise due date.
    pub fn end_date(&self) -> Option<&str> {
        self.completion_date
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.due_date.as_deref())
    }

    /// Parsed end date. `None` if missing or malformed.
    pub fn end(&self) -> Option<NaiveDate> {
        self.end_date().and_then(parse_date)
    }

    /// Inclusive `(start, end)` date range, if both ends parse.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start()?, self.end()?))
    }
}

/// Parses a calendar date from `YYYY-MM-DD` or a timestamp string.
///
/// Timestamps keep their literal date part (no timezone shifting).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Int(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Int(n) => n.to_string(),
    })
}
