//! Input validation for job lists.
//!
//! Layout and aggregation tolerate bad records by excluding them. This
//! module reports those records up front so the data layer can surface
//! them. Detects:
//! - Duplicate job IDs
//! - Unparseable dates
//! - End date before start date
//! - Malformed workload payloads
//! - Negative work amounts

use crate::models::{parse_date, Job};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// ID of the offending job.
    pub job_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two jobs share the same ID.
    DuplicateId,
    /// A date field is present but cannot be parsed.
    InvalidDate,
    /// The resolved end date precedes the start date.
    InvertedDateRange,
    /// The workload payload could not be decoded.
    MalformedWorkload,
    /// A workload entry has negative `total_work`.
    NegativeWork,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, job_id: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            job_id: job_id.to_string(),
            message: message.into(),
        }
    }
}

/// Validates a job list.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_jobs(jobs: &[Job]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for job in jobs {
        if !seen.insert(job.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                &job.id,
                format!("Duplicate job ID: {}", job.id),
            ));
        }

        let fields = [
            ("start_date", &job.start_date),
            ("completion_date", &job.completion_date),
            ("due_date", &job.due_date),
        ];
        for (field, value) in fields {
            if let Some(raw) = value.as_deref().filter(|s| !s.trim().is_empty()) {
                if parse_date(raw).is_none() {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidDate,
                        &job.id,
                        format!("Job '{}' has invalid {field}: '{raw}'", job.id),
                    ));
                }
            }
        }

        if let Some((start, end)) = job.date_range() {
            if end < start {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvertedDateRange,
                    &job.id,
                    format!("Job '{}' ends ({end}) before it starts ({start})", job.id),
                ));
            }
        }

        match job.workload.entries() {
            Ok(entries) => {
                for (production_type, entry) in entries {
                    if entry.total_work < 0.0 {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::NegativeWork,
                            &job.id,
                            format!(
                                "Job '{}' has negative {production_type} work: {}",
                                job.id, entry.total_work
                            ),
                        ));
                    }
                }
            }
            Err(e) => errors.push(ValidationError::new(
                ValidationErrorKind::MalformedWorkload,
                &job.id,
                format!("Job '{}' has malformed workload: {e}", job.id),
            )),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProductionType, Workload};

    fn sample_jobs() -> Vec<Job> {
        vec![
            Job::new("J1")
                .with_dates("2024-05-01", "2024-05-03")
                .with_work(ProductionType::SCREEN, 1200.0),
            Job::new("J2")
                .with_dates("2024-05-02", "2024-05-09")
                .with_completion_date("2024-05-08")
                .with_work(ProductionType::DTF, 300.0),
            Job::new("J3").with_status("pending"), // undated is fine
        ]
    }

    fn kinds(jobs: &[Job]) -> Vec<ValidationErrorKind> {
        validate_jobs(jobs)
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_jobs(&sample_jobs()).is_ok());
        assert!(validate_jobs(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let mut jobs = sample_jobs();
        jobs.push(Job::new("J1"));
        assert_eq!(kinds(&jobs), vec![ValidationErrorKind::DuplicateId]);
    }

    #[test]
    fn test_invalid_date() {
        let jobs = vec![Job::new("J1").with_dates("2024-05-01", "05/03/2024")];
        let errors = validate_jobs(&jobs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidDate);
        assert!(errors[0].message.contains("due_date"));
        assert_eq!(errors[0].job_id, "J1");
    }

    #[test]
    fn test_inverted_range() {
        let jobs = vec![Job::new("J1").with_dates("2024-05-10", "2024-05-01")];
        assert_eq!(kinds(&jobs), vec![ValidationErrorKind::InvertedDateRange]);
    }

    #[test]
    fn test_malformed_workload() {
        let jobs = vec![Job::new("J1").with_workload(Workload::from_json_str("[1,2"))];
        assert_eq!(kinds(&jobs), vec![ValidationErrorKind::MalformedWorkload]);
    }

    #[test]
    fn test_negative_work() {
        let jobs = vec![Job::new("J1").with_work(ProductionType::EMBROIDERY, -5.0)];
        assert_eq!(kinds(&jobs), vec![ValidationErrorKind::NegativeWork]);
    }

    #[test]
    fn test_multiple_errors() {
        let jobs = vec![
            Job::new("J1").with_dates("someday", "2024-05-01"),
            Job::new("J1").with_workload(Workload::from_json_str("true")),
        ];
        let errors = validate_jobs(&jobs).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
