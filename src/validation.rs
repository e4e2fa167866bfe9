//! Input validation for simulation runs.
//!
//! Checks the process list before a run starts. Detects:
//! - Empty or duplicate process names
//! - Zero burst times (a process must need at least one tick)
//! - Records that were already advanced by a previous run
//!
//! All problems are collected, not just the first one.

use crate::models::Process;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A process has an empty name.
    EmptyName,
    /// Two processes share the same name.
    DuplicateName,
    /// A process requires no service time.
    ZeroBurst,
    /// A process record carries state from an earlier run.
    StaleRecord,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the process list for a simulation run.
///
/// Checks:
/// 1. Every process has a non-empty name
/// 2. No two processes share a name
/// 3. Every burst time is at least one tick
/// 4. Every record is fresh (`remaining == burst`, no derived fields set)
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for (index, p) in processes.iter().enumerate() {
        if p.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("Process at position {index} has an empty name"),
            ));
        } else if !names.insert(p.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate process name: {}", p.name),
            ));
        }

        if p.burst == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroBurst,
                format!("Process '{}' has a zero burst time", p.name),
            ));
        }

        if is_stale(p) {
            errors.push(ValidationError::new(
                ValidationErrorKind::StaleRecord,
                format!("Process '{}' was already advanced by a previous run", p.name),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_stale(p: &Process) -> bool {
    p.remaining != p.burst
        || p.wait_time != 0
        || p.start_time.is_some()
        || p.response_time.is_some()
        || p.completion_time.is_some()
        || p.turnaround.is_some()
}
