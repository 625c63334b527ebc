//! Error taxonomy.
//!
//! Three distinct outcomes exist and must not be conflated:
//!
//! - Malformed input ([`InputError`], collected exhaustively by
//!   [`crate::validation::validate_input`]) — rejected before any schedule
//!   is produced.
//! - An invalid schedule ([`crate::constraints::ValidationReport`] with
//!   `valid = false`) — an expected, non-exceptional result of validation,
//!   not an error type at all.
//! - A computation fault ([`SchedulerError::Internal`]) — an unexpected
//!   missing lookup during generation; propagated explicitly, never
//!   silently absorbed.

use thiserror::Error;

/// A single malformed-input condition, naming the offending entity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A task's duration is zero or negative.
    #[error("task {task_id} has non-positive duration {duration}")]
    NonPositiveDuration { task_id: i64, duration: i64 },

    /// A task names no required resource.
    #[error("task {task_id} has empty requiredResource")]
    MissingRequiredResource { task_id: i64 },

    /// Two tasks share the same ID.
    #[error("duplicate task id {task_id}")]
    DuplicateTaskId { task_id: i64 },

    /// A resource's per-slot capacity is zero or negative.
    #[error("resource '{resource_id}' has non-positive capacityPerSlot {capacity}")]
    NonPositiveCapacity { resource_id: String, capacity: i32 },

    /// A resource has an empty identifier.
    #[error("resource has empty resourceId")]
    EmptyResourceId,

    /// Two resources share the same ID.
    #[error("duplicate resource id '{resource_id}'")]
    DuplicateResourceId { resource_id: String },

    /// A task requires a resource absent from the request.
    #[error("task {task_id} requires unknown resource '{resource_id}'")]
    UnknownResource { task_id: i64, resource_id: String },

    /// A task depends on a task absent from the request.
    #[error("task {task_id} depends on unknown task {dependency_id}")]
    UnknownDependency { task_id: i64, dependency_id: i64 },

    /// The dependency graph contains a cycle.
    #[error("dependency cycle involving task {task_id}")]
    DependencyCycle { task_id: i64 },
}

/// Errors returned by the schedule generator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchedulerError {
    /// Input failed structural validation; no schedule was produced.
    /// Carries every detected problem, not just the first.
    #[error("invalid input: {} error(s), first: {}", .0.len(), first_message(.0))]
    InvalidInput(Vec<InputError>),

    /// An unexpected lookup failed mid-generation. Indicates a bug or
    /// unvalidated input, never a normal outcome.
    #[error("internal scheduler error: {0}")]
    Internal(String),
}

fn first_message(errors: &[InputError]) -> String {
    errors
        .first()
        .map(|e| e.to_string())
        .unwrap_or_else(|| "none".into())
}

impl SchedulerError {
    /// Returns the collected input errors, if this is an input rejection.
    pub fn input_errors(&self) -> Option<&[InputError]> {
        match self {
            SchedulerError::InvalidInput(errors) => Some(errors),
            SchedulerError::Internal(_) => None,
        }
    }
}
