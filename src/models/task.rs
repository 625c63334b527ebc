//! Task model.
//!
//! A task is the unit of scheduling: it runs on exactly one resource for a
//! fixed number of consecutive time slots, and may depend on other tasks
//! completing first.

use serde::{Deserialize, Serialize};

/// A task to be scheduled.
///
/// Occupies its required resource for `duration` consecutive time slots.
/// Tasks listed in `depends_on` must complete before this task starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique caller-assigned identifier.
    #[serde(rename = "taskId")]
    pub id: i64,
    /// Duration in discrete time units. Must be > 0.
    pub duration: i64,
    /// Scheduling priority (higher = scheduled earlier).
    #[serde(default)]
    pub priority: i32,
    /// ID of the resource this task must run on.
    pub required_resource: String,
    /// IDs of tasks that must complete before this task starts.
    #[serde(default)]
    pub depends_on: Vec<i64>,
    /// Human-readable label (e.g., course name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Number of occupants (e.g., class size). Only consulted by the
    /// seat-sufficiency check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupant_count: Option<i32>,
}

impl Task {
    /// Creates a new task on the given resource.
    pub fn new(id: i64, duration: i64, required_resource: impl Into<String>) -> Self {
        Self {
            id,
            duration,
            priority: 0,
            required_resource: required_resource.into(),
            depends_on: Vec::new(),
            label: None,
            occupant_count: None,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Adds a dependency on another task.
    pub fn with_dependency(mut self, task_id: i64) -> Self {
        self.depends_on.push(task_id);
        self
    }

    /// Sets the dependency list wholesale.
    pub fn with_dependencies(mut self, task_ids: Vec<i64>) -> Self {
        self.depends_on = task_ids;
        self
    }

    /// Sets the human-readable label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the occupant count (e.g., class size).
    pub fn with_occupants(mut self, count: i32) -> Self {
        self.occupant_count = Some(count);
        self
    }

    /// Whether this task has dependencies.
    pub fn has_dependencies(&self) -> bool {
        !self.depends_on.is_empty()
    }
}
