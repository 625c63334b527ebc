//! Schedule (solution) model.
//!
//! A schedule is a complete assignment of tasks to resources and start
//! slots. Assignments are kept in generation order, which is priority
//! order rather than temporal order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Task;

/// A task-resource-time assignment.
///
/// Records that a task starts at `time_slot` on `resource_id` and occupies
/// it for the task's duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Assigned task ID.
    pub task_id: i64,
    /// Start time slot (>= 0 in a valid schedule).
    pub time_slot: i64,
    /// Assigned resource ID.
    pub resource_id: String,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(task_id: i64, time_slot: i64, resource_id: impl Into<String>) -> Self {
        Self {
            task_id,
            time_slot,
            resource_id: resource_id.into(),
        }
    }
}

/// A complete schedule: one assignment per task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    /// Assignments in generation order.
    pub assignments: Vec<Assignment>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Finds the assignment for a given task.
    pub fn assignment_for_task(&self, task_id: i64) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.task_id == task_id)
    }

    /// Returns all assignments on a given resource.
    pub fn assignments_for_resource(&self, resource_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.resource_id == resource_id)
            .collect()
    }

    /// Makespan: the latest `time_slot + duration` across all assignments.
    ///
    /// Durations live on the tasks, so the input tasks are needed to
    /// compute completion times. Assignments whose task is not among
    /// `tasks` are skipped.
    pub fn makespan(&self, tasks: &[Task]) -> i64 {
        let durations: HashMap<i64, i64> = tasks.iter().map(|t| (t.id, t.duration)).collect();
        self.assignments
            .iter()
            .filter_map(|a| durations.get(&a.task_id).map(|d| a.time_slot + d))
            .max()
            .unwrap_or(0)
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the schedule contains no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
