//! Schedule quality metrics (KPIs).
//!
//! Computes performance indicators for a completed schedule from the
//! schedule and its input tasks/resources.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest `time_slot + duration` |
//! | Priority Sum | Σ priority over assigned tasks |
//! | Fitness | Priority sum − makespan |
//! | Utilization | Busy slot-units / (makespan × capacity) |

use std::collections::HashMap;

use crate::models::{Resource, Schedule, Task};

/// Fitness score: sum of priorities of assigned tasks minus makespan.
///
/// Informational — the greedy generator produces one candidate and does
/// not use fitness to choose among alternatives.
pub fn fitness(tasks: &[Task], schedule: &Schedule) -> f64 {
    let priority_sum: i64 = tasks
        .iter()
        .filter(|t| schedule.assignment_for_task(t.id).is_some())
        .map(|t| i64::from(t.priority))
        .sum();
    (priority_sum - schedule.makespan(tasks)) as f64
}

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleKpi {
    /// Makespan: latest completion slot.
    pub makespan: i64,
    /// Sum of priorities over assigned tasks.
    pub priority_sum: i64,
    /// Priority sum minus makespan.
    pub fitness: f64,
    /// Per-resource utilization: busy slot-units over makespan × capacity.
    pub utilization_by_resource: HashMap<String, f64>,
    /// Mean utilization across resources with assignments.
    pub avg_utilization: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule and its inputs.
    pub fn calculate(schedule: &Schedule, tasks: &[Task], resources: &[Resource]) -> Self {
        let makespan = schedule.makespan(tasks);
        let durations: HashMap<i64, i64> = tasks.iter().map(|t| (t.id, t.duration)).collect();

        let mut priority_sum: i64 = 0;
        for task in tasks {
            if schedule.assignment_for_task(task.id).is_some() {
                priority_sum += i64::from(task.priority);
            }
        }

        let mut busy_by_resource: HashMap<&str, i64> = HashMap::new();
        for a in &schedule.assignments {
            if let Some(&duration) = durations.get(&a.task_id) {
                *busy_by_resource.entry(a.resource_id.as_str()).or_insert(0) += duration;
            }
        }

        let capacities: HashMap<&str, i64> = resources
            .iter()
            .map(|r| (r.id.as_str(), i64::from(r.capacity_per_slot)))
            .collect();

        let mut utilization_by_resource = HashMap::new();
        if makespan > 0 {
            for (resource_id, busy) in &busy_by_resource {
                let capacity = capacities.get(resource_id).copied().unwrap_or(1).max(1);
                utilization_by_resource.insert(
                    resource_id.to_string(),
                    *busy as f64 / (makespan * capacity) as f64,
                );
            }
        }

        let avg_utilization = if utilization_by_resource.is_empty() {
            0.0
        } else {
            utilization_by_resource.values().sum::<f64>() / utilization_by_resource.len() as f64
        };

        Self {
            makespan,
            priority_sum,
            fitness: (priority_sum - makespan) as f64,
            utilization_by_resource,
            avg_utilization,
        }
    }
}
