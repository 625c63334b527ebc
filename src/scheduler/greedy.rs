//! Greedy priority-driven schedule generator.
//!
//! # Algorithm
//!
//! 1. Sort tasks by descending priority; ties keep input order (stable
//!    sort), which makes the output fully deterministic. Dependencies are
//!    hoisted ahead of their dependents, so a task's start bound is always
//!    computed from dependencies that have already been placed.
//! 2. For each task, the earliest permissible start is the latest
//!    completion (start + duration) among its dependencies, 0 if none.
//! 3. Scan start slots upward from that bound; take the first slot where
//!    every occupied unit has spare per-slot capacity on the required
//!    resource (first fit, no backtracking).
//! 4. Fitness = sum of priorities − makespan.
//!
//! Termination of the scan relies on durations and capacities being
//! strictly positive, which [`validate_input`] enforces before
//! construction starts.
//!
//! # Complexity
//! O(n log n) for the sort plus O(n · d · w) for placement, where d is
//! task duration and w the scan width.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::SchedulerError;
use crate::models::{Assignment, Resource, Schedule, Task};
use crate::scheduler::kpi::fitness;
use crate::validation::validate_input;

/// Input container for schedule generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Tasks to schedule.
    pub tasks: Vec<Task>,
    /// Available resources.
    pub resources: Vec<Resource>,
}

impl ScheduleRequest {
    /// Creates a new schedule request.
    pub fn new(tasks: Vec<Task>, resources: Vec<Resource>) -> Self {
        Self { tasks, resources }
    }
}

/// Generator output: the constructed schedule and its fitness score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOutcome {
    /// One assignment per input task, in generation order.
    pub best_schedule: Schedule,
    /// Priority sum minus makespan. Informational; the baseline produces
    /// exactly one candidate and does not search over alternatives.
    pub fitness: f64,
}

/// Deterministic greedy schedule generator.
///
/// # Example
///
/// ```
/// use slotplan::models::{Resource, Task};
/// use slotplan::scheduler::{GreedyScheduler, ScheduleRequest};
///
/// let request = ScheduleRequest::new(
///     vec![Task::new(1, 2, "R1").with_priority(8)],
///     vec![Resource::new("R1", 1)],
/// );
/// let outcome = GreedyScheduler::new().generate(&request).unwrap();
/// assert_eq!(outcome.best_schedule.assignment_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyScheduler;

impl GreedyScheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        Self
    }

    /// Validates the request, then constructs a schedule.
    ///
    /// Fails fast with [`SchedulerError::InvalidInput`] carrying every
    /// detected input problem; no schedule is produced on error.
    pub fn generate(&self, request: &ScheduleRequest) -> Result<ScheduleOutcome, SchedulerError> {
        validate_input(&request.tasks, &request.resources)
            .map_err(SchedulerError::InvalidInput)?;
        self.generate_unchecked(&request.tasks, &request.resources)
    }

    /// Constructs a schedule without re-validating the input.
    ///
    /// For callers that have already run [`validate_input`]. On
    /// unvalidated input the termination guarantee is the caller's
    /// problem: a dependency naming an unknown task contributes no start
    /// bound, and a task naming an unknown resource yields
    /// [`SchedulerError::Internal`].
    pub fn generate_unchecked(
        &self,
        tasks: &[Task],
        resources: &[Resource],
    ) -> Result<ScheduleOutcome, SchedulerError> {
        debug!(
            task_count = tasks.len(),
            resource_count = resources.len(),
            "generating schedule"
        );

        let capacities: HashMap<&str, i32> = resources
            .iter()
            .map(|r| (r.id.as_str(), r.capacity_per_slot))
            .collect();

        // Per-resource occupancy: slot → number of tasks occupying it.
        let mut usage: HashMap<&str, HashMap<i64, i32>> = HashMap::new();
        // Placements so far: task id → (start, duration).
        let mut placed: HashMap<i64, (i64, i64)> = HashMap::new();

        let mut schedule = Schedule::new();

        for &idx in &scheduling_order(tasks) {
            let task = &tasks[idx];
            let capacity =
                *capacities
                    .get(task.required_resource.as_str())
                    .ok_or_else(|| {
                        SchedulerError::Internal(format!(
                            "task {} requires resource '{}' which is not in the request",
                            task.id, task.required_resource
                        ))
                    })?;

            // Earliest start: latest completion among dependencies. An
            // unknown dependency contributes no bound; validated input
            // never reaches that branch.
            let mut bound = 0;
            for &dep in &task.depends_on {
                match placed.get(&dep) {
                    Some(&(start, duration)) => bound = bound.max(start + duration),
                    None => {
                        debug!(
                            task_id = task.id,
                            dependency_id = dep,
                            "dependency not placed, no bound"
                        );
                    }
                }
            }

            let resource_usage = usage.entry(task.required_resource.as_str()).or_default();
            let start = first_fit(resource_usage, bound, task.duration, capacity);
            for unit in start..start + task.duration {
                *resource_usage.entry(unit).or_insert(0) += 1;
            }

            trace!(
                task_id = task.id,
                time_slot = start,
                resource_id = %task.required_resource,
                "task placed"
            );
            placed.insert(task.id, (start, task.duration));
            schedule.add_assignment(Assignment::new(task.id, start, &task.required_resource));
        }

        let fitness = fitness(tasks, &schedule);
        debug!(
            assignments = schedule.assignment_count(),
            makespan = schedule.makespan(tasks),
            fitness,
            "schedule generated"
        );

        Ok(ScheduleOutcome {
            best_schedule: schedule,
            fitness,
        })
    }
}

/// Returns task indices in placement order: descending priority, input
/// order on ties (`sort_by` is stable, which is what makes the tie-break
/// reproducible), with each task's dependencies hoisted ahead of it.
///
/// The hoist is what guarantees the dependency invariant in the output:
/// a dependent's start bound is always computed from placed dependencies,
/// even when the dependent outranks them by priority. Unknown
/// dependencies are skipped; on (unvalidated) cyclic input the cycle edge
/// is ignored rather than recursed into.
fn scheduling_order(tasks: &[Task]) -> Vec<usize> {
    let mut by_priority: Vec<usize> = (0..tasks.len()).collect();
    by_priority.sort_by(|&a, &b| tasks[b].priority.cmp(&tasks[a].priority));

    let index_of: HashMap<i64, usize> = tasks.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
    let mut order = Vec::with_capacity(tasks.len());
    let mut state = vec![VisitState::Unvisited; tasks.len()];
    for &idx in &by_priority {
        visit(idx, tasks, &index_of, &mut state, &mut order);
    }
    order
}

#[derive(Clone, Copy, PartialEq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

fn visit(
    idx: usize,
    tasks: &[Task],
    index_of: &HashMap<i64, usize>,
    state: &mut [VisitState],
    order: &mut Vec<usize>,
) {
    if state[idx] != VisitState::Unvisited {
        return;
    }
    state[idx] = VisitState::InProgress;
    for &dep in &tasks[idx].depends_on {
        if let Some(&dep_idx) = index_of.get(&dep) {
            visit(dep_idx, tasks, index_of, state, order);
        }
    }
    state[idx] = VisitState::Done;
    order.push(idx);
}

/// First start slot `s >= bound` such that every unit in
/// `[s, s + duration)` has occupancy below `capacity`.
fn first_fit(usage: &HashMap<i64, i32>, bound: i64, duration: i64, capacity: i32) -> i64 {
    let mut start = bound;
    loop {
        let blocked = (start..start + duration)
            .find(|unit| usage.get(unit).copied().unwrap_or(0) >= capacity);
        match blocked {
            // Restart the scan just past the blocked unit
            Some(unit) => start = unit + 1,
            None => return start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;

    fn outcome(tasks: Vec<Task>, resources: Vec<Resource>) -> ScheduleOutcome {
        GreedyScheduler::new()
            .generate(&ScheduleRequest::new(tasks, resources))
            .unwrap()
    }

    #[test]
    fn test_single_task_starts_at_zero() {
        let out = outcome(vec![Task::new(1, 3, "R1")], vec![Resource::new("R1", 1)]);
        let a = out.best_schedule.assignment_for_task(1).unwrap();
        assert_eq!(a.time_slot, 0);
        assert_eq!(a.resource_id, "R1");
    }

    #[test]
    fn test_scenario_a() {
        // Dependent task waits for its dependency; fitness = (8+5) - 3 = 10
        let out = outcome(
            vec![
                Task::new(1, 2, "R1").with_priority(8),
                Task::new(2, 1, "R1").with_priority(5).with_dependency(1),
            ],
            vec![Resource::new("R1", 1)],
        );
        assert_eq!(
            out.best_schedule.assignments,
            vec![Assignment::new(1, 0, "R1"), Assignment::new(2, 2, "R1")]
        );
        assert_eq!(out.fitness, 10.0);
    }

    #[test]
    fn test_completeness() {
        let tasks: Vec<Task> = (1..=10).map(|i| Task::new(i, 1, "R1")).collect();
        let out = outcome(tasks.clone(), vec![Resource::new("R1", 2)]);
        assert_eq!(out.best_schedule.assignment_count(), tasks.len());
        for task in &tasks {
            assert!(out.best_schedule.assignment_for_task(task.id).is_some());
        }
    }

    #[test]
    fn test_capacity_never_exceeded() {
        let tasks: Vec<Task> = (1..=7).map(|i| Task::new(i, 2, "R1")).collect();
        let out = outcome(tasks.clone(), vec![Resource::new("R1", 3)]);

        let mut occupancy: HashMap<i64, i32> = HashMap::new();
        for a in &out.best_schedule.assignments {
            let duration = tasks.iter().find(|t| t.id == a.task_id).unwrap().duration;
            for unit in a.time_slot..a.time_slot + duration {
                *occupancy.entry(unit).or_insert(0) += 1;
            }
        }
        assert!(occupancy.values().all(|&count| count <= 3));
    }

    #[test]
    fn test_capacity_two_runs_pairs_concurrently() {
        let out = outcome(
            vec![Task::new(1, 2, "R1"), Task::new(2, 2, "R1")],
            vec![Resource::new("R1", 2)],
        );
        assert_eq!(out.best_schedule.assignment_for_task(1).unwrap().time_slot, 0);
        assert_eq!(out.best_schedule.assignment_for_task(2).unwrap().time_slot, 0);
    }

    #[test]
    fn test_priority_order_with_stable_ties() {
        let out = outcome(
            vec![
                Task::new(10, 1, "R1").with_priority(1),
                Task::new(20, 1, "R1").with_priority(5),
                Task::new(30, 1, "R1").with_priority(5),
            ],
            vec![Resource::new("R1", 1)],
        );
        // 20 and 30 tie at priority 5: input order wins, 10 goes last
        let order: Vec<i64> = out
            .best_schedule
            .assignments
            .iter()
            .map(|a| a.task_id)
            .collect();
        assert_eq!(order, vec![20, 30, 10]);
        assert_eq!(out.best_schedule.assignment_for_task(20).unwrap().time_slot, 0);
        assert_eq!(out.best_schedule.assignment_for_task(30).unwrap().time_slot, 1);
        assert_eq!(out.best_schedule.assignment_for_task(10).unwrap().time_slot, 2);
    }

    #[test]
    fn test_low_priority_dependency_placed_first() {
        // Task 2 outranks its dependency; the dependency is hoisted so
        // the start bound is still honored
        let out = outcome(
            vec![
                Task::new(1, 2, "R1").with_priority(1),
                Task::new(2, 1, "R1").with_priority(9).with_dependency(1),
            ],
            vec![Resource::new("R1", 1)],
        );
        let order: Vec<i64> = out
            .best_schedule
            .assignments
            .iter()
            .map(|a| a.task_id)
            .collect();
        assert_eq!(order, vec![1, 2]);
        assert_eq!(out.best_schedule.assignment_for_task(2).unwrap().time_slot, 2);
    }

    #[test]
    fn test_dependency_across_resources() {
        // Task 2 runs on a different, idle resource but still waits for 1
        let out = outcome(
            vec![
                Task::new(1, 4, "R1").with_priority(9),
                Task::new(2, 1, "R2").with_priority(1).with_dependency(1),
            ],
            vec![Resource::new("R1", 1), Resource::new("R2", 1)],
        );
        assert_eq!(out.best_schedule.assignment_for_task(2).unwrap().time_slot, 4);
    }

    #[test]
    fn test_dependency_invariant_holds() {
        let tasks = vec![
            Task::new(1, 2, "R1").with_priority(1),
            Task::new(2, 3, "R1").with_priority(7),
            Task::new(3, 1, "R1").with_priority(9).with_dependencies(vec![1, 2]),
        ];
        let out = outcome(tasks.clone(), vec![Resource::new("R1", 2)]);
        for task in &tasks {
            let start = out.best_schedule.assignment_for_task(task.id).unwrap().time_slot;
            for &dep in &task.depends_on {
                let dep_task = tasks.iter().find(|t| t.id == dep).unwrap();
                let dep_start = out.best_schedule.assignment_for_task(dep).unwrap().time_slot;
                assert!(start >= dep_start + dep_task.duration);
            }
        }
    }

    #[test]
    fn test_determinism() {
        let tasks = vec![
            Task::new(1, 2, "R1").with_priority(3),
            Task::new(2, 3, "R2").with_priority(3),
            Task::new(3, 1, "R1").with_priority(8).with_dependency(2),
        ];
        let resources = vec![Resource::new("R1", 1), Resource::new("R2", 2)];
        let first = outcome(tasks.clone(), resources.clone());
        let second = outcome(tasks, resources);
        assert_eq!(first.best_schedule, second.best_schedule);
        assert_eq!(first.fitness, second.fitness);
    }

    #[test]
    fn test_empty_request() {
        let out = outcome(vec![], vec![]);
        assert!(out.best_schedule.is_empty());
        assert_eq!(out.fitness, 0.0);
    }

    #[test]
    fn test_invalid_input_rejected_before_generation() {
        let err = GreedyScheduler::new()
            .generate(&ScheduleRequest::new(
                vec![Task::new(1, 0, "R1")],
                vec![Resource::new("R1", 1)],
            ))
            .unwrap_err();
        assert_eq!(
            err.input_errors(),
            Some(
                [InputError::NonPositiveDuration {
                    task_id: 1,
                    duration: 0
                }]
                .as_slice()
            )
        );
    }

    #[test]
    fn test_unchecked_unknown_dependency_contributes_no_bound() {
        // Bypassing validation: the unknown dependency is ignored and the
        // task is placed at slot 0.
        let out = GreedyScheduler::new()
            .generate_unchecked(
                &[Task::new(1, 1, "R1").with_dependency(99)],
                &[Resource::new("R1", 1)],
            )
            .unwrap();
        assert_eq!(out.best_schedule.assignment_for_task(1).unwrap().time_slot, 0);
    }

    #[test]
    fn test_unchecked_unknown_resource_is_internal_error() {
        let err = GreedyScheduler::new()
            .generate_unchecked(&[Task::new(1, 1, "NOPE")], &[Resource::new("R1", 1)])
            .unwrap_err();
        assert!(matches!(err, SchedulerError::Internal(_)));
    }

    #[test]
    fn test_first_fit_skips_full_windows() {
        let mut usage = HashMap::new();
        // Slots 0..3 full at capacity 1
        for unit in 0..3 {
            usage.insert(unit, 1);
        }
        assert_eq!(first_fit(&usage, 0, 2, 1), 3);
        // A gap too small for duration 2 is skipped
        usage.insert(4, 1);
        assert_eq!(first_fit(&usage, 0, 2, 1), 5);
    }

    #[test]
    fn test_request_parses_from_wire_json() {
        let request: ScheduleRequest = serde_json::from_str(
            r#"{
                "tasks": [
                    {"taskId": 1, "duration": 2, "priority": 8,
                     "requiredResource": "R1", "dependsOn": []},
                    {"taskId": 2, "duration": 1, "priority": 5,
                     "requiredResource": "R1", "dependsOn": [1]}
                ],
                "resources": [
                    {"resourceId": "R1", "capacityPerSlot": 1}
                ]
            }"#,
        )
        .unwrap();

        let out = GreedyScheduler::new().generate(&request).unwrap();
        assert_eq!(out.fitness, 10.0);
        assert_eq!(out.best_schedule.assignment_for_task(2).unwrap().time_slot, 2);
    }

    #[test]
    fn test_outcome_wire_shape() {
        let out = outcome(
            vec![Task::new(1, 2, "R1").with_priority(8)],
            vec![Resource::new("R1", 1)],
        );
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["bestSchedule"][0]["taskId"], 1);
        assert_eq!(json["bestSchedule"][0]["timeSlot"], 0);
        assert_eq!(json["fitness"], 6.0);
    }
}
