//! Independent schedule validation.
//!
//! Checks a schedule — from any source, not just this crate's generator —
//! against the hard scheduling constraints and reports every violation.
//! Deliberately shares no bookkeeping with the generator: occupancy is
//! recomputed here from scratch so the two components can only agree by
//! actually agreeing on the constraint semantics.
//!
//! # Rules
//!
//! 1. **Sanity** — non-negative start slots, positive durations, and
//!    assignments that reference tasks/resources present in the input.
//! 2. **No overbooking** — per (resource, slot) occupancy never exceeds
//!    the resource's per-slot capacity.
//! 3. **No overlap at capacity 1** — explicit specialization: two tasks
//!    sharing any slot on an exclusive resource conflict pairwise.
//! 4. **Dependency order** — a task starts no earlier than the completion
//!    of each of its dependencies.
//! 5. **Seat sufficiency** — opt-in: only checked where the task carries
//!    an occupant count *and* the resource a seat capacity.
//!
//! Every rule is evaluated; validation never stops at the first failure,
//! because callers need the complete diagnostic picture.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Resource, Schedule, Task};

/// Classification of schedule constraint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    /// An assignment starts at a negative time slot.
    NegativeTimeSlot,
    /// The assigned task has a non-positive duration.
    NonPositiveDuration,
    /// An assignment references a task absent from the input.
    UnknownTask,
    /// An assignment references a resource absent from the input.
    UnknownResource,
    /// A (resource, slot) pair holds more tasks than its capacity.
    CapacityExceeded,
    /// Two tasks share a slot on a capacity-1 resource.
    OverlapConflict,
    /// A task starts before one of its dependencies completes.
    PrecedenceViolation,
    /// A task's occupants exceed its resource's seat capacity.
    InsufficientSeats,
}

/// A broken hard constraint, naming the offending entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// The rule that failed.
    pub kind: ViolationKind,
    /// Offending task ID(s).
    pub task_ids: Vec<i64>,
    /// Offending resource, where one is involved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    /// Relevant time slot, where one is involved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<i64>,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    fn new(kind: ViolationKind, task_ids: Vec<i64>, message: String) -> Self {
        Self {
            kind,
            task_ids,
            resource_id: None,
            time_slot: None,
            message,
        }
    }

    fn with_resource(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    fn with_slot(mut self, time_slot: i64) -> Self {
        self.time_slot = Some(time_slot);
        self
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of schedule validation.
///
/// An invalid schedule is an expected result, not an error: `valid` is
/// `false` and `violations` enumerates every broken rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Whether every rule passed.
    pub valid: bool,
    /// All detected violations, in rule order.
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Renders violations as flat strings, the shape of the original
    /// orchestrator contract.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }
}

/// Validates a schedule against all constraints.
///
/// Pure function over an explicit snapshot: identical input always yields
/// an identical report. Violations are ordered by rule, then by resource
/// and slot, so the output is deterministic.
pub fn validate_schedule(
    tasks: &[Task],
    resources: &[Resource],
    schedule: &Schedule,
) -> ValidationReport {
    let task_index: HashMap<i64, &Task> = tasks.iter().map(|t| (t.id, t)).collect();
    let resource_index: HashMap<&str, &Resource> =
        resources.iter().map(|r| (r.id.as_str(), r)).collect();

    let mut violations = Vec::new();
    violations.extend(check_sanity(&task_index, &resource_index, schedule));
    violations.extend(check_capacity(&task_index, &resource_index, schedule));
    violations.extend(check_overlap(&task_index, &resource_index, schedule));
    violations.extend(check_dependencies(&task_index, schedule));
    violations.extend(check_seats(&task_index, &resource_index, schedule));

    debug!(
        assignments = schedule.assignment_count(),
        violations = violations.len(),
        "schedule validated"
    );

    ValidationReport {
        valid: violations.is_empty(),
        violations,
    }
}

/// Rule 1: slots non-negative, durations positive, references resolvable.
fn check_sanity(
    task_index: &HashMap<i64, &Task>,
    resource_index: &HashMap<&str, &Resource>,
    schedule: &Schedule,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for a in &schedule.assignments {
        if a.time_slot < 0 {
            violations.push(
                Violation::new(
                    ViolationKind::NegativeTimeSlot,
                    vec![a.task_id],
                    format!("task {} starts at negative slot {}", a.task_id, a.time_slot),
                )
                .with_slot(a.time_slot),
            );
        }
        match task_index.get(&a.task_id) {
            None => violations.push(Violation::new(
                ViolationKind::UnknownTask,
                vec![a.task_id],
                format!("assignment references unknown task {}", a.task_id),
            )),
            Some(task) if task.duration < 1 => violations.push(Violation::new(
                ViolationKind::NonPositiveDuration,
                vec![a.task_id],
                format!(
                    "task {} has non-positive duration {}",
                    a.task_id, task.duration
                ),
            )),
            Some(_) => {}
        }
        if !resource_index.contains_key(a.resource_id.as_str()) {
            violations.push(
                Violation::new(
                    ViolationKind::UnknownResource,
                    vec![a.task_id],
                    format!(
                        "task {} is assigned to unknown resource '{}'",
                        a.task_id, a.resource_id
                    ),
                )
                .with_resource(&a.resource_id),
            );
        }
    }
    violations
}

/// Per-slot occupancy: (resource, slot) → occupying task IDs. Ordered so
/// violation output is deterministic. Only assignments whose task and
/// resource both resolve contribute; dangling references are rule 1's
/// concern.
fn occupancy<'a>(
    task_index: &HashMap<i64, &Task>,
    resource_index: &HashMap<&'a str, &Resource>,
    schedule: &'a Schedule,
) -> BTreeMap<(&'a str, i64), Vec<i64>> {
    let mut occupied: BTreeMap<(&str, i64), Vec<i64>> = BTreeMap::new();
    for a in &schedule.assignments {
        let Some(task) = task_index.get(&a.task_id) else {
            continue;
        };
        if !resource_index.contains_key(a.resource_id.as_str()) || task.duration < 1 {
            continue;
        }
        for unit in a.time_slot..a.time_slot + task.duration {
            occupied
                .entry((a.resource_id.as_str(), unit))
                .or_default()
                .push(a.task_id);
        }
    }
    for ids in occupied.values_mut() {
        ids.sort_unstable();
    }
    occupied
}

/// Rule 2: occupancy never exceeds capacity. One violation per
/// over-booked (resource, slot), naming every occupying task.
fn check_capacity(
    task_index: &HashMap<i64, &Task>,
    resource_index: &HashMap<&str, &Resource>,
    schedule: &Schedule,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for ((resource_id, slot), task_ids) in occupancy(task_index, resource_index, schedule) {
        let capacity = resource_index[resource_id].capacity_per_slot;
        if task_ids.len() > capacity as usize {
            violations.push(
                Violation::new(
                    ViolationKind::CapacityExceeded,
                    task_ids.clone(),
                    format!(
                        "resource '{resource_id}' over capacity {capacity} at slot {slot}: \
                         tasks {task_ids:?}"
                    ),
                )
                .with_resource(resource_id)
                .with_slot(slot),
            );
        }
    }
    violations
}

/// Rule 3: no two tasks share a slot on a capacity-1 resource. One
/// violation per conflicting pair per resource, at the first shared slot.
fn check_overlap(
    task_index: &HashMap<i64, &Task>,
    resource_index: &HashMap<&str, &Resource>,
    schedule: &Schedule,
) -> Vec<Violation> {
    let mut first_conflict: BTreeMap<(&str, i64, i64), i64> = BTreeMap::new();
    for ((resource_id, slot), task_ids) in occupancy(task_index, resource_index, schedule) {
        if !resource_index[resource_id].is_exclusive() {
            continue;
        }
        for (i, &a) in task_ids.iter().enumerate() {
            for &b in &task_ids[i + 1..] {
                first_conflict.entry((resource_id, a, b)).or_insert(slot);
            }
        }
    }

    first_conflict
        .into_iter()
        .map(|((resource_id, a, b), slot)| {
            Violation::new(
                ViolationKind::OverlapConflict,
                vec![a, b],
                format!("tasks {a} and {b} overlap on resource '{resource_id}' at slot {slot}"),
            )
            .with_resource(resource_id)
            .with_slot(slot)
        })
        .collect()
}

/// Rule 4: each task starts no earlier than every dependency's
/// completion. Edges with either endpoint missing from the input or the
/// schedule are skipped.
fn check_dependencies(task_index: &HashMap<i64, &Task>, schedule: &Schedule) -> Vec<Violation> {
    let starts: HashMap<i64, i64> = schedule
        .assignments
        .iter()
        .map(|a| (a.task_id, a.time_slot))
        .collect();

    let mut violations = Vec::new();
    for a in &schedule.assignments {
        let Some(task) = task_index.get(&a.task_id) else {
            continue;
        };
        for &dep in &task.depends_on {
            let (Some(dep_task), Some(&dep_start)) = (task_index.get(&dep), starts.get(&dep))
            else {
                continue;
            };
            let required = dep_start + dep_task.duration;
            if a.time_slot < required {
                violations.push(Violation::new(
                    ViolationKind::PrecedenceViolation,
                    vec![task.id, dep],
                    format!(
                        "task {} starts at slot {} before dependency {} completes at slot {}",
                        task.id, a.time_slot, dep, required
                    ),
                ));
            }
        }
    }
    violations
}

/// Rule 5: occupants fit the seats. Opt-in per assignment: skipped unless
/// the task carries an occupant count and the resource a seat capacity,
/// so the rule is vacuously satisfied when either fact is absent.
fn check_seats(
    task_index: &HashMap<i64, &Task>,
    resource_index: &HashMap<&str, &Resource>,
    schedule: &Schedule,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for a in &schedule.assignments {
        let (Some(task), Some(resource)) = (
            task_index.get(&a.task_id),
            resource_index.get(a.resource_id.as_str()),
        ) else {
            continue;
        };
        if let (Some(occupants), Some(seats)) = (task.occupant_count, resource.seat_capacity) {
            if occupants > seats {
                violations.push(
                    Violation::new(
                        ViolationKind::InsufficientSeats,
                        vec![task.id],
                        format!(
                            "task {} needs {occupants} seats but resource '{}' has {seats}",
                            task.id, resource.id
                        ),
                    )
                    .with_resource(&resource.id),
                );
            }
        }
    }
    violations
}
