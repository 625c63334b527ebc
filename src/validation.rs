//! Input validation for scheduling requests.
//!
//! Checks structural integrity of tasks and resources before generation.
//! Detects:
//! - Duplicate IDs
//! - Non-positive durations and capacities
//! - Empty resource identifiers
//! - Missing resource references
//! - Unknown dependency references
//! - Circular dependencies (DAG validation)
//!
//! All checks run; the caller gets every problem at once, not just the
//! first. Rejecting non-positive durations and capacities here is what
//! guarantees the generator's first-fit scan terminates.

use crate::error::InputError;
use crate::models::{Resource, Task};
use std::collections::{HashMap, HashSet};

/// Outcome of input validation: `Ok(())` or all detected errors.
pub type InputCheck = Result<(), Vec<InputError>>;

/// Validates a scheduling request.
///
/// Checks:
/// 1. No duplicate resource IDs, no empty resource IDs
/// 2. Every `capacity_per_slot` >= 1
/// 3. No duplicate task IDs
/// 4. Every `duration` >= 1, every task names a required resource
/// 5. Every `required_resource` references an existing resource
/// 6. Every `depends_on` entry references an existing task
/// 7. The dependency graph is acyclic
pub fn validate_input(tasks: &[Task], resources: &[Resource]) -> InputCheck {
    let mut errors = Vec::new();

    let mut resource_ids = HashSet::new();
    for r in resources {
        if r.id.is_empty() {
            errors.push(InputError::EmptyResourceId);
        } else if !resource_ids.insert(r.id.as_str()) {
            errors.push(InputError::DuplicateResourceId {
                resource_id: r.id.clone(),
            });
        }
        if r.capacity_per_slot < 1 {
            errors.push(InputError::NonPositiveCapacity {
                resource_id: r.id.clone(),
                capacity: r.capacity_per_slot,
            });
        }
    }

    let mut task_ids = HashSet::new();
    for task in tasks {
        if !task_ids.insert(task.id) {
            errors.push(InputError::DuplicateTaskId { task_id: task.id });
        }
        if task.duration < 1 {
            errors.push(InputError::NonPositiveDuration {
                task_id: task.id,
                duration: task.duration,
            });
        }
        if task.required_resource.is_empty() {
            errors.push(InputError::MissingRequiredResource { task_id: task.id });
        } else if !resource_ids.contains(task.required_resource.as_str()) {
            errors.push(InputError::UnknownResource {
                task_id: task.id,
                resource_id: task.required_resource.clone(),
            });
        }
    }

    for task in tasks {
        for &dep in &task.depends_on {
            if !task_ids.contains(&dep) {
                errors.push(InputError::UnknownDependency {
                    task_id: task.id,
                    dependency_id: dep,
                });
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(tasks) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the dependency graph using DFS.
///
/// Topological-sort style: a back-edge (an edge into a node currently on
/// the recursion stack) means a cycle. Edges naming unknown tasks are
/// ignored here; they are reported separately as `UnknownDependency`.
fn detect_cycles(tasks: &[Task]) -> Option<InputError> {
    let known: HashSet<i64> = tasks.iter().map(|t| t.id).collect();
    let mut adj: HashMap<i64, Vec<i64>> = HashMap::new();
    for task in tasks {
        for &dep in &task.depends_on {
            if known.contains(&dep) {
                adj.entry(dep).or_default().push(task.id);
            }
        }
    }

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for task in tasks {
        if !visited.contains(&task.id)
            && has_cycle_dfs(task.id, &adj, &mut visited, &mut in_stack)
        {
            return Some(InputError::DependencyCycle { task_id: task.id });
        }
    }

    None
}

fn has_cycle_dfs(
    node: i64,
    adj: &HashMap<i64, Vec<i64>>,
    visited: &mut HashSet<i64>,
    in_stack: &mut HashSet<i64>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(&node) {
        for &next in neighbors {
            if in_stack.contains(&next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(&next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(&node);
    false
}
