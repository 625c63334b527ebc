//! Discrete time-slot scheduling core.
//!
//! Assigns tasks to discrete time slots on capacity-limited resources, then
//! independently re-verifies the result. Two components, deliberately kept
//! apart so one can check the other:
//!
//! - **Generator** ([`scheduler::GreedyScheduler`]): deterministic greedy
//!   construction — sort by priority, first-fit slot scan, one assignment
//!   per task, scalar fitness (priority sum minus makespan).
//! - **Validator** ([`constraints::validate_schedule`]): pure predicate
//!   functions that check any schedule (not just ours) against the same
//!   rules — capacity, overlap, dependency order, seat sufficiency — and
//!   return every violation, never just the first.
//!
//! Both are synchronous, side-effect-free functions over an explicit
//! snapshot of tasks/resources/schedule. No I/O, no retained state, no
//! cross-request bookkeeping; transport, timeouts, and retries belong to
//! the caller.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Task`, `Resource`, `Assignment`, `Schedule`
//! - **`validation`**: Input integrity checks (duplicate IDs, cycles, references)
//! - **`scheduler`**: Greedy generator and schedule KPIs
//! - **`constraints`**: Independent schedule validation
//! - **`error`**: Error taxonomy
//!
//! # Example
//!
//! ```
//! use slotplan::models::{Resource, Task};
//! use slotplan::scheduler::{GreedyScheduler, ScheduleRequest};
//! use slotplan::constraints::validate_schedule;
//!
//! let tasks = vec![
//!     Task::new(1, 2, "R1").with_priority(8),
//!     Task::new(2, 1, "R1").with_priority(5).with_dependency(1),
//! ];
//! let resources = vec![Resource::new("R1", 1)];
//! let request = ScheduleRequest::new(tasks, resources);
//!
//! let outcome = GreedyScheduler::new().generate(&request).unwrap();
//! assert_eq!(outcome.fitness, 10.0);
//!
//! let report = validate_schedule(
//!     &request.tasks,
//!     &request.resources,
//!     &outcome.best_schedule,
//! );
//! assert!(report.valid);
//! ```

pub mod constraints;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use constraints::{validate_schedule, ValidationReport, Violation, ViolationKind};
pub use error::{InputError, SchedulerError};
pub use models::{Assignment, Resource, Schedule, Task};
pub use scheduler::{GreedyScheduler, ScheduleKpi, ScheduleOutcome, ScheduleRequest};
pub use validation::validate_input;
