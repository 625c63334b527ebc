//! Greedy schedule generation and KPI evaluation.
//!
//! # Algorithm
//!
//! `GreedyScheduler` is a deterministic constructive heuristic: tasks are
//! taken in descending priority order (input order breaks ties) and each
//! is placed at the first start slot where its resource has spare
//! capacity for the task's whole duration. One candidate, no backtracking,
//! no search — the fitness score is informational and is the extension
//! point for a future multi-candidate search.
//!
//! # KPI
//!
//! `ScheduleKpi` computes quality metrics for a finished schedule:
//! makespan, priority sum, fitness, and per-resource slot utilization.

mod greedy;
mod kpi;

pub use greedy::{GreedyScheduler, ScheduleOutcome, ScheduleRequest};
pub use kpi::{fitness, ScheduleKpi};
