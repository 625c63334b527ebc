//! Scheduling domain models.
//!
//! Core data types for describing a scheduling request and its solution.
//! Time is discrete: a schedule places each task at an integer start slot
//! and the task occupies `[time_slot, time_slot + duration)` on its
//! resource. Field names on the wire follow the JSON contract shared with
//! the orchestrator (`taskId`, `capacityPerSlot`, `bestSchedule`, …).
//!
//! # Domain Mappings
//!
//! | slotplan | Timetabling | Manufacturing | Operations |
//! |----------|-------------|---------------|------------|
//! | Task | Class Session | Job | Work Order |
//! | Resource | Room | Machine | Crew |
//! | Time slot | Period | Shift Unit | Hour |
//! | Schedule | Timetable | Production Plan | Roster |

mod resource;
mod schedule;
mod task;

pub use resource::Resource;
pub use schedule::{Assignment, Schedule};
pub use task::Task;
