//! Candidate schedule construction.
//!
//! # Key Types
//!
//! - [`ResourceSelector`]: picks a course's instructor (first qualified, or a
//!   random [`InstructorPick::Fallback`]) and a capacity-sufficient room
//! - [`Placement`], [`has_conflict`], [`Occupancy`]: collision checks for a
//!   proposed (day, start, room, instructor)
//! - [`ScheduleBuilder`]: builds one complete candidate with bounded random
//!   retries per course

mod conflict;
mod construct;
mod selector;

pub use conflict::{has_conflict, Occupancy, Placement};
pub use construct::{ScheduleBuilder, DEFAULT_MAX_ATTEMPTS};
pub use selector::{InstructorPick, ResourceSelector};
