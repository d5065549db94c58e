//! Domain records.
//!
//! Plain input records supplied by the caller ([`Course`], [`Instructor`],
//! [`Room`], [`Constraints`]) and the structures the engine produces
//! ([`ScheduleEntry`], [`Schedule`], [`Timetable`]).

mod constraints;
mod resources;
mod schedule;

pub use constraints::{Constraints, TimeFrame};
pub use resources::{Course, Instructor, Room, Weekday};
pub use schedule::{CellRef, Schedule, ScheduleEntry, Timetable};
