//! Error types for timetable construction and editing.

use crate::models::Weekday;
use thiserror::Error;

/// Result type for fallible timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Errors raised by the slot model, the schedule builder, and timetable edits.
///
/// Validation problems are not represented here: they are collected as a list
/// of [`ValidationError`](crate::validation::ValidationError)s instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimetableError {
    /// A time string is not of the form `HH:MM`.
    #[error("invalid time '{value}': expected HH:MM")]
    Format { value: String },

    /// A start time is not a member of the slot sequence.
    #[error("time slot {slot} is not part of the slot sequence")]
    UnknownSlot { slot: String },

    /// A course could not be placed within its attempt budget.
    #[error("Could not schedule course {code} (no available slot/room/instructor).")]
    PlacementExhausted { code: String },

    /// No instructor exists to teach the course, not even as a fallback.
    #[error("No instructor available for course {code}.")]
    NoInstructor { code: String },

    /// No room is large enough for the course.
    #[error("No room can fit course {code}.")]
    NoRoom { code: String },

    /// A timetable edit referenced an empty cell.
    #[error("No entry at level {level} on {day} {time}.")]
    EmptyCell {
        level: String,
        day: Weekday,
        time: String,
    },

    /// A moved block would run past the last slot.
    #[error("Block of {code} does not fit when starting at {time}.")]
    BlockOverrun { code: String, time: String },

    /// A moved block would collide with an existing entry.
    #[error("Cannot move {code}: {day} {time} is already taken.")]
    TargetOccupied {
        code: String,
        day: Weekday,
        time: String,
    },
}
