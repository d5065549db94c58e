//! Problem and result types of a generation request.

use crate::models::{Constraints, Course, Instructor, Room, Timetable};
use crate::validation::{validate_input, ValidationResult};

/// Error marker set when input validation fails.
pub const VALIDATION_FAILED: &str = "Validation failed";

/// Error marker set when the time frame or break cannot be parsed.
pub const INVALID_TIME_FRAME: &str = "Invalid time frame";

/// Error marker set when the search configuration is rejected.
pub const INVALID_CONFIG: &str = "Invalid configuration";

/// Error marker set when a candidate build fails.
pub const GENERATION_FAILED: &str = "Generation failed";

/// A generation request: the records to schedule and the constraints.
///
/// Borrowed for the duration of one run and never modified.
#[derive(Debug, Clone, Copy)]
pub struct TimetableProblem<'a> {
    pub courses: &'a [Course],
    pub instructors: &'a [Instructor],
    pub rooms: &'a [Room],
    pub constraints: &'a Constraints,
}

impl<'a> TimetableProblem<'a> {
    /// Creates a problem over caller-owned records.
    pub fn new(
        courses: &'a [Course],
        instructors: &'a [Instructor],
        rooms: &'a [Room],
        constraints: &'a Constraints,
    ) -> Self {
        Self {
            courses,
            instructors,
            rooms,
            constraints,
        }
    }

    /// Runs input validation.
    pub fn validate(&self) -> ValidationResult {
        validate_input(
            self.courses,
            self.instructors,
            self.rooms,
            &self.constraints.time_frame,
        )
    }
}

/// Outcome of a generation request.
///
/// Success and failure share this shape. On failure `schedule` is empty,
/// `score` is 0, `conflicts` holds the reasons, and `error` names the stage
/// that failed. On success `error` is `None` and `conflicts` lists the
/// double-bookings left in the best candidate, if any.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimetableResult {
    /// Best candidate grouped by course level.
    pub schedule: Timetable,

    /// Fitness score of the best candidate.
    pub score: i32,

    /// Residual double-bookings, or the failure reasons.
    pub conflicts: Vec<String>,

    /// Failure marker, absent on success.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub error: Option<String>,

    /// Generations executed.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub generations: usize,

    /// Whether a candidate reached the perfect score.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub converged: bool,

    /// Whether the run was cancelled externally.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub cancelled: bool,

    /// Best score after each generation.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub score_history: Vec<i32>,
}

impl TimetableResult {
    /// A failure result with the given reasons and marker.
    pub fn failure(conflicts: Vec<String>, error: &str) -> Self {
        Self {
            conflicts,
            error: Some(error.to_string()),
            ..Self::default()
        }
    }

    /// Whether the request failed before or during construction.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
