//! Input validation for timetabling problems.
//!
//! Checks that the supplied records are well-formed and jointly satisfiable
//! before any search begins. Detects, in this order:
//! 1. Empty course, instructor, or room lists
//! 2. A missing time-frame bound
//! 3. Courses with an empty code, enrollment, or duration
//! 4. Courses no instructor declares
//! 5. Courses no room can seat

use crate::models::{Course, Instructor, Room, TimeFrame};
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No courses, instructors, or rooms were supplied.
    MissingInput,
    /// The time frame lacks a start or end.
    MissingTimeFrame,
    /// A course has an empty code.
    MissingCode,
    /// A course has a zero enrollment.
    InvalidEnrollment,
    /// A course has a zero duration.
    InvalidDuration,
    /// No instructor lists the course.
    NoInstructor,
    /// No room seats the course's enrollment.
    NoRoom,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates the inputs of a generation request.
///
/// Pure: identical inputs always yield identical error lists.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_input(
    courses: &[Course],
    instructors: &[Instructor],
    rooms: &[Room],
    time_frame: &TimeFrame,
) -> ValidationResult {
    use ValidationErrorKind::*;

    let mut errors = Vec::new();

    if courses.is_empty() {
        errors.push(ValidationError::new(MissingInput, "No courses provided."));
    }
    if instructors.is_empty() {
        errors.push(ValidationError::new(MissingInput, "No instructors provided."));
    }
    if rooms.is_empty() {
        errors.push(ValidationError::new(MissingInput, "No rooms provided."));
    }
    if !time_frame.is_specified() {
        errors.push(ValidationError::new(
            MissingTimeFrame,
            "Time frame (start and end) must be specified.",
        ));
    }

    for course in courses {
        if course.code.trim().is_empty() {
            errors.push(ValidationError::new(
                MissingCode,
                "A course is missing its code.",
            ));
        }
        if course.num_students == 0 {
            errors.push(ValidationError::new(
                InvalidEnrollment,
                format!("Course {} missing or invalid num_students.", course.code),
            ));
        }
        if course.duration == 0 {
            errors.push(ValidationError::new(
                InvalidDuration,
                format!("Course {} missing or invalid duration.", course.code),
            ));
        }
    }

    for course in courses {
        if !instructors.iter().any(|i| i.teaches(&course.code)) {
            errors.push(ValidationError::new(
                NoInstructor,
                format!("No instructor assigned for course {}.", course.code),
            ));
        }
    }

    for course in courses {
        if !rooms.iter().any(|r| r.fits(course)) {
            errors.push(ValidationError::new(
                NoRoom,
                format!(
                    "No room can fit course {} with {} students.",
                    course.code, course.num_students
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
