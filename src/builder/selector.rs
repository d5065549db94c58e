//! Per-course instructor and room selection.

use crate::models::{Course, Instructor, Room, Weekday};
use rand::seq::IndexedRandom;
use rand::Rng;

/// How an instructor was chosen for a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructorPick<'a> {
    /// The first instructor who lists the course.
    Qualified(&'a Instructor),
    /// Nobody lists the course; a uniformly random instructor stands in.
    ///
    /// Validated input never takes this path.
    Fallback(&'a Instructor),
}

impl<'a> InstructorPick<'a> {
    /// The chosen instructor.
    pub fn instructor(self) -> &'a Instructor {
        match self {
            InstructorPick::Qualified(i) | InstructorPick::Fallback(i) => i,
        }
    }

    /// Whether the fallback policy was used.
    pub fn is_fallback(self) -> bool {
        matches!(self, InstructorPick::Fallback(_))
    }
}

/// Picks the instructor and room for each course.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSelector<'a> {
    instructors: &'a [Instructor],
    rooms: &'a [Room],
}

impl<'a> ResourceSelector<'a> {
    /// Creates a selector over the given resources.
    pub fn new(instructors: &'a [Instructor], rooms: &'a [Room]) -> Self {
        Self { instructors, rooms }
    }

    /// Returns the first instructor declaring `course`, falling back to a
    /// random instructor. `None` only when there are no instructors at all.
    pub fn select_instructor<R: Rng>(
        &self,
        course: &Course,
        rng: &mut R,
    ) -> Option<InstructorPick<'a>> {
        match self.instructors.iter().find(|i| i.teaches(&course.code)) {
            Some(i) => Some(InstructorPick::Qualified(i)),
            None => self.instructors.choose(rng).map(InstructorPick::Fallback),
        }
    }

    /// Rooms whose capacity covers the course's enrollment, in input order.
    pub fn qualifying_rooms(&self, course: &Course) -> Vec<&'a Room> {
        self.rooms.iter().filter(|r| r.fits(course)).collect()
    }

    /// A uniformly random qualifying room, or `None` if no room is big enough.
    pub fn select_room<R: Rng>(&self, course: &Course, rng: &mut R) -> Option<&'a Room> {
        self.qualifying_rooms(course).choose(rng).copied()
    }

    /// Days `instructor` can teach: declared days, or Monday–Friday.
    pub fn available_days(instructor: &Instructor) -> &[Weekday] {
        instructor.available_days()
    }
}
