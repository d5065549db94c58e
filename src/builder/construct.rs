//! Randomized construction of one candidate schedule.

use super::conflict::{Occupancy, Placement};
use super::selector::ResourceSelector;
use crate::error::{Result, TimetableError};
use crate::models::{Course, Instructor, Room, Schedule, ScheduleEntry};
use crate::slots::TimeSlots;
use log::{debug, warn};
use rand::seq::IndexedRandom;
use rand::Rng;

/// Default number of placement attempts per course.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Builds complete candidate schedules.
///
/// Courses are placed one after another, each independently: the builder
/// picks the course's instructor and room, then draws a random day from the
/// instructor's availability and a random start among the slots where the
/// whole course fits, retrying until the placement avoids every entry
/// already written. A course that finds no free placement within its attempt
/// budget fails the whole build.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use u_timetable::builder::ScheduleBuilder;
/// use u_timetable::models::{Course, Instructor, Room};
/// use u_timetable::slots::TimeSlots;
///
/// let courses = vec![Course::new("CS101", "Intro", 1, "CS", 30, 120)];
/// let instructors = vec![Instructor::new("A", "CS").with_courses(["CS101"])];
/// let rooms = vec![Room::new("R1", 40)];
/// let slots = TimeSlots::parse_window("08:00", "18:00", None).unwrap();
///
/// let builder = ScheduleBuilder::new(&courses, &instructors, &rooms, &slots);
/// let schedule = builder.build(&mut StdRng::seed_from_u64(42)).unwrap();
/// assert_eq!(schedule.len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScheduleBuilder<'a> {
    courses: &'a [Course],
    selector: ResourceSelector<'a>,
    slots: &'a TimeSlots,
    max_attempts: usize,
}

impl<'a> ScheduleBuilder<'a> {
    /// Creates a builder with [`DEFAULT_MAX_ATTEMPTS`] attempts per course.
    pub fn new(
        courses: &'a [Course],
        instructors: &'a [Instructor],
        rooms: &'a [Room],
        slots: &'a TimeSlots,
    ) -> Self {
        Self {
            courses,
            selector: ResourceSelector::new(instructors, rooms),
            slots,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the number of placement attempts per course.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// The courses this builder places.
    pub fn courses(&self) -> &'a [Course] {
        self.courses
    }

    /// The slot sequence placements are drawn from.
    pub fn slots(&self) -> &'a TimeSlots {
        self.slots
    }

    /// Builds one complete candidate.
    ///
    /// # Errors
    /// Fails on the first course that cannot be placed, naming it.
    pub fn build<R: Rng>(&self, rng: &mut R) -> Result<Schedule> {
        let mut schedule = Schedule::new();
        let mut occupancy = Occupancy::new();

        for course in self.courses {
            for entry in self.place_course(course, &occupancy, rng)? {
                occupancy.occupy(&entry);
                schedule.push(entry);
            }
        }

        Ok(schedule)
    }

    /// Re-places one course against the rest of `schedule`.
    ///
    /// On failure the course's previous entries are restored and the error
    /// is returned.
    pub fn reroll_course<R: Rng>(
        &self,
        schedule: &mut Schedule,
        course: &Course,
        rng: &mut R,
    ) -> Result<()> {
        let previous = schedule.take_course(&course.code);
        let occupancy = Occupancy::from_entries(schedule.iter());

        match self.place_course(course, &occupancy, rng) {
            Ok(entries) => {
                entries.into_iter().for_each(|e| schedule.push(e));
                Ok(())
            }
            Err(err) => {
                previous.into_iter().for_each(|e| schedule.push(e));
                Err(err)
            }
        }
    }

    /// Finds a collision-free placement for `course` and returns one entry
    /// per occupied slot.
    fn place_course<R: Rng>(
        &self,
        course: &Course,
        occupancy: &Occupancy,
        rng: &mut R,
    ) -> Result<Vec<ScheduleEntry>> {
        let pick = self
            .selector
            .select_instructor(course, rng)
            .ok_or_else(|| TimetableError::NoInstructor {
                code: course.code.clone(),
            })?;
        if pick.is_fallback() {
            warn!(
                "no instructor declares {}; assigning {} at random",
                course.code,
                pick.instructor().name
            );
        }
        let instructor = pick.instructor();
        let days = ResourceSelector::available_days(instructor);

        let room = self
            .selector
            .select_room(course, rng)
            .ok_or_else(|| TimetableError::NoRoom {
                code: course.code.clone(),
            })?;

        let needed = TimeSlots::slots_needed(course.duration);
        let starts = self.slots.candidate_starts(needed);

        for _ in 0..self.max_attempts {
            let Some(&day) = days.choose(rng) else {
                debug!("{} has no available days for {}", instructor.name, course.code);
                break;
            };
            let Some(&start) = starts.choose(rng) else {
                debug!(
                    "No possible start times for {} on {} with duration {}",
                    course.code, day, course.duration
                );
                break;
            };
            if self.slots.break_time() == Some(start) {
                continue;
            }

            let placement = Placement {
                day,
                start,
                room: &room.name,
                instructor: &instructor.name,
                duration: course.duration,
            };
            if occupancy.has_conflict(self.slots, &placement)? {
                continue;
            }

            let entries = self
                .slots
                .occupied_indices(start, course.duration)?
                .filter_map(|idx| self.slots.get(idx))
                .map(|time| ScheduleEntry::new(course, instructor, room, day, time))
                .collect();
            return Ok(entries);
        }

        Err(TimetableError::PlacementExhausted {
            code: course.code.clone(),
        })
    }
}
