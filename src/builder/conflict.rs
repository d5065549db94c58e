//! Collision checks for a proposed placement.
//!
//! A placement collides when any slot it would occupy on its day already
//! holds an entry using the same room or the same instructor. Two
//! equivalent checks are provided: [`has_conflict`] scans the entries, and
//! [`Occupancy`] answers the same question from an index keyed by
//! (day, time).

use crate::error::Result;
use crate::models::{ScheduleEntry, Weekday};
use crate::slots::{TimeSlot, TimeSlots};
use std::collections::{HashMap, HashSet};

/// A proposed (day, start, room, instructor) assignment for one course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<'p> {
    pub day: Weekday,
    pub start: TimeSlot,
    pub room: &'p str,
    pub instructor: &'p str,
    /// Course duration in minutes.
    pub duration: u32,
}

/// Whether `placement` collides with any of `entries`.
///
/// # Errors
/// [`TimetableError::UnknownSlot`](crate::error::TimetableError::UnknownSlot)
/// if the start is not in `slots`.
pub fn has_conflict(
    entries: &[ScheduleEntry],
    slots: &TimeSlots,
    placement: &Placement<'_>,
) -> Result<bool> {
    for idx in slots.occupied_indices(placement.start, placement.duration)? {
        let Some(time) = slots.get(idx) else {
            continue;
        };
        let clash = entries.iter().any(|e| {
            e.day == placement.day
                && e.time == time
                && (e.room == placement.room || e.instructor == placement.instructor)
        });
        if clash {
            return Ok(true);
        }
    }
    Ok(false)
}

#[derive(Debug, Clone, Default)]
struct CellUse {
    rooms: HashSet<String>,
    instructors: HashSet<String>,
}

/// Rooms and instructors in use per (day, time) cell.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    cells: HashMap<(Weekday, TimeSlot), CellUse>,
}

impl Occupancy {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes existing entries.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a ScheduleEntry>) -> Self {
        let mut occupancy = Self::new();
        for entry in entries {
            occupancy.occupy(entry);
        }
        occupancy
    }

    /// Marks the entry's room and instructor as busy at its cell.
    pub fn occupy(&mut self, entry: &ScheduleEntry) {
        let cell = self.cells.entry((entry.day, entry.time)).or_default();
        cell.rooms.insert(entry.room.clone());
        cell.instructors.insert(entry.instructor.clone());
    }

    /// Whether the room is busy at (day, time).
    pub fn room_busy(&self, day: Weekday, time: TimeSlot, room: &str) -> bool {
        self.cells
            .get(&(day, time))
            .is_some_and(|c| c.rooms.contains(room))
    }

    /// Whether the instructor is busy at (day, time).
    pub fn instructor_busy(&self, day: Weekday, time: TimeSlot, instructor: &str) -> bool {
        self.cells
            .get(&(day, time))
            .is_some_and(|c| c.instructors.contains(instructor))
    }

    /// Same answer as [`has_conflict`] over the indexed entries.
    pub fn has_conflict(&self, slots: &TimeSlots, placement: &Placement<'_>) -> Result<bool> {
        for idx in slots.occupied_indices(placement.start, placement.duration)? {
            let Some(time) = slots.get(idx) else {
                continue;
            };
            if self.room_busy(placement.day, time, placement.room)
                || self.instructor_busy(placement.day, time, placement.instructor)
            {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
