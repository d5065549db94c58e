//! Schedule scoring.
//!
//! A schedule starts at [`PERFECT_SCORE`] and loses [`CONFLICT_PENALTY`] for
//! every double-booking: an entry whose (day, time, room) or
//! (day, time, instructor) was already taken by an earlier entry. The first
//! holder of a cell is never penalized; every later one is, individually.
//! Rooms and instructors live in separate key spaces, so a room and an
//! instructor that happen to share a name never collide.

use crate::models::{ScheduleEntry, Weekday};
use crate::slots::TimeSlot;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Score of a schedule without double-bookings.
pub const PERFECT_SCORE: i32 = 100;

/// Deduction per double-booking.
pub const CONFLICT_PENALTY: i32 = 10;

/// Score and conflict report of a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fitness {
    /// `100 - 10 * conflicts.len()`; may go negative.
    pub score: i32,
    /// One message per penalized entry, in schedule order.
    pub conflicts: Vec<String>,
}

impl Fitness {
    /// Whether the schedule is free of double-bookings.
    pub fn is_perfect(&self) -> bool {
        self.score >= PERFECT_SCORE
    }
}

/// The resource a double-booking is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ResourceKind {
    Room,
    Instructor,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Room => f.write_str("room"),
            ResourceKind::Instructor => f.write_str("instructor"),
        }
    }
}

/// A (day, time, resource) cell held by more than one entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConflictCell {
    pub day: Weekday,
    pub time: TimeSlot,
    pub kind: ResourceKind,
    pub name: String,
}

impl fmt::Display for ConflictCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}-{}", self.day, self.time, self.kind, self.name)
    }
}

/// Scores `entries` in iteration order.
///
/// # Examples
///
/// ```
/// use u_timetable::fitness;
/// use u_timetable::models::Schedule;
///
/// let report = fitness::evaluate(&Schedule::new());
/// assert_eq!(report.score, 100);
/// assert!(report.conflicts.is_empty());
/// ```
pub fn evaluate<'a, I>(entries: I) -> Fitness
where
    I: IntoIterator<Item = &'a ScheduleEntry>,
{
    let mut score = PERFECT_SCORE;
    let mut conflicts = Vec::new();
    let mut rooms: HashSet<(Weekday, TimeSlot, &str)> = HashSet::new();
    let mut instructors: HashSet<(Weekday, TimeSlot, &str)> = HashSet::new();

    for entry in entries {
        if !rooms.insert((entry.day, entry.time, entry.room.as_str())) {
            score -= CONFLICT_PENALTY;
            conflicts.push(format!(
                "Room {} double-booked at {} {}",
                entry.room, entry.day, entry.time
            ));
        }
        if !instructors.insert((entry.day, entry.time, entry.instructor.as_str())) {
            score -= CONFLICT_PENALTY;
            conflicts.push(format!(
                "Instructor {} double-booked at {} {}",
                entry.instructor, entry.day, entry.time
            ));
        }
    }

    Fitness { score, conflicts }
}

/// Every cell held by more than one entry, sorted by day, time, kind, name.
pub fn conflicted_cells<'a, I>(entries: I) -> Vec<ConflictCell>
where
    I: IntoIterator<Item = &'a ScheduleEntry>,
{
    let mut counts: HashMap<(Weekday, TimeSlot, ResourceKind, &str), usize> = HashMap::new();
    for e in entries {
        *counts
            .entry((e.day, e.time, ResourceKind::Room, e.room.as_str()))
            .or_default() += 1;
        *counts
            .entry((e.day, e.time, ResourceKind::Instructor, e.instructor.as_str()))
            .or_default() += 1;
    }

    let mut cells: Vec<ConflictCell> = counts
        .into_iter()
        .filter(|&(_, n)| n > 1)
        .map(|((day, time, kind, name), _)| ConflictCell {
            day,
            time,
            kind,
            name: name.to_string(),
        })
        .collect();
    cells.sort();
    cells
}
