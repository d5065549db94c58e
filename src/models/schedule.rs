//! Schedule entries, candidate schedules, and the level-grouped timetable.

use super::resources::{Course, Instructor, Room, Weekday};
use crate::error::{Result, TimetableError};
use crate::fitness::{self, ConflictCell, Fitness};
use crate::slots::{TimeSlot, TimeSlots};
use std::collections::BTreeMap;

/// One occupied slot of one course.
///
/// A course spanning several slots is written as several entries that share
/// course, instructor, room, and day, and differ only in `time`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleEntry {
    pub course_code: String,
    pub course_name: String,
    pub level: u32,
    pub department: String,
    pub instructor: String,
    pub day: Weekday,
    pub time: TimeSlot,
    pub room: String,
    /// The course's full duration in minutes, repeated on every entry.
    pub duration: u32,
    pub num_students: u32,
}

impl ScheduleEntry {
    /// Builds the entry for `course` at one slot.
    pub fn new(
        course: &Course,
        instructor: &Instructor,
        room: &Room,
        day: Weekday,
        time: TimeSlot,
    ) -> Self {
        Self {
            course_code: course.code.clone(),
            course_name: course.name.clone(),
            level: course.level,
            department: course.department.clone(),
            instructor: instructor.name.clone(),
            day,
            time,
            room: room.name.clone(),
            duration: course.duration,
            num_students: course.num_students,
        }
    }
}

/// A complete candidate schedule: entries in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schedule has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleEntry> {
        self.entries.iter()
    }

    /// Removes every entry of the course with `code`, returning them.
    pub fn take_course(&mut self, code: &str) -> Vec<ScheduleEntry> {
        let (taken, kept) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|e| e.course_code == code);
        self.entries = kept;
        taken
    }

    /// Groups entries by level, preserving entry order within each level.
    pub fn into_timetable(self) -> Timetable {
        let mut levels: BTreeMap<String, Vec<ScheduleEntry>> = BTreeMap::new();
        for entry in self.entries {
            levels.entry(entry.level.to_string()).or_default().push(entry);
        }
        Timetable { levels }
    }
}

impl FromIterator<ScheduleEntry> for Schedule {
    fn from_iter<T: IntoIterator<Item = ScheduleEntry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduleEntry;
    type IntoIter = std::slice::Iter<'a, ScheduleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The generated timetable: level key (`"1"`, `"2"`, ...) to its entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Timetable {
    levels: BTreeMap<String, Vec<ScheduleEntry>>,
}

impl Timetable {
    /// Entries of one level, in stored order.
    pub fn level(&self, level: &str) -> Option<&[ScheduleEntry]> {
        self.levels.get(level).map(Vec::as_slice)
    }

    /// Level keys in ascending string order.
    pub fn levels(&self) -> impl Iterator<Item = &str> {
        self.levels.keys().map(String::as_str)
    }

    /// The underlying level map.
    pub fn as_map(&self) -> &BTreeMap<String, Vec<ScheduleEntry>> {
        &self.levels
    }

    /// All entries across levels.
    pub fn entries(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.levels.values().flatten()
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.levels.values().map(Vec::len).sum()
    }

    /// Whether the timetable holds no entries.
    pub fn is_empty(&self) -> bool {
        self.levels.values().all(Vec::is_empty)
    }

    /// Entries of one level ordered by weekday, then time.
    pub fn sorted_level(&self, level: &str) -> Vec<&ScheduleEntry> {
        let mut entries: Vec<&ScheduleEntry> = self
            .levels
            .get(level)
            .map(|v| v.iter().collect())
            .unwrap_or_default();
        entries.sort_by_key(|e| (e.day, e.time));
        entries
    }

    /// The entry occupying a cell of one level.
    pub fn cell(&self, level: &str, day: Weekday, time: TimeSlot) -> Option<&ScheduleEntry> {
        self.levels
            .get(level)?
            .iter()
            .find(|e| e.day == day && e.time == time)
    }

    /// Scores the timetable across all levels.
    pub fn fitness(&self) -> Fitness {
        fitness::evaluate(self.entries())
    }

    /// Cells held by more than one entry, across all levels.
    pub fn conflicted_cells(&self) -> Vec<ConflictCell> {
        fitness::conflicted_cells(self.entries())
    }

    /// Moves the block of the course occupying the `from` cell so that it
    /// starts at the `to` cell, possibly in another level.
    ///
    /// The block is every entry of the source level on `from.day` with the
    /// same course, instructor, and room; it keeps its length and slot order.
    /// Moved entries keep their course `level` field; only their grouping
    /// changes. The move is rejected, leaving the timetable unchanged, when
    /// the source cell is empty, the block would run past the last slot, or a
    /// target slot is already used by another entry of the target level or by
    /// the block's room or instructor in any level.
    pub fn move_block(
        &mut self,
        from: CellRef<'_>,
        to: CellRef<'_>,
        slots: &TimeSlots,
    ) -> Result<()> {
        let empty_cell = || TimetableError::EmptyCell {
            level: from.level.to_string(),
            day: from.day,
            time: from.time.to_string(),
        };

        let entries = self.levels.get(from.level).ok_or_else(empty_cell)?;
        let moved = entries
            .iter()
            .find(|e| e.day == from.day && e.time == from.time)
            .ok_or_else(empty_cell)?;

        let mut block: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                e.day == from.day
                    && e.course_code == moved.course_code
                    && e.instructor == moved.instructor
                    && e.room == moved.room
            })
            .map(|(i, _)| i)
            .collect();
        block.sort_by_key(|&i| (slots.index_of(entries[i].time), entries[i].time));

        let start = slots
            .index_of(to.time)
            .ok_or_else(|| TimetableError::UnknownSlot {
                slot: to.time.to_string(),
            })?;
        if start + block.len() > slots.len() {
            return Err(TimetableError::BlockOverrun {
                code: moved.course_code.clone(),
                time: to.time.to_string(),
            });
        }
        let targets = &slots.as_slice()[start..start + block.len()];

        for (lvl, list) in &self.levels {
            let source_level = lvl == from.level;
            let target_level = lvl == to.level;
            for (i, e) in list.iter().enumerate() {
                if source_level && block.contains(&i) {
                    continue;
                }
                if e.day != to.day || !targets.contains(&e.time) {
                    continue;
                }
                if target_level || e.room == moved.room || e.instructor == moved.instructor {
                    return Err(TimetableError::TargetOccupied {
                        code: moved.course_code.clone(),
                        day: to.day,
                        time: e.time.to_string(),
                    });
                }
            }
        }

        let Some(entries) = self.levels.get_mut(from.level) else {
            return Err(empty_cell());
        };
        for (&i, &time) in block.iter().zip(targets) {
            entries[i].day = to.day;
            entries[i].time = time;
        }

        if from.level != to.level {
            let mut kept = Vec::with_capacity(entries.len() - block.len());
            let mut taken = Vec::with_capacity(block.len());
            for (i, e) in std::mem::take(entries).into_iter().enumerate() {
                if block.contains(&i) {
                    taken.push((i, e));
                } else {
                    kept.push(e);
                }
            }
            taken.sort_by_key(|(i, _)| block.iter().position(|b| b == i));
            if kept.is_empty() {
                self.levels.remove(from.level);
            } else {
                *entries = kept;
            }
            self.levels
                .entry(to.level.to_string())
                .or_default()
                .extend(taken.into_iter().map(|(_, e)| e));
        }
        Ok(())
    }
}

/// A (level, day, time) cell of the timetable grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef<'a> {
    pub level: &'a str,
    pub day: Weekday,
    pub time: TimeSlot,
}

impl<'a> CellRef<'a> {
    /// Creates a cell reference.
    pub fn new(level: &'a str, day: Weekday, time: TimeSlot) -> Self {
        Self { level, day, time }
    }
}
