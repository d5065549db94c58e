//! The ordered sequence of bookable slots for a run.

use super::time::TimeSlot;
use crate::error::{Result, TimetableError};
use crate::models::Constraints;
use std::ops::Range;

/// Length of one slot in minutes.
pub const SLOT_MINUTES: u32 = 60;

/// Ordered, hour-spaced bookable slots derived from a time window.
///
/// Slots start at the window start and advance one hour at a time while the
/// whole hour still fits before the window end. A break instant that lands
/// exactly on a generated boundary is left out of the sequence.
///
/// # Examples
///
/// ```
/// use u_timetable::slots::{TimeSlot, TimeSlots};
///
/// let slots = TimeSlots::parse_window("08:00", "12:00", Some("09:00")).unwrap();
/// let labels: Vec<String> = slots.iter().map(|s| s.to_string()).collect();
/// assert_eq!(labels, ["08:00", "10:00", "11:00"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlots {
    slots: Vec<TimeSlot>,
    break_time: Option<TimeSlot>,
}

impl TimeSlots {
    /// Builds the slot sequence for `[start, end)`.
    ///
    /// An `end` that is not at least one hour after `start` yields an empty
    /// sequence.
    pub fn new(start: TimeSlot, end: TimeSlot, break_time: Option<TimeSlot>) -> Self {
        let end = end.minutes_since_midnight() as u32;
        let mut slots = Vec::new();
        let mut current = Some(start);

        while let Some(slot) = current {
            if slot.minutes_since_midnight() as u32 + SLOT_MINUTES > end {
                break;
            }
            if break_time != Some(slot) {
                slots.push(slot);
            }
            current = slot.plus_minutes(SLOT_MINUTES as u16);
        }

        Self { slots, break_time }
    }

    /// Parses the window bounds and optional break, then builds the sequence.
    ///
    /// A blank break means no break.
    pub fn parse_window(start: &str, end: &str, break_time: Option<&str>) -> Result<Self> {
        let start = TimeSlot::parse(start)?;
        let end = TimeSlot::parse(end)?;
        let break_time = break_time
            .filter(|b| !b.trim().is_empty())
            .map(TimeSlot::parse)
            .transpose()?;
        Ok(Self::new(start, end, break_time))
    }

    /// Builds the sequence from caller-supplied constraints.
    pub fn from_constraints(constraints: &Constraints) -> Result<Self> {
        Self::parse_window(
            &constraints.time_frame.start,
            &constraints.time_frame.end,
            constraints.break_time.as_deref(),
        )
    }

    /// Number of bookable slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot fits in the window.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The slot at `index`.
    pub fn get(&self, index: usize) -> Option<TimeSlot> {
        self.slots.get(index).copied()
    }

    /// Position of `slot` in the sequence.
    pub fn index_of(&self, slot: TimeSlot) -> Option<usize> {
        self.slots.iter().position(|&s| s == slot)
    }

    /// Iterates slots in order.
    pub fn iter(&self) -> impl Iterator<Item = TimeSlot> + '_ {
        self.slots.iter().copied()
    }

    /// All slots as a slice.
    pub fn as_slice(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// The configured break instant, if any.
    pub fn break_time(&self) -> Option<TimeSlot> {
        self.break_time
    }

    /// Number of slots a course of `duration_minutes` occupies (rounded up).
    pub fn slots_needed(duration_minutes: u32) -> usize {
        duration_minutes.div_ceil(SLOT_MINUTES) as usize
    }

    /// Start slots from which a block of `slots_needed` slots fits entirely.
    pub fn candidate_starts(&self, slots_needed: usize) -> &[TimeSlot] {
        let count = (self.slots.len() + 1)
            .saturating_sub(slots_needed)
            .min(self.slots.len());
        &self.slots[..count]
    }

    /// Indices of the slots a placement starting at `start` occupies.
    ///
    /// The range is clipped to the end of the sequence, so a block that would
    /// overrun the window is truncated to the remaining slots.
    pub fn occupied_indices(&self, start: TimeSlot, duration_minutes: u32) -> Result<Range<usize>> {
        let first = self
            .index_of(start)
            .ok_or_else(|| TimetableError::UnknownSlot {
                slot: start.to_string(),
            })?;
        let last = (first + Self::slots_needed(duration_minutes)).min(self.slots.len());
        Ok(first..last)
    }
}
