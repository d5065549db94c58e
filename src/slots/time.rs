//! Clock times on the `HH:MM` grid.

use crate::error::{Result, TimetableError};
use std::fmt;
use std::str::FromStr;

/// A time of day with minute resolution, rendered as `HH:MM`.
///
/// Ordering follows the clock, so slots sort chronologically.
///
/// # Examples
///
/// ```
/// use u_timetable::slots::TimeSlot;
///
/// let t: TimeSlot = "08:00".parse().unwrap();
/// assert_eq!(t.to_string(), "08:00");
/// assert_eq!(t.plus_minutes(60).unwrap().to_string(), "09:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct TimeSlot {
    minutes: u16,
}

/// Minutes in a day.
const DAY_MINUTES: u16 = 24 * 60;

impl TimeSlot {
    /// Creates a time from hour and minute components.
    ///
    /// Returns `None` when either component is out of range.
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self {
                minutes: hour * 60 + minute,
            })
        } else {
            None
        }
    }

    /// Parses an `HH:MM` string. The hour may have one or two digits.
    pub fn parse(value: &str) -> Result<Self> {
        let err = || TimetableError::Format {
            value: value.to_string(),
        };

        let (h, m) = value.trim().split_once(':').ok_or_else(err)?;
        let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !digits(h) || h.len() > 2 || !digits(m) || m.len() != 2 {
            return Err(err());
        }

        let hour: u16 = h.parse().map_err(|_| err())?;
        let minute: u16 = m.parse().map_err(|_| err())?;
        Self::from_hm(hour, minute).ok_or_else(err)
    }

    /// Hour component (0–23).
    pub fn hour(self) -> u16 {
        self.minutes / 60
    }

    /// Minute component (0–59).
    pub fn minute(self) -> u16 {
        self.minutes % 60
    }

    /// Minutes since midnight.
    pub fn minutes_since_midnight(self) -> u16 {
        self.minutes
    }

    /// Returns the time `minutes` later, or `None` past the end of the day.
    pub fn plus_minutes(self, minutes: u16) -> Option<Self> {
        let total = self.minutes.checked_add(minutes)?;
        (total < DAY_MINUTES).then_some(Self { minutes: total })
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeSlot {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = TimetableError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let t = TimeSlot::parse("08:00").unwrap();
        assert_eq!(t.hour(), 8);
        assert_eq!(t.minute(), 0);
        assert_eq!(t.to_string(), "08:00");

        let t = TimeSlot::parse("17:45").unwrap();
        assert_eq!(t.minutes_since_midnight(), 17 * 60 + 45);
        assert_eq!(t.to_string(), "17:45");
    }

    #[test]
    fn test_single_digit_hour_is_normalized() {
        let t: TimeSlot = "9:30".parse().unwrap();
        assert_eq!(t.to_string(), "09:30");
    }

    #[test]
    fn test_malformed_times_rejected() {
        for bad in ["", "8", "08:0", "24:00", "12:60", "ab:cd", "08-00", "123:00", " : "] {
            assert!(
                matches!(TimeSlot::parse(bad), Err(TimetableError::Format { .. })),
                "expected format error for {bad:?}"
            );
        }
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = TimeSlot::parse("08:00").unwrap();
        let b = TimeSlot::parse("10:00").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_plus_minutes_stops_at_midnight() {
        let t = TimeSlot::parse("23:00").unwrap();
        assert_eq!(t.plus_minutes(59).unwrap().to_string(), "23:59");
        assert!(t.plus_minutes(60).is_none());
    }
}
