//! Courses, instructors, rooms, and weekdays.

use std::fmt;

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Monday through Friday, the default teaching week.
    pub const WORKWEEK: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// English day name.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A course to be placed in the timetable.
///
/// A course occupies `ceil(duration / 60)` consecutive slots on one day, in
/// one room, with one instructor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Course {
    /// Unique course code, e.g. `"CS101"`.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Academic level; the output timetable is grouped by it.
    pub level: u32,
    /// Owning department.
    pub department: String,
    /// Enrollment count.
    pub num_students: u32,
    /// Duration in minutes.
    pub duration: u32,
}

impl Course {
    /// Creates a course.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        level: u32,
        department: impl Into<String>,
        num_students: u32,
        duration: u32,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            level,
            department: department.into(),
            num_students,
            duration,
        }
    }
}

/// An instructor and the courses they may teach.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instructor {
    /// Unique name.
    pub name: String,
    /// Department.
    pub department: String,
    /// Days the instructor can teach. `None` means the whole work week.
    #[cfg_attr(feature = "serde", serde(default))]
    pub available_days: Option<Vec<Weekday>>,
    /// Codes of the courses this instructor may teach.
    #[cfg_attr(feature = "serde", serde(default))]
    pub courses: Vec<String>,
}

impl Instructor {
    /// Creates an instructor with no declared courses and full-week availability.
    pub fn new(name: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
            available_days: None,
            courses: Vec::new(),
        }
    }

    /// Sets the course codes this instructor may teach.
    pub fn with_courses<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.courses = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts the days this instructor is available.
    pub fn with_available_days(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.available_days = Some(days.into_iter().collect());
        self
    }

    /// Whether the instructor lists `code` among their courses.
    pub fn teaches(&self, code: &str) -> bool {
        self.courses.iter().any(|c| c == code)
    }

    /// Declared available days, or Monday–Friday when none are declared.
    pub fn available_days(&self) -> &[Weekday] {
        self.available_days
            .as_deref()
            .unwrap_or(&Weekday::WORKWEEK)
    }
}

/// A teaching room.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    /// Unique name.
    pub name: String,
    /// Seating capacity.
    pub capacity: u32,
}

impl Room {
    /// Creates a room.
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }

    /// Whether the room seats every student of `course`.
    pub fn fits(&self, course: &Course) -> bool {
        self.capacity >= course.num_students
    }
}
