//! Caller-supplied scheduling constraints.

/// The daily teaching window, as `HH:MM` strings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeFrame {
    /// First bookable instant.
    pub start: String,
    /// Instant by which the last slot must have ended.
    pub end: String,
}

impl Default for TimeFrame {
    fn default() -> Self {
        Self {
            start: "08:00".into(),
            end: "18:00".into(),
        }
    }
}

impl TimeFrame {
    /// Creates a time frame.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Whether both bounds are present.
    pub fn is_specified(&self) -> bool {
        !self.start.trim().is_empty() && !self.end.trim().is_empty()
    }
}

/// Options recognised when generating a timetable.
///
/// # Defaults
///
/// ```
/// use u_timetable::models::Constraints;
///
/// let c = Constraints::default();
/// assert_eq!(c.time_frame.start, "08:00");
/// assert_eq!(c.time_frame.end, "18:00");
/// assert!(c.break_time.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraints {
    /// Daily teaching window.
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_frame: TimeFrame,

    /// A break instant that no slot may start at, e.g. `"12:00"`.
    #[cfg_attr(feature = "serde", serde(rename = "break", default))]
    pub break_time: Option<String>,
}

impl Constraints {
    /// Sets the teaching window.
    pub fn with_time_frame(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.time_frame = TimeFrame::new(start, end);
        self
    }

    /// Sets the break instant.
    pub fn with_break(mut self, time: impl Into<String>) -> Self {
        self.break_time = Some(time.into());
        self
    }
}
