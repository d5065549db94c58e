//! Course timetable generation.
//!
//! Given courses, instructors, rooms, and a daily time window, produces a
//! weekly timetable that assigns every course an instructor, a room large
//! enough for its enrollment, a day, and a contiguous run of hour-long slots,
//! avoiding room and instructor double-bookings.
//!
//! - **Slots** ([`slots`]): the ordered hour-long slot sequence derived from
//!   the time window and optional break.
//! - **Models** ([`models`]): input records and the generated timetable,
//!   including block moves for interactive editing.
//! - **Validation** ([`validation`]): input checks that collect every problem
//!   before any search starts.
//! - **Fitness** ([`fitness`]): double-booking penalties and conflicted cells.
//! - **Builder** ([`builder`]): randomized construction of one complete
//!   candidate schedule.
//! - **Search** ([`search`]): the population search that picks the best
//!   candidate.
//!
//! # Quick Start
//!
//! ```
//! use u_timetable::models::{Constraints, Course, Instructor, Room};
//! use u_timetable::search::{GeneratorConfig, SearchRunner, TimetableProblem};
//!
//! let courses = vec![Course::new("CS101", "Intro", 1, "CS", 30, 125)];
//! let instructors = vec![Instructor::new("A", "CS").with_courses(["CS101"])];
//! let rooms = vec![Room::new("R1", 40)];
//! let constraints = Constraints::default().with_break("12:00");
//!
//! let problem = TimetableProblem::new(&courses, &instructors, &rooms, &constraints);
//! let result = SearchRunner::run(&problem, &GeneratorConfig::default().with_seed(1));
//!
//! assert_eq!(result.score, 100);
//! assert_eq!(result.schedule.level("1").map(<[_]>::len), Some(3));
//! ```
//!
//! # Features
//!
//! - `parallel`: builds the initial population with rayon.
//! - `serde`: JSON-compatible (de)serialization of records and results.

pub mod builder;
pub mod error;
pub mod fitness;
pub mod models;
pub mod search;
pub mod slots;
pub mod validation;

pub use error::{Result, TimetableError};
pub use search::generate;
