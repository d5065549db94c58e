//! Population search over candidate schedules.
//!
//! Builds an initial population of independently constructed schedules, then
//! repeatedly ranks it by fitness, keeps the better half, and duplicates it,
//! stopping early once a candidate is conflict-free.
//!
//! # Key Types
//!
//! - [`TimetableProblem`]: the records and constraints of one request
//! - [`GeneratorConfig`]: population size, generation budget, attempts,
//!   optional mutation, parallelism, seed
//! - [`SearchRunner`]: executes the search with optional cancellation
//! - [`TimetableResult`]: best timetable, score, conflicts, and run stats
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Burke & Petrovic (2002), "Recent research directions in automated
//!   timetabling"

mod config;
mod runner;
mod types;

pub use config::GeneratorConfig;
pub use runner::{generate, SearchRunner};
pub use types::{
    TimetableProblem, TimetableResult, GENERATION_FAILED, INVALID_CONFIG, INVALID_TIME_FRAME,
    VALIDATION_FAILED,
};
