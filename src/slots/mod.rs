//! Time-slot model.
//!
//! A run works on a fixed, ordered sequence of hour-long slots derived once
//! from the configured time window and optional break.
//!
//! - [`TimeSlot`]: an `HH:MM` clock time
//! - [`TimeSlots`]: the ordered slot sequence, with the index arithmetic the
//!   builder and conflict checker rely on

mod sequence;
mod time;

pub use sequence::{TimeSlots, SLOT_MINUTES};
pub use time::TimeSlot;
