//! # Core Types
//!
//! The shared vocabulary of the workspace: the `HotelRecord` row type every other
//! crate consumes, the percentage and date parsing rules applied to its raw
//! fields, and the calendar helpers used to order weekday groupings.
//!
//! This crate has no knowledge of files, configuration or reporting.

pub mod calendar;
pub mod error;
pub mod record;

// Re-export the core types to provide a clean public API.
pub use calendar::{WEEKDAYS, parse_date, weekday_index};
pub use error::CoreError;
pub use record::{HotelRecord, parse_percentage};
