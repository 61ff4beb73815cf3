//! # Dataset
//!
//! The application's data-access layer: reads the pricing/occupancy CSV export
//! into `HotelRecord`s.
//!
//! - Headers are required and must include every column of `HotelRecord`;
//!   extra columns are ignored.
//! - Cells are trimmed before parsing.
//! - The first malformed row aborts the load with its line number.

pub mod error;
pub mod loader;

pub use error::DatasetError;
pub use loader::{REQUIRED_COLUMNS, load_records, load_records_from_path};
