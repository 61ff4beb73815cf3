//! # Analytics
//!
//! The aggregation pipeline of the dashboard.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No knowledge of files, terminals or configuration sources. It
//!   depends only on `core-types`.
//! - **Borrowing Pipeline:** Filters return `Vec<&HotelRecord>` views into the
//!   loaded dataset; aggregations consume those views and never copy rows.
//! - **Empty Is Not An Error:** aggregations over an empty subset produce empty
//!   maps, `NaN` means and zero sums. Only malformed values fail.
//!
//! ## Public API
//!
//! - `FilterState` / `DateRange`: the user's selection and its predicate.
//! - `group_mean`, `group_sum`, `mean`, `sum`: keyed by `GroupKey` / `ValueKey`.
//! - `DashboardEngine`: builds the complete `DashboardReport` for one selection.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod filter;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use aggregate::{
    GroupKey, HistogramBin, ValueKey, group_mean, group_sum, histogram, mean, pearson_correlation,
    reindex_weekdays, sorted_by_value, sum,
};
pub use engine::DashboardEngine;
pub use error::AnalyticsError;
pub use filter::{DateRange, FilterState, filter, room_types};
pub use report::{
    CorrelationSummary, DashboardReport, EventImpact, FilterSummary, GroupValue, Kpis,
    LeadTimeSummary, PeriodComparison, PriceComparison, RevenueSummary, SeriesPoint,
};
