use crate::aggregate::HistogramBin;
use crate::filter::DateRange;
use chrono::NaiveDate;
use core_types::HotelRecord;
use serde::{Deserialize, Serialize};

/// Everything the dashboard shows for one filter selection.
///
/// This struct is the final output of the `DashboardEngine`. Means over empty
/// subsets are `NaN` (serialized as `null` in JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub filter: FilterSummary,
    /// Leading rows of the unfiltered dataset.
    pub preview: Vec<HotelRecord>,

    // I. Headline Metrics
    pub kpis: Kpis,
    pub previous_period: PeriodComparison,

    // II. Pricing
    pub avg_price_by_room: Vec<GroupValue>,
    pub price_comparison: PriceComparison,
    pub price_correlation: CorrelationSummary,

    // III. Occupancy
    pub occupancy_over_time: Vec<SeriesPoint>,
    pub occupancy_by_weekday: Vec<GroupValue>,
    pub event_impact: EventImpact,

    // IV. Revenue & Bookings
    pub revenue: RevenueSummary,
    pub lead_time: LeadTimeSummary,
    pub promotion_effectiveness: Vec<GroupValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSummary {
    pub date_range: DateRange,
    pub room_types: Vec<String>,
    pub matched_rows: usize,
    pub total_rows: usize,
}

/// Headline numbers for a set of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    /// Sum of nightly prices over the selected rows.
    pub total_revenue: f64,
    pub total_quantity: i64,
    pub avg_occupancy_pct: f64,
}

impl Kpis {
    /// The values reported for a period without any bookings.
    pub fn zero() -> Self {
        Self {
            total_revenue: 0.0,
            total_quantity: 0,
            avg_occupancy_pct: 0.0,
        }
    }
}

/// The current selection measured against the equally long window before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparison {
    pub start: NaiveDate,
    /// Exclusive.
    pub end: NaiveDate,
    pub rows: usize,
    pub kpis: Kpis,
    pub revenue_delta: f64,
    pub quantity_delta: i64,
    pub occupancy_delta_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupValue {
    pub group: String,
    pub value: f64,
}

impl From<(String, f64)> for GroupValue {
    fn from((group, value): (String, f64)) -> Self {
        Self { group, value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceComparison {
    pub avg_price: f64,
    pub avg_competitor_price: f64,
    /// Positive when the hotel is more expensive than the competition.
    pub difference: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationSummary {
    pub points: usize,
    pub pearson_r: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventImpact {
    pub with_event_pct: f64,
    pub without_event_pct: f64,
}

/// Revenue here is `Price × Quantity_Sold` per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub over_time: Vec<SeriesPoint>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadTimeSummary {
    pub average_days: f64,
    pub histogram: Vec<HistogramBin>,
}
