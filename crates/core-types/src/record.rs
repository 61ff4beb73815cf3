use crate::calendar::parse_date;
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One row of the pricing/occupancy dataset.
///
/// Field names on the wire follow the column headers of the booking export
/// (`Date`, `Room_Type`, ...). The occupancy rate is kept exactly as supplied
/// (e.g. `"78%"`) and only parsed when an aggregation needs it, so a malformed
/// value fails the computations that touch it rather than the whole load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelRecord {
    /// `None` when the source value could not be read as a date.
    #[serde(rename = "Date", deserialize_with = "deserialize_lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "Room_Type")]
    pub room_type: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Competitor_Price")]
    pub competitor_price: f64,
    #[serde(rename = "Quantity_Sold")]
    pub quantity_sold: i64,
    #[serde(rename = "Occupancy_Rate")]
    pub occupancy_rate: String,
    #[serde(rename = "Day_of_Week")]
    pub day_of_week: String,
    /// Days between booking and stay.
    #[serde(rename = "Lead_Time")]
    pub lead_time: i64,
    #[serde(rename = "Promotion")]
    pub promotion: String,
    #[serde(rename = "Event_Nearby")]
    pub event_nearby: String,
}

impl HotelRecord {
    /// The occupancy rate as a number of percent (`"78.5%"` -> `78.5`).
    pub fn occupancy_pct(&self) -> Result<f64, CoreError> {
        parse_percentage(&self.occupancy_rate)
    }

    /// Nightly price multiplied by the number of rooms sold.
    pub fn revenue(&self) -> f64 {
        self.price * self.quantity_sold as f64
    }

    /// Whether an event was recorded near the hotel for this night.
    /// Both an empty cell and the literal `None` mean "no event".
    pub fn has_event_nearby(&self) -> bool {
        let event = self.event_nearby.trim();
        !event.is_empty() && !event.eq_ignore_ascii_case("none")
    }
}

/// Parses a percentage string by stripping trailing `%` signs.
///
/// Surrounding whitespace is ignored; anything else that is not a float is an error.
pub fn parse_percentage(raw: &str) -> Result<f64, CoreError> {
    raw.trim()
        .trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .map_err(|_| CoreError::MalformedPercentage(raw.to_string()))
}

fn deserialize_lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    let parsed = raw.as_deref().and_then(parse_date);
    if parsed.is_none() {
        tracing::debug!(value = ?raw, "Unreadable date treated as missing");
    }
    Ok(parsed)
}
