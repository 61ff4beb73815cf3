use crate::error::AnalyticsError;
use chrono::{Duration, NaiveDate};
use core_types::HotelRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An inclusive calendar interval `[start, end]`.
///
/// Deserialization goes through [`DateRange::new`], so an inverted range is rejected there too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AnalyticsError> {
        if start > end {
            return Err(AnalyticsError::InvalidFilter(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The smallest range covering every dated record, or `None` if no record has a date.
    pub fn span<'a, I>(records: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a HotelRecord>,
    {
        let mut dates = records.into_iter().filter_map(|r| r.date);
        let first = dates.next()?;
        let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// `end - start`; zero for a single-day range.
    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    /// The half-open window `[start - length, start)` directly before this range.
    ///
    /// The window start saturates at `NaiveDate::MIN` for ranges reaching back
    /// past the earliest representable date.
    pub fn preceding(&self) -> (NaiveDate, NaiveDate) {
        let from = self
            .start
            .checked_sub_signed(self.length())
            .unwrap_or(NaiveDate::MIN);
        (from, self.start)
    }
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = AnalyticsError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start, raw.end)
    }
}

/// The user's selection: a date range and the room types to include.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub date_range: DateRange,
    pub room_types: BTreeSet<String>,
}

impl FilterState {
    pub fn new<I, S>(date_range: DateRange, room_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            date_range,
            room_types: room_types.into_iter().map(Into::into).collect(),
        }
    }

    /// Selects every room type that appears inside the date range.
    pub fn all_room_types(date_range: DateRange, records: &[HotelRecord]) -> Self {
        let in_range = records
            .iter()
            .filter(|r| r.date.is_some_and(|d| date_range.contains(d)));
        Self::new(date_range, room_types(in_range))
    }

    pub fn matches(&self, record: &HotelRecord) -> bool {
        record.date.is_some_and(|d| self.date_range.contains(d))
            && self.room_types.contains(&record.room_type)
    }

    pub fn apply<'a>(&self, records: &'a [HotelRecord]) -> Vec<&'a HotelRecord> {
        filter(records, &self.date_range, &self.room_types)
    }

    /// Records of the selected room types dated inside the window preceding the range.
    pub fn apply_preceding<'a>(&self, records: &'a [HotelRecord]) -> Vec<&'a HotelRecord> {
        let (from, until) = self.date_range.preceding();
        records
            .iter()
            .filter(|r| r.date.is_some_and(|d| from <= d && d < until))
            .filter(|r| self.room_types.contains(&r.room_type))
            .collect()
    }
}

/// Keeps records dated inside `date_range` whose room type is selected.
///
/// Records without a readable date never match. An empty selection yields an
/// empty subset.
pub fn filter<'a>(
    records: &'a [HotelRecord],
    date_range: &DateRange,
    room_types: &BTreeSet<String>,
) -> Vec<&'a HotelRecord> {
    let subset: Vec<&HotelRecord> = records
        .iter()
        .filter(|r| r.date.is_some_and(|d| date_range.contains(d)))
        .filter(|r| room_types.contains(&r.room_type))
        .collect();

    tracing::debug!(
        start = %date_range.start(),
        end = %date_range.end(),
        selected = room_types.len(),
        matched = subset.len(),
        total = records.len(),
        "Filter applied"
    );
    subset
}

/// Distinct room types in the order they first appear.
pub fn room_types<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a HotelRecord>,
{
    let mut seen = BTreeSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.room_type.as_str()))
        .map(|r| r.room_type.clone())
        .collect()
}
