use crate::error::AnalyticsError;
use core_types::{HotelRecord, WEEKDAYS, weekday_index};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The categorical field records are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupKey {
    RoomType,
    /// Recognised weekday spellings ("mon", "MONDAY") are merged under the full name.
    DayOfWeek,
    Promotion,
    EventNearby,
    Date,
}

impl GroupKey {
    /// The group a record falls into. `None` drops the record from the grouping
    /// (only possible for `Date` when the date was unreadable).
    pub fn label(&self, record: &HotelRecord) -> Option<String> {
        match self {
            GroupKey::RoomType => Some(record.room_type.clone()),
            GroupKey::DayOfWeek => Some(match weekday_index(&record.day_of_week) {
                Some(i) => WEEKDAYS[i].to_string(),
                None => record.day_of_week.clone(),
            }),
            GroupKey::Promotion => Some(record.promotion.clone()),
            GroupKey::EventNearby => Some(record.event_nearby.clone()),
            GroupKey::Date => record.date.map(|d| d.to_string()),
        }
    }
}

/// The numeric field being aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKey {
    Price,
    CompetitorPrice,
    QuantitySold,
    /// Parsed from the raw percentage string; fails on malformed values.
    OccupancyRate,
    LeadTime,
    /// `Price × Quantity_Sold`.
    Revenue,
}

impl ValueKey {
    pub fn extract(&self, record: &HotelRecord) -> Result<f64, AnalyticsError> {
        Ok(match self {
            ValueKey::Price => record.price,
            ValueKey::CompetitorPrice => record.competitor_price,
            ValueKey::QuantitySold => record.quantity_sold as f64,
            ValueKey::OccupancyRate => record.occupancy_pct()?,
            ValueKey::LeadTime => record.lead_time as f64,
            ValueKey::Revenue => record.revenue(),
        })
    }
}

/// One bar of a histogram. `upper` is exclusive except for the last bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

pub fn values(subset: &[&HotelRecord], key: ValueKey) -> Result<Vec<f64>, AnalyticsError> {
    subset.iter().map(|r| key.extract(r)).collect()
}

/// Arithmetic mean; `NaN` for an empty subset.
pub fn mean(subset: &[&HotelRecord], key: ValueKey) -> Result<f64, AnalyticsError> {
    Ok(mean_of(&values(subset, key)?))
}

/// Total; `0.0` for an empty subset.
pub fn sum(subset: &[&HotelRecord], key: ValueKey) -> Result<f64, AnalyticsError> {
    Ok(values(subset, key)?.iter().sum())
}

pub fn group_mean(
    subset: &[&HotelRecord],
    group: GroupKey,
    value: ValueKey,
) -> Result<BTreeMap<String, f64>, AnalyticsError> {
    Ok(accumulate(subset, group, value)?
        .into_iter()
        .map(|(label, (total, count))| (label, total / count as f64))
        .collect())
}

pub fn group_sum(
    subset: &[&HotelRecord],
    group: GroupKey,
    value: ValueKey,
) -> Result<BTreeMap<String, f64>, AnalyticsError> {
    Ok(accumulate(subset, group, value)?
        .into_iter()
        .map(|(label, (total, _))| (label, total))
        .collect())
}

/// Per-group (sum, count) in a single pass.
fn accumulate(
    subset: &[&HotelRecord],
    group: GroupKey,
    value: ValueKey,
) -> Result<BTreeMap<String, (f64, usize)>, AnalyticsError> {
    let mut groups: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for record in subset {
        let Some(label) = group.label(record) else {
            continue;
        };
        let v = value.extract(record)?;
        let entry = groups.entry(label).or_insert((0.0, 0));
        entry.0 += v;
        entry.1 += 1;
    }
    Ok(groups)
}

/// Groups ordered by ascending value, ties broken by label.
pub fn sorted_by_value(groups: &BTreeMap<String, f64>) -> Vec<(String, f64)> {
    let mut sorted: Vec<(String, f64)> = groups.iter().map(|(k, v)| (k.clone(), *v)).collect();
    // BTreeMap iteration is already label-ordered, so a stable sort keeps ties by label.
    sorted.sort_by(|a, b| a.1.total_cmp(&b.1));
    sorted
}

/// Monday..Sunday, `NaN` for days with no data. Labels that are not weekdays are dropped.
pub fn reindex_weekdays(groups: &BTreeMap<String, f64>) -> Vec<(String, f64)> {
    WEEKDAYS
        .iter()
        .map(|day| (day.to_string(), groups.get(*day).copied().unwrap_or(f64::NAN)))
        .collect()
}

/// Equal-width histogram over `[min, max]`.
///
/// When every value is identical the range is widened to `[v - 0.5, v + 0.5]`.
/// Non-finite values are ignored.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (mut lo, mut hi) = finite
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in finite {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count,
        })
        .collect()
}

/// Pearson's r. `None` with fewer than two pairs or when either side is constant.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mean_x = mean_of(xs);
    let mean_y = mean_of(ys);

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

pub(crate) fn mean_of(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
