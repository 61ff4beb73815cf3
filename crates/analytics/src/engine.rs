use crate::aggregate::{
    GroupKey, ValueKey, group_mean, histogram, mean, mean_of, pearson_correlation,
    reindex_weekdays, sorted_by_value, sum, values,
};
use crate::error::AnalyticsError;
use crate::filter::FilterState;
use crate::report::{
    CorrelationSummary, DashboardReport, EventImpact, FilterSummary, GroupValue, Kpis,
    LeadTimeSummary, PeriodComparison, PriceComparison, RevenueSummary, SeriesPoint,
};
use core_types::HotelRecord;

/// A stateless calculator that turns a dataset and a selection into a `DashboardReport`.
#[derive(Debug, Clone)]
pub struct DashboardEngine {
    preview_rows: usize,
    histogram_bins: usize,
}

impl Default for DashboardEngine {
    fn default() -> Self {
        Self::new(5, 20)
    }
}

impl DashboardEngine {
    pub fn new(preview_rows: usize, histogram_bins: usize) -> Self {
        Self {
            preview_rows,
            histogram_bins,
        }
    }

    /// The main entry point for building the report.
    ///
    /// # Arguments
    ///
    /// * `records` - The complete dataset, in file order.
    /// * `filter` - The date range and room types to report on.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `DashboardReport`, or an `AnalyticsError` if a
    /// value needed by one of the aggregations is malformed.
    pub fn build(
        &self,
        records: &[HotelRecord],
        filter: &FilterState,
    ) -> Result<DashboardReport, AnalyticsError> {
        let subset = filter.apply(records);
        if subset.is_empty() {
            tracing::warn!("No records match the current filter; aggregates will be empty");
        }

        let kpis = self.calculate_kpis(&subset)?;
        let previous_period = self.calculate_previous_period(records, filter, &kpis)?;

        let report = DashboardReport {
            filter: FilterSummary {
                date_range: filter.date_range,
                room_types: filter.room_types.iter().cloned().collect(),
                matched_rows: subset.len(),
                total_rows: records.len(),
            },
            preview: records.iter().take(self.preview_rows).cloned().collect(),
            kpis,
            previous_period,
            avg_price_by_room: self.calculate_avg_price_by_room(&subset)?,
            price_comparison: self.calculate_price_comparison(&subset)?,
            price_correlation: self.calculate_price_correlation(&subset)?,
            occupancy_over_time: series(&subset, ValueKey::OccupancyRate)?,
            occupancy_by_weekday: self.calculate_occupancy_by_weekday(&subset)?,
            event_impact: self.calculate_event_impact(&subset)?,
            revenue: self.calculate_revenue(&subset)?,
            lead_time: self.calculate_lead_time(&subset)?,
            promotion_effectiveness: self.calculate_promotion_effectiveness(&subset)?,
        };

        tracing::info!(
            matched = report.filter.matched_rows,
            total = report.filter.total_rows,
            "Dashboard report built"
        );
        Ok(report)
    }

    fn calculate_kpis(&self, subset: &[&HotelRecord]) -> Result<Kpis, AnalyticsError> {
        Ok(Kpis {
            total_revenue: sum(subset, ValueKey::Price)?,
            total_quantity: subset.iter().map(|r| r.quantity_sold).sum(),
            avg_occupancy_pct: mean(subset, ValueKey::OccupancyRate)?,
        })
    }

    /// Compares against `[start - (end - start), start)`, drawn from the whole
    /// dataset with the same room-type selection.
    fn calculate_previous_period(
        &self,
        records: &[HotelRecord],
        filter: &FilterState,
        current: &Kpis,
    ) -> Result<PeriodComparison, AnalyticsError> {
        let (start, end) = filter.date_range.preceding();
        let previous = filter.apply_preceding(records);
        let kpis = if previous.is_empty() {
            Kpis::zero()
        } else {
            self.calculate_kpis(&previous)?
        };
        tracing::debug!(%start, %end, rows = previous.len(), "Previous period selected");

        Ok(PeriodComparison {
            start,
            end,
            rows: previous.len(),
            revenue_delta: current.total_revenue - kpis.total_revenue,
            quantity_delta: current.total_quantity - kpis.total_quantity,
            occupancy_delta_pct: current.avg_occupancy_pct - kpis.avg_occupancy_pct,
            kpis,
        })
    }

    fn calculate_avg_price_by_room(
        &self,
        subset: &[&HotelRecord],
    ) -> Result<Vec<GroupValue>, AnalyticsError> {
        let by_room = group_mean(subset, GroupKey::RoomType, ValueKey::Price)?;
        Ok(sorted_by_value(&by_room).into_iter().map(GroupValue::from).collect())
    }

    fn calculate_price_comparison(
        &self,
        subset: &[&HotelRecord],
    ) -> Result<PriceComparison, AnalyticsError> {
        let avg_price = mean(subset, ValueKey::Price)?;
        let avg_competitor_price = mean(subset, ValueKey::CompetitorPrice)?;
        Ok(PriceComparison {
            avg_price,
            avg_competitor_price,
            difference: avg_price - avg_competitor_price,
        })
    }

    fn calculate_price_correlation(
        &self,
        subset: &[&HotelRecord],
    ) -> Result<CorrelationSummary, AnalyticsError> {
        let prices = values(subset, ValueKey::Price)?;
        let competitor = values(subset, ValueKey::CompetitorPrice)?;
        Ok(CorrelationSummary {
            points: prices.len(),
            pearson_r: pearson_correlation(&prices, &competitor),
        })
    }

    fn calculate_occupancy_by_weekday(
        &self,
        subset: &[&HotelRecord],
    ) -> Result<Vec<GroupValue>, AnalyticsError> {
        let by_day = group_mean(subset, GroupKey::DayOfWeek, ValueKey::OccupancyRate)?;
        let unknown: Vec<&String> = by_day
            .keys()
            .filter(|label| core_types::weekday_index(label).is_none())
            .collect();
        if !unknown.is_empty() {
            tracing::warn!(?unknown, "Day_of_Week labels that are not weekdays are left out");
        }
        Ok(reindex_weekdays(&by_day).into_iter().map(GroupValue::from).collect())
    }

    fn calculate_event_impact(&self, subset: &[&HotelRecord]) -> Result<EventImpact, AnalyticsError> {
        let (with_event, without_event): (Vec<&HotelRecord>, Vec<&HotelRecord>) =
            subset.iter().copied().partition(|r| r.has_event_nearby());
        Ok(EventImpact {
            with_event_pct: mean(&with_event, ValueKey::OccupancyRate)?,
            without_event_pct: mean(&without_event, ValueKey::OccupancyRate)?,
        })
    }

    fn calculate_revenue(&self, subset: &[&HotelRecord]) -> Result<RevenueSummary, AnalyticsError> {
        let over_time = series(subset, ValueKey::Revenue)?;
        let total = over_time.iter().map(|p| p.value).sum();
        Ok(RevenueSummary { over_time, total })
    }

    fn calculate_lead_time(&self, subset: &[&HotelRecord]) -> Result<LeadTimeSummary, AnalyticsError> {
        let lead_times = values(subset, ValueKey::LeadTime)?;
        Ok(LeadTimeSummary {
            average_days: mean_of(&lead_times),
            histogram: histogram(&lead_times, self.histogram_bins),
        })
    }

    fn calculate_promotion_effectiveness(
        &self,
        subset: &[&HotelRecord],
    ) -> Result<Vec<GroupValue>, AnalyticsError> {
        let by_promotion = group_mean(subset, GroupKey::Promotion, ValueKey::Revenue)?;
        Ok(sorted_by_value(&by_promotion).into_iter().map(GroupValue::from).collect())
    }
}

/// One point per dated record, in dataset order.
fn series(subset: &[&HotelRecord], key: ValueKey) -> Result<Vec<SeriesPoint>, AnalyticsError> {
    subset
        .iter()
        .filter_map(|r| r.date.map(|date| (date, *r)))
        .map(|(date, r)| -> Result<SeriesPoint, AnalyticsError> {
            Ok(SeriesPoint {
                date,
                value: key.extract(r)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::DateRange;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, day).unwrap()
    }

    fn record(day: u32, room: &str, price: f64, qty: i64, occupancy: &str, event: &str) -> HotelRecord {
        HotelRecord {
            date: Some(date(day)),
            room_type: room.to_string(),
            price,
            competitor_price: price - 5.0,
            quantity_sold: qty,
            occupancy_rate: occupancy.to_string(),
            day_of_week: date(day).format("%A").to_string(),
            lead_time: i64::from(day),
            promotion: if qty > 3 { "Summer".to_string() } else { "None".to_string() },
            event_nearby: event.to_string(),
        }
    }

    fn dataset() -> Vec<HotelRecord> {
        vec![
            record(1, "Deluxe", 100.0, 2, "60%", "None"),
            record(2, "Suite", 200.0, 1, "70%", "None"),
            record(5, "Deluxe", 110.0, 4, "80%", "Concert"),
            record(6, "Suite", 220.0, 5, "90%", "None"),
            record(7, "Standard", 80.0, 3, "50%", "Concert"),
        ]
    }

    #[test]
    fn kpis_cover_the_filtered_rows() {
        let records = dataset();
        let filter = FilterState::new(DateRange::new(date(5), date(7)).unwrap(), ["Deluxe", "Suite"]);
        let report = DashboardEngine::default().build(&records, &filter).unwrap();

        assert_eq!(report.filter.matched_rows, 2);
        assert_eq!(report.kpis.total_revenue, 330.0);
        assert_eq!(report.kpis.total_quantity, 9);
        assert_eq!(report.kpis.avg_occupancy_pct, 85.0);
        assert_eq!(report.revenue.total, 110.0 * 4.0 + 220.0 * 5.0);
    }

    #[test]
    fn previous_period_uses_the_full_dataset() {
        let records = dataset();
        let filter = FilterState::new(DateRange::new(date(5), date(7)).unwrap(), ["Deluxe", "Suite"]);
        let report = DashboardEngine::default().build(&records, &filter).unwrap();

        let previous = &report.previous_period;
        assert_eq!((previous.start, previous.end), (date(3), date(5)));
        // Nothing was booked on the 3rd or 4th.
        assert_eq!(previous.rows, 0);
        assert_eq!(previous.kpis, Kpis::zero());
        assert_eq!(previous.revenue_delta, 330.0);

        let wider = FilterState::new(DateRange::new(date(4), date(7)).unwrap(), ["Deluxe", "Suite"]);
        let report = DashboardEngine::default().build(&records, &wider).unwrap();
        assert_eq!(report.previous_period.rows, 2);
        assert_eq!(report.previous_period.kpis.total_revenue, 300.0);
        assert_eq!(report.previous_period.quantity_delta, 9 - 3);
    }

    #[test]
    fn extreme_date_range_builds_a_report() {
        let records = dataset();
        let start = NaiveDate::from_ymd_opt(-200_000, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(200_000, 1, 1).unwrap();
        let filter = FilterState::all_room_types(DateRange::new(start, end).unwrap(), &records);
        let report = DashboardEngine::default().build(&records, &filter).unwrap();

        assert_eq!(report.filter.matched_rows, records.len());
        assert_eq!((report.previous_period.start, report.previous_period.end), (NaiveDate::MIN, start));
        assert_eq!(report.previous_period.rows, 0);
    }

    #[test]
    fn groupings_are_ordered_for_display() {
        let records = dataset();
        let range = DateRange::span(&records).unwrap();
        let filter = FilterState::all_room_types(range, &records);
        let report = DashboardEngine::default().build(&records, &filter).unwrap();

        let rooms: Vec<_> = report.avg_price_by_room.iter().map(|g| g.group.as_str()).collect();
        assert_eq!(rooms, vec!["Standard", "Deluxe", "Suite"]);

        let days: Vec<_> = report.occupancy_by_weekday.iter().map(|g| g.group.as_str()).collect();
        assert_eq!(days, core_types::WEEKDAYS.to_vec());

        assert_eq!(report.event_impact.with_event_pct, 65.0);
        assert_eq!(report.event_impact.without_event_pct, 220.0 / 3.0);
        assert_eq!(report.occupancy_over_time.len(), 5);
        assert_eq!(report.lead_time.average_days, 21.0 / 5.0);
        assert_eq!(report.lead_time.histogram.len(), 20);
    }

    #[test]
    fn preview_takes_leading_rows_of_the_dataset() {
        let records = dataset();
        let filter = FilterState::new(DateRange::new(date(6), date(6)).unwrap(), ["Suite"]);
        let report = DashboardEngine::new(2, 10).build(&records, &filter).unwrap();
        assert_eq!(report.preview, records[..2].to_vec());
    }

    #[test]
    fn empty_selection_is_not_an_error() {
        let records = dataset();
        let filter = FilterState::new(DateRange::span(&records).unwrap(), Vec::<String>::new());
        let report = DashboardEngine::default().build(&records, &filter).unwrap();

        assert_eq!(report.filter.matched_rows, 0);
        assert_eq!(report.kpis.total_revenue, 0.0);
        assert!(report.kpis.avg_occupancy_pct.is_nan());
        assert!(report.avg_price_by_room.is_empty());
        assert!(report.promotion_effectiveness.is_empty());
        assert!(report.price_comparison.avg_price.is_nan());
        assert!(report.occupancy_by_weekday.iter().all(|g| g.value.is_nan()));
        assert!(report.lead_time.histogram.is_empty());
        assert_eq!(report.price_correlation.pearson_r, None);
    }

    #[test]
    fn malformed_occupancy_in_selection_fails() {
        let mut records = dataset();
        records[0].occupancy_rate = "sixty".to_string();
        let range = DateRange::span(&records).unwrap();
        let filter = FilterState::all_room_types(range, &records);
        assert!(DashboardEngine::default().build(&records, &filter).is_err());

        // Outside the selection the bad value is never parsed.
        let later = FilterState::new(DateRange::new(date(5), date(7)).unwrap(), ["Deluxe"]);
        assert!(DashboardEngine::default().build(&records, &later).is_ok());
    }
}
