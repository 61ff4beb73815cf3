use analytics::{
    DashboardEngine, DateRange, FilterState, GroupKey, ValueKey, filter, group_mean, group_sum,
    mean, room_types,
};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::PathBuf;

const FIXTURE: &str = "\
Date,Room_Type,Price,Competitor_Price,Quantity_Sold,Occupancy_Rate,Day_of_Week,Lead_Time,Promotion,Event_Nearby
2024-04-01,Standard,90,95,10,60%,Monday,4,None,None
2024-04-01,Deluxe,140,150,6,60%,Monday,10,Early Bird,None
2024-04-02,Standard,95,92,12,70%,Tuesday,2,None,Conference
2024-04-02,Deluxe,150,145,5,70%,Tuesday,21,None,Conference
2024-04-03,Suite,300,280,2,85%,Wednesday,45,Early Bird,None
2024-04-04,Standard,100,99,14,90%,Thursday,1,Last Minute,Festival
";

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
}

#[test]
fn filter_then_group_mean_by_room_type() {
    let records = dataset::load_records(FIXTURE.as_bytes()).unwrap();
    let range = DateRange::new(day(1), day(2)).unwrap();
    let selected: BTreeSet<String> = ["Standard".to_string()].into();

    let subset = filter(&records, &range, &selected);
    assert_eq!(subset.len(), 2);

    let means = group_mean(&subset, GroupKey::RoomType, ValueKey::Price).unwrap();
    assert_eq!(means.len(), 1);
    assert_eq!(means["Standard"], 92.5);

    let totals = group_sum(&subset, GroupKey::RoomType, ValueKey::QuantitySold).unwrap();
    assert_eq!(totals["Standard"], 22.0);
    assert_eq!(mean(&subset, ValueKey::OccupancyRate).unwrap(), 65.0);
}

#[test]
fn empty_room_type_selection_produces_empty_aggregates() {
    let records = dataset::load_records(FIXTURE.as_bytes()).unwrap();
    let range = DateRange::span(&records).unwrap();
    let subset = filter(&records, &range, &BTreeSet::new());

    assert!(subset.is_empty());
    assert!(group_mean(&subset, GroupKey::RoomType, ValueKey::Price).unwrap().is_empty());
    assert!(mean(&subset, ValueKey::OccupancyRate).unwrap().is_nan());

    let report = DashboardEngine::default()
        .build(&records, &FilterState::new(range, Vec::<String>::new()))
        .unwrap();
    assert_eq!(report.filter.matched_rows, 0);
    assert_eq!(report.filter.total_rows, 6);
}

#[test]
fn report_over_the_whole_fixture() {
    let records = dataset::load_records(FIXTURE.as_bytes()).unwrap();
    let range = DateRange::span(&records).unwrap();
    let report = DashboardEngine::new(3, 5)
        .build(&records, &FilterState::all_room_types(range, &records))
        .unwrap();

    assert_eq!(report.preview.len(), 3);
    assert_eq!(report.kpis.total_quantity, 49);
    assert_eq!(report.kpis.total_revenue, 875.0);
    assert_eq!(report.event_impact.with_event_pct, 230.0 / 3.0);
    assert_eq!(report.event_impact.without_event_pct, 205.0 / 3.0);

    let promotions: Vec<_> = report
        .promotion_effectiveness
        .iter()
        .map(|g| g.group.as_str())
        .collect();
    // Mean revenue: Early Bird 720, None 930, Last Minute 1400.
    assert_eq!(promotions, vec!["Early Bird", "None", "Last Minute"]);

    let bins: usize = report.lead_time.histogram.iter().map(|b| b.count).sum();
    assert_eq!(bins, 6);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["occupancy_by_weekday"][4]["group"], "Friday");
    assert!(json["occupancy_by_weekday"][4]["value"].is_null());
}

#[test]
fn example_dataset_loads_and_reports() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/local_hotel_ota_sample.csv");
    let records = dataset::load_records_from_path(&path).unwrap();

    assert!(!records.is_empty());
    assert!(records.iter().all(|r| r.date.is_some()));
    assert_eq!(room_types(&records), vec!["Standard", "Deluxe", "Suite"]);

    let range = DateRange::span(&records).unwrap();
    let report = DashboardEngine::default()
        .build(&records, &FilterState::all_room_types(range, &records))
        .unwrap();
    assert_eq!(report.filter.matched_rows, records.len());
    assert!(report.kpis.avg_occupancy_pct > 0.0);
    assert!(report.price_correlation.pearson_r.is_some());
}
