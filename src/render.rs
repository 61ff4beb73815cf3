//! Terminal rendering of command results.

use analytics::{DashboardReport, GroupValue, SeriesPoint};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use core_types::HotelRecord;
use elasticity::{CurvePoint, ElasticityResult};

fn new_table<I, S>(header: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: Into<Cell>,
{
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn right(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn section(title: &str) {
    println!("\n### {title}");
}

/// Fixed-point number, `n/a` for NaN.
pub fn number(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{value:.decimals$}")
    }
}

/// `$1,234.56`, with a leading minus for amounts that stay negative after rounding to cents.
pub fn money(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let rounds_to_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if value < 0.0 && !rounds_to_zero { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

pub fn percent(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{value:.2}%")
    }
}

fn signed(value: f64, unit: &str) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{value:+.2}{unit}")
    }
}

pub fn print_report(report: &DashboardReport) {
    let filter = &report.filter;
    println!(
        "Report for {} to {} | room types: {} | {} of {} rows",
        filter.date_range.start(),
        filter.date_range.end(),
        if filter.room_types.is_empty() {
            "(none)".to_string()
        } else {
            filter.room_types.join(", ")
        },
        filter.matched_rows,
        filter.total_rows
    );

    section("Data preview");
    println!("{}", records_table(&report.preview));

    section("Key Performance Indicators");
    let previous = &report.previous_period;
    let mut kpis = new_table(vec![
        "Metric".to_string(),
        "Selected period".to_string(),
        format!("Previous ({} to {}, excl.)", previous.start, previous.end),
        "Change".to_string(),
    ]);
    kpis.add_row(vec![
        Cell::new("Total Revenue"),
        right(money(report.kpis.total_revenue)),
        right(money(previous.kpis.total_revenue)),
        right(signed(previous.revenue_delta, "")),
    ]);
    kpis.add_row(vec![
        Cell::new("Quantity Sold"),
        right(report.kpis.total_quantity.to_string()),
        right(previous.kpis.total_quantity.to_string()),
        right(format!("{:+}", previous.quantity_delta)),
    ]);
    kpis.add_row(vec![
        Cell::new("Avg Occupancy Rate"),
        right(percent(report.kpis.avg_occupancy_pct)),
        right(percent(previous.kpis.avg_occupancy_pct)),
        right(signed(previous.occupancy_delta_pct, " pp")),
    ]);
    println!("{kpis}");

    section("Average Price by Room Type");
    println!("{}", groups_table("Room Type", "Average Price", &report.avg_price_by_room, money));

    section("Price Comparison");
    let comparison = &report.price_comparison;
    let mut prices = new_table(["Metric", "Value"]);
    prices.add_row(vec![Cell::new("Average Hotel Price"), right(money(comparison.avg_price))]);
    prices.add_row(vec![
        Cell::new("Average Competitor Price"),
        right(money(comparison.avg_competitor_price)),
    ]);
    prices.add_row(vec![Cell::new("Difference"), right(signed(comparison.difference, ""))]);
    println!("{prices}");

    section("Occupancy Rate Over Time");
    println!("{}", series_table("Occupancy Rate", &report.occupancy_over_time, percent));
    println!(
        "The average occupancy rate over the selected period is {}.",
        percent(report.kpis.avg_occupancy_pct)
    );

    section("Revenue Over Time");
    println!("{}", series_table("Revenue", &report.revenue.over_time, money));
    println!(
        "The total revenue over the selected period is {}.",
        money(report.revenue.total)
    );

    section("Occupancy Rate by Day of the Week");
    println!(
        "{}",
        groups_table("Day", "Average Occupancy", &report.occupancy_by_weekday, percent)
    );

    section("Lead Time Analysis");
    let mut lead = new_table(["Lead Time (Days)", "Frequency"]);
    for bin in &report.lead_time.histogram {
        lead.add_row(vec![
            Cell::new(format!("{} - {}", number(bin.lower, 1), number(bin.upper, 1))),
            right(bin.count.to_string()),
        ]);
    }
    println!("{lead}");
    println!(
        "The average lead time for bookings is {} days.",
        number(report.lead_time.average_days, 2)
    );

    section("Promotion Effectiveness");
    println!(
        "{}",
        groups_table("Promotion", "Average Revenue", &report.promotion_effectiveness, money)
    );

    section("Price vs. Competitor Price Correlation");
    let correlation = &report.price_correlation;
    println!(
        "Pearson r over {} points: {}",
        correlation.points,
        correlation
            .pearson_r
            .map(|r| number(r, 3))
            .unwrap_or_else(|| "n/a".to_string())
    );

    section("Event Impact on Occupancy");
    let mut events = new_table(["Nearby Event", "Average Occupancy"]);
    events.add_row(vec![Cell::new("Yes"), right(percent(report.event_impact.with_event_pct))]);
    events.add_row(vec![Cell::new("No"), right(percent(report.event_impact.without_event_pct))]);
    println!("{events}");
}

fn records_table(records: &[HotelRecord]) -> Table {
    let mut table = new_table(dataset::REQUIRED_COLUMNS);
    for r in records {
        table.add_row(vec![
            Cell::new(r.date.map(|d| d.to_string()).unwrap_or_default()),
            Cell::new(&r.room_type),
            right(number(r.price, 2)),
            right(number(r.competitor_price, 2)),
            right(r.quantity_sold.to_string()),
            right(r.occupancy_rate.clone()),
            Cell::new(&r.day_of_week),
            right(r.lead_time.to_string()),
            Cell::new(&r.promotion),
            Cell::new(&r.event_nearby),
        ]);
    }
    table
}

fn groups_table(label: &str, value: &str, groups: &[GroupValue], fmt: fn(f64) -> String) -> Table {
    let mut table = new_table([label, value]);
    for g in groups {
        table.add_row(vec![Cell::new(&g.group), right(fmt(g.value))]);
    }
    table
}

fn series_table(value: &str, points: &[SeriesPoint], fmt: fn(f64) -> String) -> Table {
    let mut table = new_table(["Date", value]);
    for p in points {
        table.add_row(vec![Cell::new(p.date), right(fmt(p.value))]);
    }
    table
}

pub fn print_room_types(room_types: &[String]) {
    let mut table = new_table(["Room Type"]);
    for room_type in room_types {
        table.add_row(vec![room_type]);
    }
    println!("{table}");
}

pub fn print_elasticity(result: &ElasticityResult, curve: &[CurvePoint]) {
    section("Price Elasticity Result");
    let mut summary = new_table(["Metric", "Value"]);
    summary.add_row(vec![
        Cell::new("Price change"),
        right(percent(result.price_change * 100.0)),
    ]);
    summary.add_row(vec![
        Cell::new("Quantity change"),
        right(percent(result.quantity_change * 100.0)),
    ]);
    summary.add_row(vec![
        Cell::new("Price Elasticity of Demand"),
        right(number(result.elasticity, 2)),
    ]);
    summary.add_row(vec![
        Cell::new("Classification"),
        right(result.classification.to_string()),
    ]);
    println!("{summary}");
    println!("{}", result.classification.interpretation());

    section("Demand Curve");
    let observed = result.observations();
    let mut table = new_table(["Price", "Quantity Sold", ""]);
    for point in curve {
        let marker = if observed.iter().any(|o| o.price == point.price) {
            "observed"
        } else {
            ""
        };
        table.add_row(vec![
            right(number(point.price, 2)),
            right(number(point.quantity, 2)),
            Cell::new(marker),
        ]);
    }
    println!("{table}");
}
