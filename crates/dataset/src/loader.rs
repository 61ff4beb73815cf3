use crate::error::DatasetError;
use core_types::HotelRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column headers every dataset must provide.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "Date",
    "Room_Type",
    "Price",
    "Competitor_Price",
    "Quantity_Sold",
    "Occupancy_Rate",
    "Day_of_Week",
    "Lead_Time",
    "Promotion",
    "Event_Nearby",
];

/// Loads hotel records from any CSV reader.
pub fn load_records<R: Read>(reader: R) -> Result<Vec<HotelRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // Check the header up front so a missing column is reported once, by name,
    // instead of as a deserialization failure on the first row.
    let headers = csv_reader.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns(missing));
    }

    let mut records = Vec::new();
    for result in csv_reader.deserialize::<HotelRecord>() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or_default();
            DatasetError::MalformedRow {
                line,
                message: e.to_string(),
            }
        })?;
        records.push(record);
    }

    let undated = records.iter().filter(|r| r.date.is_none()).count();
    if undated > 0 {
        tracing::warn!(undated, "Rows with unreadable dates will not match any date filter");
    }
    tracing::debug!(rows = records.len(), "Dataset loaded");

    Ok(records)
}

/// Loads hotel records from a CSV file on disk.
pub fn load_records_from_path(path: &Path) -> Result<Vec<HotelRecord>, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Loading dataset");
    load_records(file)
}
