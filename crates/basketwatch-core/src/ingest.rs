//! CSV ingest for average-price tables.
//!
//! The expected layout is a `Date` column followed by one numeric column per
//! tracked item. Bad dates and blank cells degrade to missing values; a
//! column holding any non-numeric text is dropped as a whole.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::parse_observation_date;
use crate::error::IngestError;
use crate::series::{PriceSeries, RawObservation};
use crate::SeriesInfo;

const DATE_COLUMN: &str = "date";
const MISSING_MARKERS: [&str; 5] = ["nan", "na", "n/a", "null", "."];

/// What happened while reading a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub rows_read: usize,
    pub undated_rows: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped_columns: Vec<String>,
}

/// A loaded price table plus its ingest report.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub series: PriceSeries,
    pub report: IngestReport,
}

/// Load a price table from a CSV file on disk.
pub fn load_price_table(path: &Path) -> Result<LoadedTable, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loading price table");
    read_price_table(file)
}

/// Read a price table from any CSV source.
pub fn read_price_table<R: Read>(reader: R) -> Result<LoadedTable, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(IngestError::MissingHeader);
    }

    let date_index = headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(DATE_COLUMN))
        .unwrap_or(0);
    let item_columns = headers
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != date_index)
        .map(|(index, header)| (index, header.to_owned()))
        .collect::<Vec<_>>();

    let mut dates = Vec::new();
    let mut cells: Vec<Vec<Option<f64>>> = vec![Vec::new(); item_columns.len()];
    let mut numeric = vec![true; item_columns.len()];

    for record in reader.records() {
        let record = record?;
        dates.push(record.get(date_index).and_then(parse_observation_date));

        for (slot, (index, _)) in item_columns.iter().enumerate() {
            match parse_cell(record.get(*index).unwrap_or_default()) {
                Cell::Value(value) => cells[slot].push(Some(value)),
                Cell::Missing => cells[slot].push(None),
                Cell::Text => {
                    numeric[slot] = false;
                    cells[slot].push(None);
                }
            }
        }
    }

    let mut report = IngestReport {
        rows_read: dates.len(),
        undated_rows: dates.iter().filter(|date| date.is_none()).count(),
        dropped_columns: Vec::new(),
    };

    let mut items = Vec::new();
    let mut kept = Vec::new();
    for (slot, (_, header)) in item_columns.iter().enumerate() {
        if header.is_empty() {
            continue;
        }
        if !numeric[slot] {
            warn!(column = %header, "dropping non-numeric column");
            report.dropped_columns.push(header.clone());
            continue;
        }
        items.push(SeriesInfo::from_header(header)?);
        kept.push(std::mem::take(&mut cells[slot]));
    }

    if items.is_empty() {
        return Err(IngestError::NoItemColumns);
    }

    let rows = dates
        .into_iter()
        .enumerate()
        .map(|(row, date)| RawObservation {
            date,
            prices: kept.iter().map(|column| column[row]).collect(),
        });
    let series = PriceSeries::new(items, rows)?;

    if report.undated_rows > 0 {
        warn!(
            undated_rows = report.undated_rows,
            "rows with unparsable dates are excluded from every period"
        );
    }
    debug!(
        rows = report.rows_read,
        items = series.items().len(),
        "price table loaded"
    );

    Ok(LoadedTable { series, report })
}

enum Cell {
    Value(f64),
    Missing,
    Text,
}

fn parse_cell(raw: &str) -> Cell {
    let value = raw.trim();
    if value.is_empty()
        || MISSING_MARKERS
            .iter()
            .any(|marker| value.eq_ignore_ascii_case(marker))
    {
        return Cell::Missing;
    }

    match value.trim_start_matches('$').replace(',', "").parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Cell::Value(parsed),
        _ => Cell::Text,
    }
}
