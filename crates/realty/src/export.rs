//! CSV export of one location's records.

use csv::{QuoteStyle, WriterBuilder};

use crate::dataset::{Frame, LAT_COLUMN, LNG_COLUMN, LOCATION_COLUMN, Record, YEAR_COLUMN};
use crate::error::{RealtyError, Result};
use crate::filter::{TimeWindow, filter_dataset};

const ESCAPE: char = '\\';

/// A rendered CSV attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    /// Suggested download name, e.g. `Pimple_Saudagar_data.csv`.
    pub filename: String,
    pub content: Vec<u8>,
}

/// Download name for a location's export.
pub fn export_filename(location: &str) -> String {
    format!("{}_data.csv", location.replace(' ', "_"))
}

/// Backslash-escape delimiter, quote, escape and line-break characters.
fn escape_field(field: &str) -> String {
    let mut escaped = String::with_capacity(field.len());
    for ch in field.chars() {
        if matches!(ch, ',' | '"' | ESCAPE | '\r' | '\n') {
            escaped.push(ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// Floats always keep a fractional part ("5000.0"); nulls are empty.
fn format_float(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:?}"),
        _ => String::new(),
    }
}

fn record_fields(frame: &Frame, record: &Record) -> Vec<String> {
    let mut fields = Vec::with_capacity(frame.columns().len() + 4);
    fields.push(escape_field(&record.location));
    fields.push(record.year.to_string());
    for index in 0..frame.columns().len() {
        fields.push(format_float(record.value(index)));
    }
    fields.push(format_float(record.lat));
    fields.push(format_float(record.lng));
    fields
}

/// Render a frame as unquoted, backslash-escaped CSV with a header row.
pub fn frame_to_csv(frame: &Frame) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(Vec::new());

    let mut header = vec![LOCATION_COLUMN.to_string(), YEAR_COLUMN.to_string()];
    header.extend(frame.columns().iter().map(|c| escape_field(c)));
    header.push(LAT_COLUMN.to_string());
    header.push(LNG_COLUMN.to_string());
    writer.write_record(&header)?;

    for record in frame.records() {
        writer.write_record(record_fields(frame, record))?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()).into())
}

/// Export every record of one location, ordered by year.
pub fn export_location(frame: &Frame, location: &str) -> Result<CsvExport> {
    let location = location.trim();
    if location.is_empty() {
        return Err(RealtyError::invalid_input(
            "location query parameter is required.",
        ));
    }

    let filtered = filter_dataset(frame, Some(location), &TimeWindow::all());
    if filtered.is_empty() {
        return Err(RealtyError::not_found(
            "Requested location is missing in the data.",
        ));
    }
    log::info!("Exporting {} rows for {}", filtered.len(), location);

    Ok(CsvExport {
        filename: export_filename(location),
        content: frame_to_csv(&filtered)?,
    })
}
