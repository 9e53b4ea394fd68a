//! In-memory tabular frame of location × year records.

use serde_json::{Map, Number, Value};

/// Header of the location column.
pub const LOCATION_COLUMN: &str = "final location";
/// Header of the year column.
pub const YEAR_COLUMN: &str = "year";
/// Header of the latitude column.
pub const LAT_COLUMN: &str = "loc_lat";
/// Header of the longitude column.
pub const LNG_COLUMN: &str = "loc_lng";

/// Normalize a location name for identity comparison.
pub fn normalize_location(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Convert a float to JSON, mapping missing and non-finite values to null.
pub fn number_or_null(value: Option<f64>) -> Value {
    value
        .filter(|v| v.is_finite())
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// One row of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Display-cased location name.
    pub location: String,
    /// Calendar year of the snapshot.
    pub year: i32,
    /// Metric values, aligned with the owning frame's columns.
    pub values: Vec<Option<f64>>,
    /// Latitude, if known.
    pub lat: Option<f64>,
    /// Longitude, if known.
    pub lng: Option<f64>,
}

impl Record {
    /// Create a record with no coordinates.
    pub fn new(location: impl Into<String>, year: i32, values: Vec<Option<f64>>) -> Self {
        Self {
            location: location.into(),
            year,
            values,
            lat: None,
            lng: None,
        }
    }

    /// Attach coordinates.
    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    /// Value at a column index; null when absent.
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Whether this record belongs to the given (already normalized) location.
    pub fn is_location(&self, normalized: &str) -> bool {
        normalize_location(&self.location) == normalized
    }
}

/// A single (year, value) observation taken from one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub year: Option<i32>,
    pub value: Option<f64>,
}

/// An ordered set of records sharing one column layout.
///
/// The loaded dataset is itself a frame; every filter produces a new frame
/// with the same columns and a subset of the records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Frame {
    /// Create a frame. Records shorter than `columns` read as null.
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    /// Build a frame with the same columns and different records.
    pub fn with_records(&self, records: Vec<Record>) -> Self {
        Self {
            columns: self.columns.clone(),
            records,
        }
    }

    /// Metric column names in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of a metric column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Distinct location names, sorted, case preserved.
    pub fn locations(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .records
            .iter()
            .map(|r| r.location.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// The (year, value) series for one column, in record order.
    pub fn points(&self, column: &str) -> Option<Vec<Point>> {
        let index = self.column_index(column)?;
        Some(
            self.records
                .iter()
                .map(|r| Point {
                    year: Some(r.year),
                    value: r.value(index),
                })
                .collect(),
        )
    }

    /// Render every record as a JSON object for tabular output.
    pub fn to_rows(&self) -> Vec<Value> {
        self.records.iter().map(|r| self.row(r)).collect()
    }

    fn row(&self, record: &Record) -> Value {
        let mut row = Map::new();
        row.insert(
            LOCATION_COLUMN.to_string(),
            Value::String(record.location.clone()),
        );
        row.insert(YEAR_COLUMN.to_string(), Value::from(record.year));
        for (index, column) in self.columns.iter().enumerate() {
            row.insert(column.clone(), number_or_null(record.value(index)));
        }
        row.insert(LAT_COLUMN.to_string(), number_or_null(record.lat));
        row.insert(LNG_COLUMN.to_string(), number_or_null(record.lng));
        Value::Object(row)
    }
}
