//! Delimited-text dataset loader with delimiter detection.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use sha2::{Digest, Sha256};

use super::frame::{Frame, LAT_COLUMN, LNG_COLUMN, LOCATION_COLUMN, Record, YEAR_COLUMN};
use super::source::DatasetSource;
use crate::error::{RealtyError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: b'"',
        }
    }
}

/// Header positions of the reserved columns.
struct Layout {
    location: usize,
    year: usize,
    lat: Option<usize>,
    lng: Option<usize>,
    /// (header position, metric name) in header order.
    metrics: Vec<(usize, String)>,
}

impl Layout {
    fn from_headers(headers: &[String]) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let location = find(LOCATION_COLUMN).ok_or_else(|| {
            RealtyError::Config(format!("missing '{}' column", LOCATION_COLUMN))
        })?;
        let year = find(YEAR_COLUMN)
            .ok_or_else(|| RealtyError::Config(format!("missing '{}' column", YEAR_COLUMN)))?;
        let lat = find(LAT_COLUMN);
        let lng = find(LNG_COLUMN);

        let reserved = [Some(location), Some(year), lat, lng];
        let metrics = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| !reserved.contains(&Some(*i)))
            .map(|(i, h)| (i, h.trim().to_string()))
            .collect();

        Ok(Self {
            location,
            year,
            lat,
            lng,
            metrics,
        })
    }
}

/// Loads the real-estate dataset from delimited text.
pub struct DatasetLoader {
    config: LoaderConfig,
}

impl DatasetLoader {
    /// Create a loader with default configuration.
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load a file and return the frame plus source metadata.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<(Frame, DatasetSource)> {
        let path = path.as_ref();

        let contents = fs::read(path).map_err(|e| RealtyError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = self.resolve_delimiter(&contents)?;
        let (frame, skipped) = self.parse_with(&contents, delimiter)?;
        let source =
            DatasetSource::describe(path.to_path_buf(), hash, delimiter, &frame, skipped);

        log::info!(
            "Loaded {} records for {} locations from {} ({} rows skipped)",
            source.row_count,
            source.location_count,
            path.display(),
            source.skipped_rows
        );

        Ok((frame, source))
    }

    /// Parse raw bytes, detecting the delimiter when not configured.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Frame> {
        let delimiter = self.resolve_delimiter(bytes)?;
        let (frame, _) = self.parse_with(bytes, delimiter)?;
        Ok(frame)
    }

    fn resolve_delimiter(&self, bytes: &[u8]) -> Result<u8> {
        match self.config.delimiter {
            Some(d) => Ok(d),
            None => detect_delimiter(bytes),
        }
    }

    /// Parse with a fixed delimiter, returning the frame and the number of skipped rows.
    fn parse_with(&self, bytes: &[u8], delimiter: u8) -> Result<(Frame, usize)> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(RealtyError::EmptyData("No columns found".to_string()));
        }
        let layout = Layout::from_headers(&headers)?;

        let mut records = Vec::new();
        let mut skipped = 0;
        for (row_idx, result) in reader.records().enumerate() {
            let row = result?;
            let cell = |i: usize| row.get(i).unwrap_or("");

            let location = cell(layout.location).trim();
            if location.is_empty() {
                log::warn!("Skipping row {}: empty location", row_idx + 2);
                skipped += 1;
                continue;
            }
            let Some(year) = parse_year(cell(layout.year)) else {
                log::warn!(
                    "Skipping row {}: unparseable year '{}'",
                    row_idx + 2,
                    cell(layout.year)
                );
                skipped += 1;
                continue;
            };

            let values = layout
                .metrics
                .iter()
                .map(|(i, _)| parse_number(cell(*i)))
                .collect();

            records.push(Record {
                location: location.to_string(),
                year,
                values,
                lat: layout.lat.and_then(|i| parse_number(cell(i))),
                lng: layout.lng.and_then(|i| parse_number(cell(i))),
            });
        }

        if records.is_empty() {
            return Err(RealtyError::EmptyData("No data rows found".to_string()));
        }

        let columns = layout.metrics.into_iter().map(|(_, name)| name).collect();
        Ok((Frame::new(columns, records), skipped))
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a cell represents a missing value.
pub fn is_null_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nil")
        || trimmed == "."
        || trimmed == "-"
}

/// Parse a numeric cell; nulls and non-finite numbers become `None`.
fn parse_number(value: &str) -> Option<f64> {
    if is_null_value(value) {
        return None;
    }
    let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a year cell; spreadsheet exports often write `2021.0`.
fn parse_year(value: &str) -> Option<i32> {
    let number = parse_number(value)?;
    if number.fract() != 0.0 || number < i32::MIN as f64 || number > i32::MAX as f64 {
        return None;
    }
    Some(number as i32)
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let lines: Vec<String> = BufReader::new(bytes)
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(RealtyError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // Consistent counts across lines beat a higher but ragged count
        let score = if counts.iter().all(|&c| c == first_count) {
            first_count * 1000
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
