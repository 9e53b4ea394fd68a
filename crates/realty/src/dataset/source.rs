//! Provenance and coverage of a loaded market dataset.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::frame::Frame;

/// What the loader read, and what it kept.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSource {
    pub path: PathBuf,
    /// `sha256:<hex>` of the raw file bytes.
    pub hash: String,
    pub delimiter: char,
    /// Rows kept in the frame.
    pub row_count: usize,
    /// Rows dropped for a blank location or an unreadable year.
    pub skipped_rows: usize,
    pub location_count: usize,
    /// Earliest and latest year present.
    pub year_span: Option<(i32, i32)>,
    pub metric_columns: Vec<String>,
    /// Whether any record carries coordinates.
    pub has_coordinates: bool,
    pub loaded_at: DateTime<Utc>,
}

impl DatasetSource {
    /// Summarize a freshly parsed frame.
    pub fn describe(
        path: PathBuf,
        hash: String,
        delimiter: u8,
        frame: &Frame,
        skipped_rows: usize,
    ) -> Self {
        let records = frame.records();
        let years = frame.years();

        Self {
            path,
            hash,
            delimiter: delimiter as char,
            row_count: records.len(),
            skipped_rows,
            location_count: frame.locations().len(),
            year_span: years.first().copied().zip(years.last().copied()),
            metric_columns: frame.columns().to_vec(),
            has_coordinates: records.iter().any(|r| r.lat.is_some() && r.lng.is_some()),
            loaded_at: Utc::now(),
        }
    }

    /// File name without its directory.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;

    #[test]
    fn test_describe_coverage() {
        let frame = Frame::new(
            vec!["total units".to_string()],
            vec![
                Record::new("Wakad", 2023, vec![Some(1.0)]),
                Record::new("Baner", 2019, vec![None])
                    .with_coordinates(18.5, 73.7),
                Record::new("Wakad", 2021, vec![Some(2.0)]),
            ],
        );
        let source = DatasetSource::describe(
            PathBuf::from("/data/pune market.csv"),
            "sha256:00".to_string(),
            b';',
            &frame,
            2,
        );

        assert_eq!(source.file_name(), "pune market.csv");
        assert_eq!(source.delimiter, ';');
        assert_eq!(source.row_count, 3);
        assert_eq!(source.skipped_rows, 2);
        assert_eq!(source.location_count, 2);
        assert_eq!(source.year_span, Some((2019, 2023)));
        assert_eq!(source.metric_columns, vec!["total units".to_string()]);
        assert!(source.has_coordinates);
    }

    #[test]
    fn test_no_coordinates() {
        let frame = Frame::new(
            vec![],
            vec![Record::new("Aundh", 2022, vec![])],
        );
        let source = DatasetSource::describe(PathBuf::new(), String::new(), b',', &frame, 0);
        assert!(!source.has_coordinates);
        assert_eq!(source.year_span, Some((2022, 2022)));
        assert_eq!(source.file_name(), "");
    }
}
