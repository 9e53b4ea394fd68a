//! Location and time filtering plus cross-location aggregation.
//!
//! Every function here is pure: it reads a frame and returns a new one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dataset::{Frame, Point, Record, normalize_location};

/// Time constraints applied to a frame.
///
/// Year and range are applied first; `last_n_years` then keeps only the
/// most recent N distinct years that survived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub year: Option<i32>,
    pub year_range: Option<(i32, i32)>,
    pub last_n_years: Option<usize>,
}

impl TimeWindow {
    /// No time constraint.
    pub fn all() -> Self {
        Self::default()
    }

    fn admits(&self, year: i32) -> bool {
        if let Some((a, b)) = self.year_range {
            let (start, end) = if a <= b { (a, b) } else { (b, a) };
            if year < start || year > end {
                return false;
            }
        }
        self.year.is_none_or(|y| y == year)
    }
}

/// Keep only the records whose year is among the last `n` distinct years.
fn keep_last_years(records: Vec<Record>, n: Option<usize>) -> Vec<Record> {
    let Some(n) = n.filter(|n| *n > 0) else {
        return records;
    };
    if records.is_empty() {
        return records;
    }

    let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();
    let keep = &years[years.len().saturating_sub(n)..];

    records
        .into_iter()
        .filter(|r| keep.contains(&r.year))
        .collect()
}

/// Narrow a frame to one location (or all when `None`) and a time window.
///
/// The result is ordered by year; ties keep their original order.
pub fn filter_dataset(frame: &Frame, location: Option<&str>, window: &TimeWindow) -> Frame {
    let wanted = location.map(normalize_location);

    let mut records: Vec<Record> = frame
        .records()
        .iter()
        .filter(|r| wanted.as_deref().is_none_or(|loc| r.is_location(loc)))
        .filter(|r| window.admits(r.year))
        .cloned()
        .collect();
    records.sort_by_key(|r| r.year);

    frame.with_records(keep_last_years(records, window.last_n_years))
}

/// Apply identical filters to two locations independently.
pub fn filter_two_locations(
    frame: &Frame,
    first: &str,
    second: &str,
    window: &TimeWindow,
) -> (Frame, Frame) {
    (
        filter_dataset(frame, Some(first), window),
        filter_dataset(frame, Some(second), window),
    )
}

/// The most recent record of each location, ordered by location name.
///
/// When a location has several records for its latest year, the first one in
/// dataset order wins.
pub fn latest_records_per_location(frame: &Frame) -> Frame {
    let mut sorted: Vec<&Record> = frame.records().iter().collect();
    sorted.sort_by(|a, b| a.location.cmp(&b.location).then(a.year.cmp(&b.year)));

    let mut latest: Vec<Record> = Vec::new();
    for group in sorted.chunk_by(|a, b| a.location == b.location) {
        let max_year = group.iter().map(|r| r.year).max();
        if let Some(record) = group.iter().find(|r| Some(r.year) == max_year) {
            latest.push((*record).clone());
        }
    }

    frame.with_records(latest)
}

/// One entry per location for ranking: the records of `year` if given,
/// otherwise each location's latest record.
pub fn ranking_frame(frame: &Frame, year: Option<i32>) -> Frame {
    match year {
        Some(year) => frame.with_records(
            frame
                .records()
                .iter()
                .filter(|r| r.year == year)
                .cloned()
                .collect(),
        ),
        None => latest_records_per_location(frame),
    }
}

/// Filter across several (or all, when `None`/empty) locations.
///
/// The result is ordered by (location, year).
pub fn aggregate_across_locations(
    frame: &Frame,
    locations: Option<&[String]>,
    window: &TimeWindow,
) -> Frame {
    let wanted: Vec<String> = locations
        .unwrap_or_default()
        .iter()
        .map(|l| normalize_location(l))
        .collect();

    let mut records: Vec<Record> = frame
        .records()
        .iter()
        .filter(|r| wanted.is_empty() || wanted.iter().any(|w| r.is_location(w)))
        .filter(|r| window.admits(r.year))
        .cloned()
        .collect();
    records.sort_by(|a, b| a.location.cmp(&b.location).then(a.year.cmp(&b.year)));

    frame.with_records(keep_last_years(records, window.last_n_years))
}

/// Sum a column per year, ascending by year. Nulls are skipped, so a year
/// with only nulls sums to zero.
pub fn sum_by_year(frame: &Frame, column: &str) -> Option<Vec<Point>> {
    let index = frame.column_index(column)?;

    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
    for record in frame.records() {
        *totals.entry(record.year).or_insert(0.0) += record.value(index).unwrap_or(0.0);
    }

    Some(
        totals
            .into_iter()
            .map(|(year, total)| Point {
                year: Some(year),
                value: Some(total),
            })
            .collect(),
    )
}

/// Sum every non-null value of a column.
pub fn column_total(frame: &Frame, column: &str) -> Option<f64> {
    let index = frame.column_index(column)?;
    Some(frame.records().iter().filter_map(|r| r.value(index)).sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        let rec = |loc: &str, year: i32, v: Option<f64>| Record::new(loc, year, vec![v]);
        Frame::new(
            vec!["total units".to_string()],
            vec![
                rec("Wakad", 2022, Some(30.0)),
                rec("Baner", 2020, Some(5.0)),
                rec("Wakad", 2020, Some(10.0)),
                rec("Wakad", 2021, None),
                rec("Baner", 2022, Some(7.0)),
                rec("wakad ", 2019, Some(1.0)),
            ],
        )
    }

    fn years(frame: &Frame) -> Vec<i32> {
        frame.records().iter().map(|r| r.year).collect()
    }

    #[test]
    fn test_filter_by_location_is_case_insensitive_and_sorted() {
        let result = filter_dataset(&frame(), Some(" WAKAD"), &TimeWindow::all());
        assert_eq!(years(&result), vec![2019, 2020, 2021, 2022]);
    }

    #[test]
    fn test_filter_by_range_then_last_n() {
        let window = TimeWindow {
            year_range: Some((2022, 2020)),
            last_n_years: Some(2),
            ..TimeWindow::default()
        };
        let result = filter_dataset(&frame(), Some("wakad"), &window);
        assert_eq!(years(&result), vec![2021, 2022]);
    }

    #[test]
    fn test_last_n_counts_available_years_only() {
        let window = TimeWindow {
            last_n_years: Some(10),
            ..TimeWindow::default()
        };
        let result = filter_dataset(&frame(), Some("baner"), &window);
        assert_eq!(years(&result), vec![2020, 2022]);
    }

    #[test]
    fn test_single_year() {
        let window = TimeWindow {
            year: Some(2020),
            ..TimeWindow::default()
        };
        let result = filter_dataset(&frame(), None, &window);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_latest_records_per_location() {
        let latest = latest_records_per_location(&frame());
        let picked: Vec<(&str, i32)> = latest
            .records()
            .iter()
            .map(|r| (r.location.as_str(), r.year))
            .collect();
        // Display names differing only by case stay distinct groups
        assert_eq!(
            picked,
            vec![("Baner", 2022), ("Wakad", 2022), ("wakad ", 2019)]
        );
    }

    #[test]
    fn test_ranking_frame_with_year_keeps_dataset_order() {
        let result = ranking_frame(&frame(), Some(2022));
        let names: Vec<&str> = result
            .records()
            .iter()
            .map(|r| r.location.as_str())
            .collect();
        assert_eq!(names, vec!["Wakad", "Baner"]);
    }

    #[test]
    fn test_sum_by_year_skips_nulls() {
        let points = sum_by_year(&frame(), "total units").unwrap();
        let sums: Vec<(Option<i32>, Option<f64>)> =
            points.iter().map(|p| (p.year, p.value)).collect();
        assert_eq!(
            sums,
            vec![
                (Some(2019), Some(1.0)),
                (Some(2020), Some(15.0)),
                (Some(2021), Some(0.0)),
                (Some(2022), Some(37.0)),
            ]
        );
        assert!(sum_by_year(&frame(), "nope").is_none());
    }

    #[test]
    fn test_aggregate_across_named_locations() {
        let names = vec!["Baner".to_string()];
        let result = aggregate_across_locations(&frame(), Some(&names), &TimeWindow::all());
        assert_eq!(result.len(), 2);
        assert_eq!(column_total(&result, "total units"), Some(12.0));
    }
}
