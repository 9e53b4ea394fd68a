//! Chart payloads built from frames.
//!
//! Missing and non-finite values always come out as `null`, never zero.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dataset::{Frame, Point, Record};

/// Kind of chart the client should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    None,
    Bar,
    Line,
    MultiLine,
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartType::None => write!(f, "none"),
            ChartType::Bar => write!(f, "bar"),
            ChartType::Line => write!(f, "line"),
            ChartType::MultiLine => write!(f, "multi_line"),
        }
    }
}

/// Chart data in one of the supported shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartData {
    /// Several named series over shared labels.
    Multi {
        labels: Vec<String>,
        series: IndexMap<String, Vec<Option<f64>>>,
    },
    /// One series.
    Single {
        labels: Vec<String>,
        values: Vec<Option<f64>>,
    },
    /// No chart; serializes as `{}`.
    Empty {},
}

impl ChartData {
    pub fn empty() -> Self {
        ChartData::Empty {}
    }

    pub fn labels(&self) -> &[String] {
        match self {
            ChartData::Multi { labels, .. } | ChartData::Single { labels, .. } => labels,
            ChartData::Empty {} => &[],
        }
    }
}

/// Map missing or non-finite numbers to `None`.
pub fn sanitize(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn records_by_year(frame: &Frame) -> Vec<&Record> {
    let mut sorted: Vec<&Record> = frame.records().iter().collect();
    sorted.sort_by_key(|r| r.year);
    sorted
}

/// Bar payload over caller-supplied labels.
pub fn bar_chart(labels: Vec<String>, values: &[Option<f64>]) -> ChartData {
    ChartData::Single {
        labels,
        values: values.iter().map(|v| sanitize(*v)).collect(),
    }
}

/// Single series of one column, in chronological order.
///
/// Returns `None` when the column does not exist.
pub fn line_chart(frame: &Frame, column: &str) -> Option<ChartData> {
    let index = frame.column_index(column)?;
    let sorted = records_by_year(frame);
    Some(ChartData::Single {
        labels: sorted.iter().map(|r| r.year.to_string()).collect(),
        values: sorted.iter().map(|r| sanitize(r.value(index))).collect(),
    })
}

/// Single series from precomputed points, in chronological order.
pub fn line_chart_from_points(points: &[Point]) -> ChartData {
    let mut sorted: Vec<&Point> = points.iter().collect();
    sorted.sort_by_key(|p| p.year);
    ChartData::Single {
        labels: sorted
            .iter()
            .map(|p| p.year.map(|y| y.to_string()).unwrap_or_default())
            .collect(),
        values: sorted.iter().map(|p| sanitize(p.value)).collect(),
    }
}

/// One series per named frame over the sorted union of their labels.
///
/// A series with no record for a label gets `null` there; with several
/// records for one label, the first is used.
pub fn multi_line_chart(frames: &IndexMap<String, Frame>, column: &str) -> Option<ChartData> {
    let labels: Vec<String> = frames
        .values()
        .flat_map(|f| f.records().iter().map(|r| r.year.to_string()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut series = IndexMap::new();
    for (name, frame) in frames {
        let index = frame.column_index(column)?;
        let values = labels
            .iter()
            .map(|label| {
                frame
                    .records()
                    .iter()
                    .find(|r| r.year.to_string() == *label)
                    .and_then(|r| sanitize(r.value(index)))
            })
            .collect();
        series.insert(name.clone(), values);
    }

    Some(ChartData::Multi { labels, series })
}

/// One series per column of a single frame, sharing the frame's year order.
pub fn multi_line_from_columns(
    frame: &Frame,
    columns: &IndexMap<String, &str>,
) -> Option<ChartData> {
    let sorted = records_by_year(frame);
    let labels = sorted.iter().map(|r| r.year.to_string()).collect();

    let mut series = IndexMap::new();
    for (name, column) in columns {
        let index = frame.column_index(column)?;
        series.insert(
            name.clone(),
            sorted.iter().map(|r| sanitize(r.value(index))).collect(),
        );
    }

    Some(ChartData::Multi { labels, series })
}
