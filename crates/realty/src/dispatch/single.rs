//! One location over time, or every location summed per year.

use serde_json::{Map, Value};

use super::Outcome;
use crate::analyst::AnalystConfig;
use crate::chart::{
    ChartType, bar_chart, line_chart, line_chart_from_points, multi_line_from_columns,
};
use crate::columns::{multi_property_columns, resolve_value_column};
use crate::dataset::{Frame, Point, YEAR_COLUMN, number_or_null};
use crate::error::{RealtyError, Result};
use crate::filter::{aggregate_across_locations, column_total, filter_dataset, sum_by_year};
use crate::intent::QueryDescriptor;
use crate::stats::compute_stats;
use crate::summary::SummaryContext;

fn year_row(column: &str, point: &Point) -> Value {
    let mut row = Map::new();
    row.insert(YEAR_COLUMN.to_string(), Value::from(point.year));
    row.insert(column.to_string(), number_or_null(point.value));
    Value::Object(row)
}

pub(super) fn answer(
    descriptor: &QueryDescriptor,
    frame: &Frame,
    config: &AnalystConfig,
) -> Result<Outcome> {
    match descriptor.first_location() {
        None if descriptor.all_locations => aggregate(descriptor, frame, config),
        None => Err(RealtyError::invalid_input(
            "Please mention at least one location in your query.",
        )),
        Some(location) => single_location(descriptor, frame, location),
    }
}

fn aggregate(
    descriptor: &QueryDescriptor,
    frame: &Frame,
    config: &AnalystConfig,
) -> Result<Outcome> {
    let column = resolve_value_column(descriptor);
    let working = aggregate_across_locations(frame, None, &descriptor.window());
    if working.is_empty() {
        return Err(RealtyError::not_found(format!(
            "No matching data was found for {}-wide query.",
            config.region_name
        )));
    }
    if !working.has_column(column) {
        return Err(RealtyError::missing_column(column));
    }

    let (points, chart_data) = match (descriptor.year, descriptor.year_range) {
        (Some(year), None) => {
            let total = column_total(&working, column);
            let points = vec![Point {
                year: Some(year),
                value: total,
            }];
            (points, bar_chart(vec![year.to_string()], &[total]))
        }
        _ => {
            let points = sum_by_year(&working, column)
                .ok_or_else(|| RealtyError::missing_column(column))?;
            let chart = line_chart_from_points(&points);
            (points, chart)
        }
    };
    log::debug!(
        "Aggregated {:?} over {} rows into {} buckets",
        column,
        working.len(),
        points.len()
    );

    let table_data: Vec<Value> = points.iter().map(|p| year_row(column, p)).collect();
    let chart_type = if table_data.len() > 1 {
        ChartType::Line
    } else {
        ChartType::Bar
    };

    Ok(Outcome {
        chart_type,
        chart_data,
        table_data,
        context: SummaryContext {
            stats: compute_stats(&points, &descriptor.stats),
            ..SummaryContext::default()
        },
    })
}

fn single_location(descriptor: &QueryDescriptor, frame: &Frame, location: &str) -> Result<Outcome> {
    let column = resolve_value_column(descriptor);
    let per_property = multi_property_columns(descriptor);

    let filtered = filter_dataset(frame, Some(location), &descriptor.window());
    if filtered.is_empty() {
        return Err(RealtyError::not_found(
            "Requested location is missing in the data.",
        ));
    }
    if let Some(missing) = std::iter::once(&column)
        .chain(per_property.values())
        .find(|c| !filtered.has_column(c))
    {
        return Err(RealtyError::missing_column(*missing));
    }

    let (chart_type, chart_data) = if per_property.is_empty() {
        (ChartType::Line, line_chart(&filtered, column))
    } else {
        (
            ChartType::MultiLine,
            multi_line_from_columns(&filtered, &per_property),
        )
    };
    let missing_column = || RealtyError::missing_column(column);
    let chart_data = chart_data.ok_or_else(missing_column)?;
    let points = filtered.points(column).ok_or_else(missing_column)?;

    Ok(Outcome {
        chart_type,
        chart_data,
        table_data: filtered.to_rows(),
        context: SummaryContext {
            stats: compute_stats(&points, &descriptor.stats),
            ..SummaryContext::default()
        },
    })
}
