//! Side-by-side comparison of two locations.

use indexmap::IndexMap;

use super::Outcome;
use crate::chart::{ChartType, multi_line_chart, sanitize};
use crate::columns::resolve_value_column;
use crate::dataset::{Frame, Record};
use crate::error::{RealtyError, Result};
use crate::filter::filter_two_locations;
use crate::intent::QueryDescriptor;
use crate::summary::{ComparisonOutcome, SummaryContext};

/// Latest value of each side decides the leader; ties and gaps have none.
fn leader(
    first: (&str, Option<f64>),
    second: (&str, Option<f64>),
) -> Option<ComparisonOutcome> {
    let (a, b) = (first.1?, second.1?);
    let (winner, loser, difference) = if a > b {
        (first.0, second.0, a - b)
    } else if b > a {
        (second.0, first.0, b - a)
    } else {
        return None;
    };
    Some(ComparisonOutcome {
        winner: winner.to_string(),
        loser: loser.to_string(),
        difference,
    })
}

pub(super) fn answer(descriptor: &QueryDescriptor, frame: &Frame) -> Result<Outcome> {
    let [first, second, ..] = descriptor.locations.as_slice() else {
        return Err(RealtyError::invalid_input(
            "Please mention two locations for comparison.",
        ));
    };
    let column = resolve_value_column(descriptor);

    let (first_frame, second_frame) =
        filter_two_locations(frame, first, second, &descriptor.window());
    if first_frame.is_empty() || second_frame.is_empty() {
        return Err(RealtyError::not_found(
            "Requested locations are missing in the data.",
        ));
    }
    let index = frame
        .column_index(column)
        .ok_or_else(|| RealtyError::missing_column(column))?;

    let latest = |f: &Frame| f.records().last().and_then(|r| sanitize(r.value(index)));
    let outcome = leader(
        (first.as_str(), latest(&first_frame)),
        (second.as_str(), latest(&second_frame)),
    );

    let mut table: Vec<Record> = first_frame
        .records()
        .iter()
        .chain(second_frame.records())
        .cloned()
        .collect();
    table.sort_by(|a, b| a.location.cmp(&b.location).then(a.year.cmp(&b.year)));
    let table_data = frame.with_records(table).to_rows();

    let mut frames = IndexMap::new();
    frames.insert(first.clone(), first_frame);
    frames.insert(second.clone(), second_frame);
    let chart_data = multi_line_chart(&frames, column)
        .ok_or_else(|| RealtyError::missing_column(column))?;

    Ok(Outcome {
        chart_type: ChartType::MultiLine,
        chart_data,
        table_data,
        context: SummaryContext {
            comparison: outcome,
            ..SummaryContext::default()
        },
    })
}
