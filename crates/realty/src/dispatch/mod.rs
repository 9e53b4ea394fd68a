//! Routing of a parsed query to the strategy that answers it.

mod comparison;
mod coordinate;
mod ranking;
mod single;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analyst::AnalystConfig;
use crate::chart::{ChartData, ChartType};
use crate::dataset::Frame;
use crate::error::Result;
use crate::intent::{QueryDescriptor, Route};
use crate::summary::{SummaryContext, summarize};

pub use coordinate::{NearbyLocality, haversine_km};
pub use ranking::RankedLocation;

/// Complete answer to one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub summary: String,
    pub chart_type: ChartType,
    pub chart_data: ChartData,
    pub table_data: Vec<Value>,
}

/// What a strategy produced, before the summary is written.
#[derive(Debug)]
struct Outcome {
    chart_type: ChartType,
    chart_data: ChartData,
    table_data: Vec<Value>,
    context: SummaryContext,
}

/// Answer a descriptor against a frame.
///
/// The frame must be the caller's own copy of the dataset; strategies only
/// read it.
pub fn dispatch(
    descriptor: &QueryDescriptor,
    frame: &Frame,
    config: &AnalystConfig,
) -> Result<QueryResponse> {
    let route = descriptor.route();
    log::debug!("Routing {:?} to {:?}", descriptor.raw_query, route);

    let outcome = match route {
        Route::Coordinate => coordinate::answer(descriptor, frame, config)?,
        Route::Ranking => ranking::answer(descriptor, frame, config)?,
        Route::Comparison => comparison::answer(descriptor, frame)?,
        Route::Single => single::answer(descriptor, frame, config)?,
    };

    Ok(QueryResponse {
        summary: summarize(descriptor, &outcome.context, &config.region_name),
        chart_type: outcome.chart_type,
        chart_data: outcome.chart_data,
        table_data: outcome.table_data,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
