//! Coordinate lookups and nearest-locality search.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Outcome, round2};
use crate::analyst::AnalystConfig;
use crate::chart::{ChartData, ChartType, sanitize};
use crate::dataset::{
    Frame, LAT_COLUMN, LNG_COLUMN, LOCATION_COLUMN, normalize_location, number_or_null,
};
use crate::error::{RealtyError, Result};
use crate::filter::{TimeWindow, filter_dataset, latest_records_per_location};
use crate::intent::QueryDescriptor;
use crate::summary::{Coordinate, SummaryContext};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between two `(lat, lng)` points.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lng2) = (to.0.to_radians(), to.1.to_radians());
    let dlat = lat2 - lat1;
    let dlng = lng2 - lng1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// A neighbouring location and its distance from the base location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyLocality {
    #[serde(rename = "final location")]
    pub location: String,
    #[serde(rename = "loc_lat")]
    pub lat: Option<f64>,
    #[serde(rename = "loc_lng")]
    pub lng: Option<f64>,
    /// Rounded to two decimals; `None` when either side lacks coordinates.
    pub distance_km: Option<f64>,
}

fn position(lat: Option<f64>, lng: Option<f64>) -> Option<(f64, f64)> {
    Some((sanitize(lat)?, sanitize(lng)?))
}

/// Localities ordered by distance from `location`, nearest first.
///
/// Ties keep location-name order and localities without coordinates come
/// last. Each locality is placed by its most recent record.
pub fn nearby_localities(frame: &Frame, location: &str, limit: usize) -> Vec<NearbyLocality> {
    let target = normalize_location(location);
    let latest = latest_records_per_location(frame);

    let Some(base) = latest.records().iter().find(|r| r.is_location(&target)) else {
        return Vec::new();
    };
    let origin = position(base.lat, base.lng);

    let mut nearby: Vec<NearbyLocality> = latest
        .records()
        .iter()
        .filter(|r| !r.is_location(&target))
        .map(|r| {
            let here = position(r.lat, r.lng);
            NearbyLocality {
                location: r.location.clone(),
                lat: sanitize(r.lat),
                lng: sanitize(r.lng),
                distance_km: origin
                    .zip(here)
                    .map(|(from, to)| round2(haversine_km(from, to))),
            }
        })
        .collect();

    nearby.sort_by(|a, b| match (a.distance_km, b.distance_km) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    nearby.truncate(limit);
    nearby
}

pub(super) fn answer(
    descriptor: &QueryDescriptor,
    frame: &Frame,
    config: &AnalystConfig,
) -> Result<Outcome> {
    let location = descriptor.first_location().ok_or_else(|| {
        RealtyError::invalid_input("Please mention a location for coordinate queries.")
    })?;

    let history = filter_dataset(frame, Some(location), &TimeWindow::all());
    let latest = history
        .records()
        .last()
        .ok_or_else(|| RealtyError::not_found("Requested location is missing in the data."))?;
    let coordinate = Coordinate {
        lat: sanitize(latest.lat),
        lng: sanitize(latest.lng),
    };

    let mut context = SummaryContext {
        coordinate: Some(coordinate),
        ..SummaryContext::default()
    };

    let table_data = if descriptor.near {
        context.nearby = nearby_localities(frame, location, config.nearby_limit);
        log::debug!(
            "Found {} localities near {}",
            context.nearby.len(),
            location
        );
        context
            .nearby
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<_>>>()?
    } else {
        let mut row = Map::new();
        row.insert(LOCATION_COLUMN.to_string(), Value::from(location));
        row.insert(LAT_COLUMN.to_string(), number_or_null(coordinate.lat));
        row.insert(LNG_COLUMN.to_string(), number_or_null(coordinate.lng));
        vec![Value::Object(row)]
    };

    Ok(Outcome {
        chart_type: ChartType::None,
        chart_data: ChartData::empty(),
        table_data,
        context,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;

    fn frame() -> Frame {
        Frame::new(
            vec!["total units".to_string()],
            vec![
                Record::new("Baner", 2020, vec![Some(1.0)])
                    .with_coordinates(18.50, 73.70),
                Record::new("Baner", 2022, vec![Some(2.0)])
                    .with_coordinates(18.56, 73.78),
                Record::new("Aundh", 2022, vec![Some(3.0)])
                    .with_coordinates(18.56, 73.81),
                Record::new("Wakad", 2022, vec![Some(4.0)])
                    .with_coordinates(18.60, 73.76),
                Record::new("Kharadi", 2022, vec![Some(5.0)]),
                Record::new("Hadapsar", 2022, vec![Some(6.0)])
                    .with_coordinates(18.50, 73.93),
            ],
        )
    }

    #[test]
    fn test_haversine_zero_and_symmetric() {
        let a = (18.56, 73.78);
        let b = (18.60, 73.76);
        assert_eq!(haversine_km(a, a), 0.0);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
        assert!((haversine_km(a, b) - 4.92).abs() < 0.05);
    }

    #[test]
    fn test_nearby_uses_latest_coordinates() {
        let nearby = nearby_localities(&frame(), "baner", 3);
        let names: Vec<&str> = nearby.iter().map(|n| n.location.as_str()).collect();
        assert_eq!(names, vec!["Aundh", "Wakad", "Hadapsar"]);
        assert!(nearby.iter().all(|n| n.distance_km.is_some()));
    }

    #[test]
    fn test_nearby_missing_coordinates_sort_last() {
        let nearby = nearby_localities(&frame(), "Baner", 10);
        assert_eq!(nearby.len(), 4);
        assert_eq!(nearby[3].location, "Kharadi");
        assert_eq!(nearby[3].distance_km, None);
    }

    #[test]
    fn test_nearby_unknown_location() {
        assert!(nearby_localities(&frame(), "Pashan", 3).is_empty());
    }

    #[test]
    fn test_nearby_row_shape() {
        let nearby = nearby_localities(&frame(), "Baner", 1);
        let row = serde_json::to_value(&nearby[0]).unwrap();
        assert_eq!(row["final location"], "Aundh");
        assert_eq!(row["loc_lat"], 18.56);
        assert!(row["distance_km"].is_number());
    }
}
