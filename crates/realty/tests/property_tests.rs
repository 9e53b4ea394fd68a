//! Property-based tests for Realty.
//!
//! These tests use proptest to generate random queries and datasets and
//! verify that parsing, ranking, charting and statistics keep their
//! invariants under all conditions.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p realty --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p realty --test property_tests
//! ```

use proptest::prelude::*;

use realty::chart::{ChartData, line_chart};
use realty::dataset::Point;
use realty::dispatch::haversine_km;
use realty::intent::StatKind;
use realty::stats::compute_stats;
use realty::{AnalystConfig, Frame, IntentExtractor, Record, dispatch};

const LOCATIONS: &[&str] = &["Aundh", "Baner", "Hinjewadi", "Kharadi", "Wakad"];
const PRICE: &str = "flat - weighted average rate";
const KEYWORDS: &[&str] = &[
    "top", "compare", "price", "demand", "near", "last", "years", "which", "overall",
];

// =============================================================================
// Test Strategies
// =============================================================================

/// Free text mixing keywords, locations, numbers and noise.
fn query_like() -> impl Strategy<Value = String> {
    let word = prop_oneof![
        prop::sample::select(KEYWORDS).prop_map(str::to_string),
        "20[0-3][0-9]",
        "[0-9]{1,3}",
        prop::sample::select(LOCATIONS).prop_map(str::to_string),
        "[a-zA-Z]{1,10}",
    ];
    prop::collection::vec(word, 0..12)
        .prop_map(|words| words.join(" "))
}

fn latitude() -> impl Strategy<Value = f64> {
    -90.0f64..90.0
}

fn longitude() -> impl Strategy<Value = f64> {
    -180.0f64..180.0
}

fn maybe_value() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(-1.0e6f64..1.0e6)
}

/// A metric cell that may be missing or NaN.
fn ranking_value() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        4 => (-1.0e6f64..1.0e6).prop_map(Some),
        1 => Just(Some(f64::NAN)),
        1 => Just(None),
    ]
}

// =============================================================================
// Intent Extraction
// =============================================================================

proptest! {
    #[test]
    fn parsing_is_deterministic(query in query_like()) {
        let extractor = IntentExtractor::new(LOCATIONS).unwrap();
        prop_assert_eq!(extractor.parse(&query), extractor.parse(&query));
    }

    #[test]
    fn parsing_never_panics(query in "\\PC{0,200}") {
        let extractor = IntentExtractor::new(LOCATIONS).unwrap();
        let _ = extractor.parse(&query);
    }

    #[test]
    fn locations_follow_list_order(
        a in prop::sample::select(LOCATIONS),
        b in prop::sample::select(LOCATIONS),
    ) {
        prop_assume!(a != b);
        let extractor = IntentExtractor::new(LOCATIONS).unwrap();

        let forward = extractor.parse(&format!("{a} and {b} price"));
        let backward = extractor.parse(&format!("{b} and {a} price"));

        prop_assert_eq!(&forward.locations, &backward.locations);
        let positions: Vec<usize> = forward
            .locations
            .iter()
            .map(|l| LOCATIONS.iter().position(|k| *k == l.as_str()).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn ranking_and_extrema_are_exclusive(query in query_like()) {
        let extractor = IntentExtractor::new(LOCATIONS).unwrap();
        let d = extractor.parse(&query);
        prop_assert!(!(d.ranking && d.extrema));
        if d.ranking {
            prop_assert!(d.locations.is_empty());
        }
    }
}

// =============================================================================
// Distance
// =============================================================================

proptest! {
    #[test]
    fn haversine_is_symmetric(
        lat1 in latitude(), lng1 in longitude(),
        lat2 in latitude(), lng2 in longitude(),
    ) {
        let there = haversine_km((lat1, lng1), (lat2, lng2));
        let back = haversine_km((lat2, lng2), (lat1, lng1));
        prop_assert!(there >= 0.0);
        prop_assert!((there - back).abs() < 1e-6);
        // Never more than half the circumference
        prop_assert!(there <= std::f64::consts::PI * 6371.0 + 1e-6);
    }
}

// =============================================================================
// Ranking, Charts and Statistics
// =============================================================================

proptest! {
    #[test]
    fn ranking_ties_keep_location_order(value in 1.0f64..1.0e5, n in 2usize..5) {
        let records = LOCATIONS[..n]
            .iter()
            .rev()
            .map(|loc| Record::new(*loc, 2023, vec![Some(value)]))
            .collect();
        let frame = Frame::new(vec![PRICE.to_string()], records);
        let extractor = IntentExtractor::new(&frame.locations()).unwrap();

        let descriptor = extractor.parse(&format!("top {n} by price"));
        let config = AnalystConfig::default();
        let response = dispatch(&descriptor, &frame, &config).unwrap();

        let expected: Vec<&str> = LOCATIONS[..n].to_vec();
        prop_assert_eq!(response.chart_data.labels(), expected.as_slice());
    }

    #[test]
    fn ranking_orders_finite_values(
        values in prop::collection::vec(ranking_value(), LOCATIONS.len()),
        ascending in any::<bool>(),
    ) {
        let records = LOCATIONS
            .iter()
            .zip(&values)
            .map(|(loc, v)| Record::new(*loc, 2023, vec![*v]))
            .collect();
        let frame = Frame::new(vec![PRICE.to_string()], records);
        let extractor = IntentExtractor::new(&frame.locations()).unwrap();

        let query = if ascending { "bottom locations by price" } else { "top 5 by price" };
        let descriptor = extractor.parse(query);
        prop_assert!(descriptor.ranking);

        let finite = values.iter().flatten().filter(|v| v.is_finite()).count();
        let result = dispatch(&descriptor, &frame, &AnalystConfig::default());
        if finite == 0 {
            prop_assert!(result.is_err());
            return Ok(());
        }

        let ranked: Vec<f64> = result
            .unwrap()
            .table_data
            .iter()
            .map(|row| row["value"].as_f64().unwrap())
            .collect();
        prop_assert_eq!(ranked.len(), finite);
        for pair in ranked.windows(2) {
            if ascending {
                prop_assert!(pair[0] <= pair[1]);
            } else {
                prop_assert!(pair[0] >= pair[1]);
            }
        }
    }

    #[test]
    fn line_chart_preserves_nulls(values in prop::collection::vec(maybe_value(), 1..20)) {
        let records = values
            .iter()
            .enumerate()
            .map(|(i, v)| Record::new("Baner", 2000 + i as i32, vec![*v]))
            .collect();
        let frame = Frame::new(vec![PRICE.to_string()], records);

        let Some(ChartData::Single { values: charted, .. }) = line_chart(&frame, PRICE) else {
            panic!("expected single-series chart");
        };
        prop_assert_eq!(charted, values);
    }

    #[test]
    fn growth_needs_nonzero_start(
        rest in prop::collection::vec(maybe_value(), 0..10),
    ) {
        let mut points = vec![Point { year: Some(2000), value: Some(0.0) }];
        points.extend(rest.iter().enumerate().map(|(i, v)| Point {
            year: Some(2001 + i as i32),
            value: *v,
        }));

        let stats = compute_stats(&points, &[StatKind::GrowthRate]);
        prop_assert!(stats.growth_rate.is_none());
    }

    #[test]
    fn growth_needs_two_values(value in maybe_value()) {
        let points = vec![
            Point { year: Some(2020), value },
            Point { year: Some(2021), value: None },
        ];
        let stats = compute_stats(&points, &[StatKind::GrowthRate, StatKind::Average]);
        prop_assert!(stats.growth_rate.is_none());
        prop_assert_eq!(stats.average.is_some(), value.is_some());
    }
}
