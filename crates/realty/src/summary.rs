//! One-sentence narrative summaries of query results.

use crate::dispatch::{NearbyLocality, RankedLocation};
use crate::intent::{Metric, QueryDescriptor, Route};
use crate::stats::Stats;

const NO_RANKING_DATA: &str = "No ranking data was available for the requested metric.";
const NO_LOCATION_FOUND: &str =
    "No matching location was found in the dataset. Please refine the query.";

/// Coordinates found for the requested location.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coordinate {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Outcome of a two-location comparison that has a clear leader.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonOutcome {
    pub winner: String,
    pub loser: String,
    pub difference: f64,
}

/// Result details a strategy hands to the summarizer.
#[derive(Debug, Clone, Default)]
pub struct SummaryContext {
    pub coordinate: Option<Coordinate>,
    pub nearby: Vec<NearbyLocality>,
    pub ranking: Vec<RankedLocation>,
    pub comparison: Option<ComparisonOutcome>,
    pub stats: Stats,
}

/// Human-readable form of a number.
///
/// ```
/// use realty::summary::format_value;
///
/// assert_eq!(format_value(Some(2_500_000.0)), "2.50M");
/// assert_eq!(format_value(Some(1234.0)), "1.2K");
/// assert_eq!(format_value(Some(42.0)), "42");
/// assert_eq!(format_value(None), "N/A");
/// ```
pub fn format_value(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return "N/A".to_string();
    };

    let absolute = value.abs();
    if absolute >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if absolute >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if absolute >= 1e3 {
        format!("{:.1}K", value / 1e3)
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

fn base_phrase(metric: Metric) -> &'static str {
    match metric {
        Metric::Price => "pricing trends",
        Metric::Demand => "buyer demand",
        Metric::Sales => "sales values",
        Metric::Supply => "new supply and inventory levels",
        Metric::General => "overall performance metrics",
    }
}

/// What the query is about, e.g. "pricing trends for flats & shops".
pub fn metric_phrase(descriptor: &QueryDescriptor) -> String {
    let base = base_phrase(descriptor.metric);
    if descriptor.property_types.is_empty() {
        return base.to_string();
    }
    let properties: Vec<&str> = descriptor
        .property_types
        .iter()
        .map(|p| p.phrase())
        .collect();
    format!("{base} for {}", properties.join(" & "))
}

/// The time window in words.
pub fn time_phrase(descriptor: &QueryDescriptor) -> String {
    if let Some(year) = descriptor.year {
        format!("in {year}")
    } else if let Some((start, end)) = descriptor.year_range {
        format!("from {start} to {end}")
    } else if let Some(n) = descriptor.last_n_years {
        format!("across the last {n} years")
    } else {
        "across the available years".to_string()
    }
}

/// " Key stats: ..." suffix, or empty when nothing was computed.
pub fn stats_sentence(stats: &Stats) -> String {
    let year_suffix = |year: Option<i32>| year.map(|y| format!(" in {y}")).unwrap_or_default();

    let mut parts = Vec::new();
    if let Some(average) = stats.average {
        parts.push(format!("average {}", format_value(Some(average))));
    }
    if let Some(max) = stats.max {
        parts.push(format!(
            "peak of {}{}",
            format_value(Some(max.value)),
            year_suffix(max.year)
        ));
    }
    if let Some(min) = stats.min {
        parts.push(format!(
            "lowest value of {}{}",
            format_value(Some(min.value)),
            year_suffix(min.year)
        ));
    }
    if let Some(growth) = stats.growth_rate {
        parts.push(format!(
            "{} of {}% across the selected years",
            growth.direction,
            format_value(Some(growth.value))
        ));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!(" Key stats: {}.", parts.join("; "))
    }
}

/// Compose the summary sentence for a descriptor and its result.
///
/// `region` names the area covered by the whole dataset.
pub fn summarize(descriptor: &QueryDescriptor, context: &SummaryContext, region: &str) -> String {
    match descriptor.route() {
        Route::Coordinate => coordinate_summary(descriptor, context),
        Route::Ranking => ranking_summary(descriptor, context),
        Route::Comparison => comparison_summary(descriptor, context),
        Route::Single => single_summary(descriptor, context, region),
    }
}

fn coordinate_summary(descriptor: &QueryDescriptor, context: &SummaryContext) -> String {
    if descriptor.coordinate {
        let location = descriptor
            .first_location()
            .unwrap_or("the requested location");
        let coordinate = context.coordinate.unwrap_or_default();
        return match (coordinate.lat, coordinate.lng) {
            (Some(lat), Some(lng)) => format!(
                "Coordinates for {location}: lat {}, lng {}.",
                format_value(Some(lat)),
                format_value(Some(lng))
            ),
            _ => format!("Latitude/longitude for {location} could not be located in the dataset."),
        };
    }

    let location = descriptor.first_location().unwrap_or("the target locality");
    if context.nearby.is_empty() {
        return format!("No nearby localities were detected for {location}.");
    }
    let names: Vec<&str> = context
        .nearby
        .iter()
        .map(|n| n.location.as_str())
        .collect();
    format!(
        "Localities closest to {location} include {}.",
        names.join(", ")
    )
}

fn ranking_summary(descriptor: &QueryDescriptor, context: &SummaryContext) -> String {
    let Some(top) = context.ranking.first() else {
        return NO_RANKING_DATA.to_string();
    };
    format!(
        "{} leads {} in {} with {}.",
        top.location,
        metric_phrase(descriptor),
        top.year,
        format_value(Some(top.value))
    )
}

fn comparison_summary(descriptor: &QueryDescriptor, context: &SummaryContext) -> String {
    match &context.comparison {
        Some(outcome) => format!(
            "{} currently outperforms {} for {} by {}. Use the chart to inspect the year-wise divergence.",
            outcome.winner,
            outcome.loser,
            metric_phrase(descriptor),
            format_value(Some(outcome.difference))
        ),
        None => format!(
            "Comparing {} between {} and {} {}.",
            metric_phrase(descriptor),
            descriptor.locations[0],
            descriptor.locations[1],
            time_phrase(descriptor)
        ),
    }
}

fn single_summary(descriptor: &QueryDescriptor, context: &SummaryContext, region: &str) -> String {
    match descriptor.first_location() {
        Some(location) if descriptor.general_insight => format!(
            "Overview of {} for {location} {}.",
            metric_phrase(descriptor),
            time_phrase(descriptor)
        ),
        Some(location) => format!(
            "Showing {} for {location} {}.{}",
            metric_phrase(descriptor),
            time_phrase(descriptor),
            stats_sentence(&context.stats)
        ),
        None if descriptor.all_locations => format!(
            "Aggregated {} across {region} {}.{}",
            metric_phrase(descriptor),
            time_phrase(descriptor),
            stats_sentence(&context.stats)
        ),
        None => NO_LOCATION_FOUND.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::parse_query;
    use crate::stats::{Direction, Extremum, GrowthRate};

    const LOCATIONS: &[&str] = &["Baner", "Wakad"];

    fn descriptor(query: &str) -> QueryDescriptor {
        parse_query(query, LOCATIONS).unwrap()
    }

    #[test]
    fn test_format_value_thresholds() {
        assert_eq!(format_value(Some(1_234_567_890.0)), "1.23B");
        assert_eq!(format_value(Some(-2_000_000.0)), "-2.00M");
        assert_eq!(format_value(Some(999.5)), "999.50");
        assert_eq!(format_value(Some(1000.0)), "1.0K");
        assert_eq!(format_value(Some(7.0)), "7");
        assert_eq!(format_value(Some(f64::NAN)), "N/A");
    }

    #[test]
    fn test_metric_phrase_lists_properties() {
        let d = descriptor("Baner flat and shop price");
        assert_eq!(metric_phrase(&d), "pricing trends for flats & shops");
    }

    #[test]
    fn test_time_phrases() {
        assert_eq!(time_phrase(&descriptor("Baner price in 2022")), "in 2022");
        assert_eq!(
            time_phrase(&descriptor("Baner price 2019 to 2021")),
            "from 2019 to 2021"
        );
        assert_eq!(
            time_phrase(&descriptor("Baner price last 3 years")),
            "across the last 3 years"
        );
        assert_eq!(
            time_phrase(&descriptor("Baner price")),
            "across the available years"
        );
    }

    #[test]
    fn test_stats_sentence() {
        let stats = Stats {
            average: Some(1500.0),
            max: Some(Extremum { value: 2000.0, year: Some(2022) }),
            min: None,
            growth_rate: Some(GrowthRate { value: 12.5, direction: Direction::Increase }),
        };
        assert_eq!(
            stats_sentence(&stats),
            " Key stats: average 1.5K; peak of 2.0K in 2022; increase of 12.50% across the selected years."
        );
        assert_eq!(stats_sentence(&Stats::default()), "");
    }

    #[test]
    fn test_coordinate_summary() {
        let d = descriptor("coordinates of Baner");
        let context = SummaryContext {
            coordinate: Some(Coordinate { lat: Some(18.56), lng: Some(73.78) }),
            ..SummaryContext::default()
        };
        assert_eq!(
            summarize(&d, &context, "Pune"),
            "Coordinates for Baner: lat 18.56, lng 73.78."
        );
        assert_eq!(
            summarize(&d, &SummaryContext::default(), "Pune"),
            "Latitude/longitude for Baner could not be located in the dataset."
        );
    }

    #[test]
    fn test_near_summary_without_results() {
        let d = descriptor("localities near Wakad");
        assert_eq!(
            summarize(&d, &SummaryContext::default(), "Pune"),
            "No nearby localities were detected for Wakad."
        );
    }

    #[test]
    fn test_comparison_summary() {
        let d = descriptor("compare Baner and Wakad price");
        let context = SummaryContext {
            comparison: Some(ComparisonOutcome {
                winner: "Wakad".into(),
                loser: "Baner".into(),
                difference: 1500.0,
            }),
            ..SummaryContext::default()
        };
        assert_eq!(
            summarize(&d, &context, "Pune"),
            "Wakad currently outperforms Baner for pricing trends by 1.5K. \
             Use the chart to inspect the year-wise divergence."
        );
        assert_eq!(
            summarize(&d, &SummaryContext::default(), "Pune"),
            "Comparing pricing trends between Baner and Wakad across the available years."
        );
    }

    #[test]
    fn test_single_location_summaries() {
        let context = SummaryContext {
            stats: Stats { average: Some(10.0), ..Stats::default() },
            ..SummaryContext::default()
        };
        assert_eq!(
            summarize(&descriptor("average price in Baner"), &context, "Pune"),
            "Showing pricing trends for Baner across the available years. Key stats: average 10."
        );
        assert_eq!(
            summarize(&descriptor("Baner overview"), &context, "Pune"),
            "Overview of overall performance metrics for Baner across the available years."
        );
        assert_eq!(
            summarize(&descriptor("price trends in Hadapsar"), &context, "Pune"),
            "No matching location was found in the dataset. Please refine the query."
        );
    }

    #[test]
    fn test_region_name_is_configurable() {
        let d = descriptor("total supply across all locations in 2022");
        assert!(d.all_locations);
        assert_eq!(
            summarize(&d, &SummaryContext::default(), "Mumbai"),
            "Aggregated new supply and inventory levels across Mumbai in 2022."
        );
    }
}
