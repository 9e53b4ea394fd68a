//! The structured intent extracted from one query.

use serde::{Deserialize, Serialize};

use crate::filter::TimeWindow;

/// Which column family a query is about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Price,
    Demand,
    Supply,
    Sales,
    #[default]
    General,
}

impl Metric {
    /// Short label used in chart series names.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Price => "Price",
            Metric::Demand => "Demand",
            Metric::Supply => "Supply",
            Metric::Sales => "Sales",
            Metric::General => "Metric",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Price => write!(f, "price"),
            Metric::Demand => write!(f, "demand"),
            Metric::Supply => write!(f, "supply"),
            Metric::Sales => write!(f, "sales"),
            Metric::General => write!(f, "general"),
        }
    }
}

/// A dataset segment that refines a metric's column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Flat,
    Office,
    Shop,
    CarpetArea,
}

impl PropertyType {
    /// Title-cased label used in chart series names.
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Flat => "Flat",
            PropertyType::Office => "Office",
            PropertyType::Shop => "Shop",
            PropertyType::CarpetArea => "Carpet Area",
        }
    }

    /// Plural phrase used in narrative sentences.
    pub fn phrase(&self) -> &'static str {
        match self {
            PropertyType::Flat => "flats",
            PropertyType::Office => "offices",
            PropertyType::Shop => "shops",
            PropertyType::CarpetArea => "carpet area supplied",
        }
    }
}

/// Sort direction of a ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankingOrder {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    #[default]
    Descending,
}

/// A summary statistic the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Average,
    Max,
    Min,
    GrowthRate,
}

/// Which aggregation strategy answers a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Coordinates of a location, optionally with its nearest neighbours.
    Coordinate,
    /// Cross-location top/bottom-N.
    Ranking,
    /// Two locations side by side.
    Comparison,
    /// One location, or an all-locations aggregate.
    Single,
}

/// Structured intent of a query.
///
/// Built once by [`IntentExtractor`](super::IntentExtractor) and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// Trimmed query text.
    pub raw_query: String,
    /// Up to two resolved locations, in canonical list order.
    pub locations: Vec<String>,
    pub metric: Metric,
    /// Detected property types, first-seen order, no duplicates.
    pub property_types: Vec<PropertyType>,
    pub comparison: bool,
    /// Cross-location ranking; only set when no location was resolved.
    pub ranking: bool,
    pub ranking_order: RankingOrder,
    /// Explicit "top N" limit.
    pub ranking_limit: Option<usize>,
    pub coordinate: bool,
    pub near: bool,
    pub year: Option<i32>,
    /// Inclusive, sorted year range.
    pub year_range: Option<(i32, i32)>,
    pub last_n_years: Option<usize>,
    pub stats: Vec<StatKind>,
    /// Superlative about a named location; never set together with `ranking`.
    pub extrema: bool,
    pub general_insight: bool,
    pub all_locations: bool,
}

impl QueryDescriptor {
    /// Select the aggregation strategy. First match wins.
    pub fn route(&self) -> Route {
        if self.coordinate || self.near {
            Route::Coordinate
        } else if self.ranking {
            Route::Ranking
        } else if self.comparison && self.locations.len() >= 2 {
            Route::Comparison
        } else {
            Route::Single
        }
    }

    /// Time constraints as a filter window.
    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            year: self.year,
            year_range: self.year_range,
            last_n_years: self.last_n_years,
        }
    }

    pub fn first_location(&self) -> Option<&str> {
        self.locations.first().map(String::as_str)
    }
}
