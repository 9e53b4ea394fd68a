//! Ordered keyword tables driving intent extraction.
//!
//! Table order is significant: earlier entries take precedence.

use super::descriptor::{Metric, PropertyType, StatKind};

/// Metric keywords (substring match), highest priority first.
pub const METRIC_KEYWORDS: &[(Metric, &[&str])] = &[
    (
        Metric::Price,
        &["price", "prices", "rate", "rates", "valuation", "cost", "pricing"],
    ),
    (
        Metric::Demand,
        &["demand", "sold", "sales", "absorption", "bookings", "units sold"],
    ),
    (
        Metric::Supply,
        &[
            "supply",
            "supplied",
            "inventory",
            "stock",
            "pipeline",
            "units available",
            "carpet area",
        ],
    ),
    (
        Metric::Sales,
        &["total_sales", "total sales", "revenue", "turnover"],
    ),
];

/// Property keywords (whole-word match).
pub const PROPERTY_KEYWORDS: &[(PropertyType, &[&str])] = &[
    (
        PropertyType::Flat,
        &["flat", "flats", "apartment", "apartments", "residential"],
    ),
    (PropertyType::Office, &["office", "offices"]),
    (PropertyType::Shop, &["shop", "shops", "retail", "stores"]),
];

/// Property keywords tested after [`PROPERTY_KEYWORDS`] (substring match).
pub const SPECIAL_PROPERTY_KEYWORDS: &[(PropertyType, &[&str])] = &[(
    PropertyType::CarpetArea,
    &["carpet area", "carpet sq", "sqft supplied"],
)];

/// Statistic keywords (substring match), in reporting order.
pub const STAT_KEYWORDS: &[(StatKind, &[&str])] = &[
    (StatKind::Average, &["average", "avg", "mean"]),
    (StatKind::Max, &["highest", "max", "peak"]),
    (StatKind::Min, &["lowest", "min", "minimum"]),
    (
        StatKind::GrowthRate,
        &["growth rate", "growth", "increase", "rise", "drop", "decline"],
    ),
];

/// Explicit comparison keywords (substring match).
pub const COMPARISON_KEYWORDS: &[&str] = &[
    "compare",
    " vs ",
    " vs. ",
    "vs",
    "v/s",
    "versus",
    "between",
    "against",
    "compared to",
    "better than",
    "performed better",
];

/// Keywords asking for an overview (substring match).
pub const GENERAL_INSIGHT_KEYWORDS: &[&str] = &[
    "overview",
    "insight",
    "analysis",
    "summary",
    "summarize",
    "explain",
    "trend",
    "outlook",
];

/// Coordinate keywords (whole-word match).
pub const COORDINATE_KEYWORDS: &[&str] = &[
    "coordinate",
    "coordinates",
    "lat",
    "lng",
    "longitude",
    "latitude",
    "location pin",
];

/// Proximity keywords (whole-word match).
pub const NEAR_KEYWORDS: &[&str] = &["near", "nearby", "close to", "around"];

/// Descending superlatives (whole-word match).
pub const RANKING_DESC_KEYWORDS: &[&str] = &["highest", "top", "most", "fastest", "best"];

/// Ascending superlatives (whole-word match).
pub const RANKING_ASC_KEYWORDS: &[&str] =
    &["lowest", "least", "slowest", "bottom", "worst", "minimum"];

/// City-wide keywords (substring match).
pub const ALL_LOCATIONS_KEYWORDS: &[&str] = &[
    "all locations",
    "across all",
    "overall",
    "entire city",
    "whole city",
    "citywide",
    "across the city",
];

/// Region assumed when none is configured.
pub const DEFAULT_REGION: &str = "Pune";

/// Words in a ranking query that ask for a single winner (substring match).
pub const SINGULAR_RANKING_KEYWORDS: &[&str] = &["which", "highest", "lowest", "most", "least"];

/// Whether any keyword occurs anywhere in the text.
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}
