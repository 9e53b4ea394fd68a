//! Rule-based extraction of a [`QueryDescriptor`] from free text.

use once_cell::sync::Lazy;
use regex::Regex;

use super::descriptor::{Metric, PropertyType, QueryDescriptor, RankingOrder, StatKind};
use super::keywords::{
    ALL_LOCATIONS_KEYWORDS, COMPARISON_KEYWORDS, COORDINATE_KEYWORDS, DEFAULT_REGION,
    GENERAL_INSIGHT_KEYWORDS, METRIC_KEYWORDS, NEAR_KEYWORDS, PROPERTY_KEYWORDS,
    RANKING_ASC_KEYWORDS, RANKING_DESC_KEYWORDS, SPECIAL_PROPERTY_KEYWORDS, STAT_KEYWORDS,
    contains_any,
};
use crate::error::Result;

/// Most locations a single query can resolve.
const MAX_LOCATIONS: usize = 2;

// =============================================================================
// COMPILED PATTERNS
// =============================================================================

/// Compile a whole-word alternation over literal keywords.
fn word_pattern(keywords: &[&str]) -> Regex {
    let alternatives: Vec<String> = keywords.iter().map(|k| regex::escape(k)).collect();
    let pattern = format!(r"\b(?:{})\b", alternatives.join("|"));
    Regex::new(&pattern).unwrap()
}

const YEAR_RANGE: &str = r"(20[0-9]{2})\s*(?:to|-|through|until|till|and)\s*(20[0-9]{2})";

static YEAR_RANGE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(YEAR_RANGE).unwrap());
static YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"20[0-9]{2}").unwrap());
static LAST_N_YEARS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:last|past)\s+([0-9]+)\s+years?").unwrap());
static TOP_N_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"top\s+([0-9]+)").unwrap());

static PROPERTY_PATTERNS: Lazy<Vec<(PropertyType, Regex)>> = Lazy::new(|| {
    PROPERTY_KEYWORDS
        .iter()
        .map(|(property, keywords)| (*property, word_pattern(keywords)))
        .collect()
});
static COORDINATE_PATTERN: Lazy<Regex> = Lazy::new(|| word_pattern(COORDINATE_KEYWORDS));
static NEAR_PATTERN: Lazy<Regex> = Lazy::new(|| word_pattern(NEAR_KEYWORDS));
static SUPERLATIVE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let all: Vec<&str> = RANKING_DESC_KEYWORDS
        .iter()
        .chain(RANKING_ASC_KEYWORDS)
        .copied()
        .collect();
    word_pattern(&all)
});
static ASCENDING_PATTERN: Lazy<Regex> = Lazy::new(|| word_pattern(RANKING_ASC_KEYWORDS));

// =============================================================================
// LOCATION MATCHING
// =============================================================================

/// Whole-word, case-insensitive matcher over the canonical location list.
#[derive(Debug, Clone)]
pub struct LocationMatcher {
    entries: Vec<(String, Regex)>,
}

impl LocationMatcher {
    /// Compile one pattern per known location, keeping list order.
    pub fn new<S: AsRef<str>>(locations: &[S]) -> Result<Self> {
        let entries = locations
            .iter()
            .map(|name| -> Result<(String, Regex)> {
                let name = name.as_ref();
                let pattern = format!(r"\b{}\b", regex::escape(&name.to_lowercase()));
                Ok((name.to_string(), Regex::new(&pattern)?))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Known location names in canonical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Up to two locations mentioned in `lowered`, in list order.
    pub fn find(&self, lowered: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, pattern)| pattern.is_match(lowered))
            .map(|(name, _)| name.clone())
            .take(MAX_LOCATIONS)
            .collect()
    }
}

// =============================================================================
// RANKING SIGNAL
// =============================================================================

/// Superlative wording found in the text, before it is known whether the
/// query names a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RankingSignal {
    present: bool,
    order: RankingOrder,
    limit: Option<usize>,
}

impl RankingSignal {
    fn detect(lowered: &str) -> Self {
        let mut signal = Self {
            present: SUPERLATIVE_PATTERN.is_match(lowered),
            order: RankingOrder::Descending,
            limit: None,
        };
        if ASCENDING_PATTERN.is_match(lowered) {
            signal.order = RankingOrder::Ascending;
        }

        // "top N" overrides any ascending wording
        if let Some(caps) = TOP_N_PATTERN.captures(lowered) {
            signal.limit = Some(caps[1].parse().unwrap_or(usize::MAX));
            signal.present = true;
            signal.order = RankingOrder::Descending;
        }
        signal
    }

    /// Split the signal into `(ranking, extrema)`: a superlative about a named
    /// location is an extrema query, never a cross-location ranking.
    fn resolve(&self, has_locations: bool) -> (bool, bool) {
        (
            self.present && !has_locations,
            self.present && has_locations,
        )
    }
}

// =============================================================================
// FIELD EXTRACTORS
// =============================================================================

fn detect_metric(lowered: &str) -> Metric {
    METRIC_KEYWORDS
        .iter()
        .find(|(_, keywords)| contains_any(lowered, keywords))
        .map(|(metric, _)| *metric)
        .unwrap_or(Metric::General)
}

fn detect_property_types(lowered: &str) -> Vec<PropertyType> {
    let word_matches = PROPERTY_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(lowered))
        .map(|(property, _)| *property);
    let special_matches = SPECIAL_PROPERTY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| contains_any(lowered, keywords))
        .map(|(property, _)| *property);

    let mut detected = Vec::new();
    for property in word_matches.chain(special_matches) {
        if !detected.contains(&property) {
            detected.push(property);
        }
    }
    detected
}

/// Returns `(year, year_range)`; at most one is set.
fn extract_years(lowered: &str) -> (Option<i32>, Option<(i32, i32)>) {
    if let Some(caps) = YEAR_RANGE_PATTERN.captures(lowered) {
        let (Ok(a), Ok(b)) = (caps[1].parse::<i32>(), caps[2].parse::<i32>()) else {
            return (None, None);
        };
        return (None, Some((a.min(b), a.max(b))));
    }

    let mut years: Vec<i32> = YEAR_PATTERN
        .find_iter(lowered)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    years.sort_unstable();
    years.dedup();

    match years.as_slice() {
        [] => (None, None),
        [year] => (Some(*year), None),
        [first, .., last] => (None, Some((*first, *last))),
    }
}

fn extract_last_n_years(lowered: &str) -> Option<usize> {
    let caps = LAST_N_YEARS_PATTERN.captures(lowered)?;
    caps[1].parse::<usize>().ok().filter(|n| *n > 0)
}

fn detect_stats(lowered: &str) -> Vec<StatKind> {
    STAT_KEYWORDS
        .iter()
        .filter(|(_, keywords)| contains_any(lowered, keywords))
        .map(|(stat, _)| *stat)
        .collect()
}

// =============================================================================
// EXTRACTOR
// =============================================================================

/// Converts query text into a [`QueryDescriptor`] against a fixed location list.
#[derive(Debug, Clone)]
pub struct IntentExtractor {
    matcher: LocationMatcher,
    /// "across <region>", lowercased; `None` for a blank region.
    region_phrase: Option<String>,
}

fn region_phrase(region: &str) -> Option<String> {
    let region = region.trim();
    if region.is_empty() {
        None
    } else {
        Some(format!("across {}", region.to_lowercase()))
    }
}

impl IntentExtractor {
    /// Create an extractor for the given canonical location list.
    pub fn new<S: AsRef<str>>(locations: &[S]) -> Result<Self> {
        Ok(Self {
            matcher: LocationMatcher::new(locations)?,
            region_phrase: region_phrase(DEFAULT_REGION),
        })
    }

    /// Recognize "across <region>" as an all-locations query.
    pub fn with_region(mut self, region: &str) -> Self {
        self.region_phrase = region_phrase(region);
        self
    }

    pub fn matcher(&self) -> &LocationMatcher {
        &self.matcher
    }

    fn is_all_locations(&self, lowered: &str) -> bool {
        contains_any(lowered, ALL_LOCATIONS_KEYWORDS)
            || self
                .region_phrase
                .as_deref()
                .is_some_and(|phrase| lowered.contains(phrase))
    }

    /// Parse a query. Identical input always yields an identical descriptor.
    pub fn parse(&self, query: &str) -> QueryDescriptor {
        let raw_query = query.trim().to_string();
        let lowered = raw_query.to_lowercase();

        let locations = self.matcher.find(&lowered);
        let metric = detect_metric(&lowered);
        let (year, year_range) = extract_years(&lowered);
        let signal = RankingSignal::detect(&lowered);
        let (ranking, extrema) = signal.resolve(!locations.is_empty());

        let comparison =
            contains_any(&lowered, COMPARISON_KEYWORDS) || locations.len() >= MAX_LOCATIONS;
        let general_insight =
            metric == Metric::General || contains_any(&lowered, GENERAL_INSIGHT_KEYWORDS);

        let descriptor = QueryDescriptor {
            property_types: detect_property_types(&lowered),
            last_n_years: extract_last_n_years(&lowered),
            stats: detect_stats(&lowered),
            coordinate: COORDINATE_PATTERN.is_match(&lowered),
            near: NEAR_PATTERN.is_match(&lowered),
            all_locations: self.is_all_locations(&lowered),
            ranking_order: signal.order,
            ranking_limit: signal.limit,
            raw_query,
            locations,
            metric,
            comparison,
            ranking,
            year,
            year_range,
            extrema,
            general_insight,
        };

        log::debug!(
            "Parsed query {:?}: route={:?} metric={} locations={:?}",
            descriptor.raw_query,
            descriptor.route(),
            descriptor.metric,
            descriptor.locations
        );
        descriptor
    }
}

/// Parse `query` against an ordered list of known locations.
pub fn parse_query<S: AsRef<str>>(query: &str, locations: &[S]) -> Result<QueryDescriptor> {
    Ok(IntentExtractor::new(locations)?.parse(query))
}
