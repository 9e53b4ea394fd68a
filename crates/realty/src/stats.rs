//! Requested summary statistics over a value series.

use serde::{Deserialize, Serialize};

use crate::dataset::Point;
use crate::intent::StatKind;

/// An extremal value and the year it occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremum {
    pub value: f64,
    pub year: Option<i32>,
}

/// Direction of a growth rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increase,
    Decrease,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Increase => write!(f, "increase"),
            Direction::Decrease => write!(f, "decrease"),
        }
    }
}

/// Percentage change from the first to the last value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthRate {
    /// Percent, rounded to two decimals.
    pub value: f64,
    pub direction: Direction,
}

/// Statistics that were requested and could be computed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Extremum>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Extremum>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_rate: Option<GrowthRate>,
}

impl Stats {
    pub fn is_empty(&self) -> bool {
        self.average.is_none()
            && self.max.is_none()
            && self.min.is_none()
            && self.growth_rate.is_none()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the requested kinds over `points`, skipping nulls.
///
/// Kinds whose preconditions fail are left out: growth needs two non-null
/// points and a non-zero first value.
pub fn compute_stats(points: &[Point], requested: &[StatKind]) -> Stats {
    let mut stats = Stats::default();

    let present: Vec<(Option<i32>, f64)> = points
        .iter()
        .filter_map(|p| p.value.filter(|v| v.is_finite()).map(|v| (p.year, v)))
        .collect();
    if present.is_empty() || requested.is_empty() {
        return stats;
    }

    if requested.contains(&StatKind::Average) {
        stats.average = Some(present.iter().map(|(_, v)| v).sum::<f64>() / present.len() as f64);
    }

    // First occurrence wins on ties
    let pick = |better: fn(f64, f64) -> bool| {
        present
            .iter()
            .copied()
            .reduce(|best, next| if better(next.1, best.1) { next } else { best })
            .map(|(year, value)| Extremum { value, year })
    };
    if requested.contains(&StatKind::Max) {
        stats.max = pick(|a, b| a > b);
    }
    if requested.contains(&StatKind::Min) {
        stats.min = pick(|a, b| a < b);
    }

    if requested.contains(&StatKind::GrowthRate) && present.len() >= 2 {
        let mut chronological = present.clone();
        chronological.sort_by_key(|(year, _)| *year);
        let first = chronological[0].1;
        let last = chronological[chronological.len() - 1].1;
        if first != 0.0 {
            let growth = (last - first) / first * 100.0;
            stats.growth_rate = Some(GrowthRate {
                value: round2(growth),
                direction: if growth >= 0.0 {
                    Direction::Increase
                } else {
                    Direction::Decrease
                },
            });
        }
    }

    stats
}
