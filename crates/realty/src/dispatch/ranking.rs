//! Cross-location top/bottom-N ranking.

use serde::{Deserialize, Serialize};

use super::Outcome;
use crate::analyst::AnalystConfig;
use crate::chart::{ChartType, bar_chart, sanitize};
use crate::columns::resolve_value_column;
use crate::dataset::{Frame, Record};
use crate::error::{RealtyError, Result};
use crate::filter::ranking_frame;
use crate::intent::keywords::{SINGULAR_RANKING_KEYWORDS, contains_any};
use crate::intent::{QueryDescriptor, RankingOrder};
use crate::summary::SummaryContext;

/// One entry of a ranking table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedLocation {
    /// 1-based position.
    pub rank: usize,
    #[serde(rename = "final location")]
    pub location: String,
    pub value: f64,
    pub year: i32,
}

/// How many entries to keep: an explicit "top N" wins, then a singular
/// question ("which ...") keeps one, otherwise the configured default.
fn ranking_limit(descriptor: &QueryDescriptor, config: &AnalystConfig) -> usize {
    if let Some(limit) = descriptor.ranking_limit.filter(|n| *n > 0) {
        return limit;
    }
    if contains_any(
        &descriptor.raw_query.to_lowercase(),
        SINGULAR_RANKING_KEYWORDS,
    ) {
        config.singular_ranking_limit
    } else {
        config.ranking_default_limit
    }
}

pub(super) fn answer(
    descriptor: &QueryDescriptor,
    frame: &Frame,
    config: &AnalystConfig,
) -> Result<Outcome> {
    let column = resolve_value_column(descriptor);
    let candidates = ranking_frame(frame, descriptor.year);
    let index = candidates
        .column_index(column)
        .ok_or_else(|| RealtyError::missing_column(column))?;

    let mut scored: Vec<(&Record, f64)> = candidates
        .records()
        .iter()
        .filter_map(|r| sanitize(r.value(index)).map(|v| (r, v)))
        .collect();
    if scored.is_empty() {
        return Err(RealtyError::not_found("No data available for ranking."));
    }

    // Stable in both directions
    match descriptor.ranking_order {
        RankingOrder::Ascending => scored.sort_by(|a, b| a.1.total_cmp(&b.1)),
        RankingOrder::Descending => scored.sort_by(|a, b| b.1.total_cmp(&a.1)),
    }
    scored.truncate(ranking_limit(descriptor, config));

    let ranked: Vec<RankedLocation> = scored
        .iter()
        .enumerate()
        .map(|(i, (record, value))| RankedLocation {
            rank: i + 1,
            location: record.location.clone(),
            value: *value,
            year: record.year,
        })
        .collect();
    log::debug!("Ranked {} locations by {:?}", ranked.len(), column);

    let labels = ranked.iter().map(|r| r.location.clone()).collect();
    let values: Vec<Option<f64>> = ranked.iter().map(|r| Some(r.value)).collect();
    let table_data = ranked
        .iter()
        .map(serde_json::to_value)
        .collect::<serde_json::Result<Vec<_>>>()?;

    Ok(Outcome {
        chart_type: ChartType::Bar,
        chart_data: bar_chart(labels, &values),
        table_data,
        context: SummaryContext {
            ranking: ranked,
            ..SummaryContext::default()
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::parse_query;

    const PRICE: &str = "flat - weighted average rate";

    fn frame() -> Frame {
        let rec = |loc: &str, year: i32, v: Option<f64>| Record::new(loc, year, vec![v]);
        Frame::new(
            vec![PRICE.to_string()],
            vec![
                rec("Aundh", 2022, Some(9000.0)),
                rec("Baner", 2021, Some(12000.0)),
                rec("Baner", 2022, Some(9000.0)),
                rec("Kharadi", 2022, Some(11000.0)),
                rec("Wakad", 2022, None),
                rec("Hadapsar", 2021, Some(7000.0)),
            ],
        )
    }

    fn run(query: &str) -> Result<Outcome> {
        let descriptor = parse_query(query, &frame().locations())?;
        answer(&descriptor, &frame(), &AnalystConfig::default())
    }

    fn names(outcome: &Outcome) -> Vec<&str> {
        outcome
            .context
            .ranking
            .iter()
            .map(|r| r.location.as_str())
            .collect()
    }

    #[test]
    fn test_default_limit_uses_latest_records() {
        let outcome = run("top locations by price").unwrap();
        // Ties keep location order; Wakad has no value
        assert_eq!(
            names(&outcome),
            vec!["Kharadi", "Aundh", "Baner", "Hadapsar"]
        );
        assert_eq!(outcome.chart_type, ChartType::Bar);
        assert_eq!(outcome.table_data[0]["rank"], 1);
        assert_eq!(outcome.table_data[0]["final location"], "Kharadi");
    }

    #[test]
    fn test_explicit_top_n() {
        let outcome = run("top 2 locations by price").unwrap();
        assert_eq!(names(&outcome), vec!["Kharadi", "Aundh"]);
    }

    #[test]
    fn test_singular_question_keeps_one() {
        let outcome = run("which area has the lowest price").unwrap();
        assert_eq!(names(&outcome), vec!["Hadapsar"]);
    }

    #[test]
    fn test_year_filter() {
        let outcome = run("top 3 by price in 2021").unwrap();
        assert_eq!(names(&outcome), vec!["Baner", "Hadapsar"]);
        assert_eq!(outcome.context.ranking[0].year, 2021);
    }

    #[test]
    fn test_no_values_is_not_found() {
        let err = run("top locations by price in 2019").err().unwrap();
        assert!(matches!(err, RealtyError::NotFound(_)));
    }

    #[test]
    fn test_missing_column() {
        let err = run("top locations by demand").err().unwrap();
        assert_eq!(
            err.to_string(),
            "Column 'total sold - igr' is missing in the data."
        );
    }
}
