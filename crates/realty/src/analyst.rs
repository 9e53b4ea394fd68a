//! Main Analyst struct and public API.

use std::path::Path;
use std::sync::Arc;

use crate::dataset::{DatasetContext, DatasetSource, LoaderConfig};
use crate::dispatch::{QueryResponse, dispatch};
use crate::error::{RealtyError, Result};
use crate::export::{CsvExport, export_location};
use crate::intent::{DEFAULT_REGION, QueryDescriptor};

/// Configuration for query answering.
#[derive(Debug, Clone)]
pub struct AnalystConfig {
    /// Dataset loader configuration.
    pub loader: LoaderConfig,
    /// Ranking length when the query names none.
    pub ranking_default_limit: usize,
    /// Ranking length for singular questions ("which ...", "highest ...").
    pub singular_ranking_limit: usize,
    /// Neighbours returned by proximity queries.
    pub nearby_limit: usize,
    /// Area covered by the whole dataset, used in aggregate answers.
    pub region_name: String,
}

impl Default for AnalystConfig {
    fn default() -> Self {
        Self {
            loader: LoaderConfig::default(),
            ranking_default_limit: 5,
            singular_ranking_limit: 1,
            nearby_limit: 3,
            region_name: DEFAULT_REGION.to_string(),
        }
    }
}

/// Answers natural-language questions about one dataset.
///
/// Cheap to clone; clones share the same immutable dataset.
#[derive(Debug, Clone)]
pub struct Analyst {
    config: AnalystConfig,
    context: Arc<DatasetContext>,
}

impl Analyst {
    /// Create an analyst over an existing context with default configuration.
    pub fn new(context: DatasetContext) -> Self {
        Self::with_config(context, AnalystConfig::default())
    }

    /// Create an analyst with custom configuration.
    pub fn with_config(context: DatasetContext, config: AnalystConfig) -> Self {
        let context = context.with_region(&config.region_name);
        Self {
            config,
            context: Arc::new(context),
        }
    }

    /// Load a dataset file and create an analyst over it.
    pub fn from_file(path: impl AsRef<Path>, config: AnalystConfig) -> Result<Self> {
        let context = DatasetContext::from_file(path, config.loader.clone())?;
        log::info!(
            "Dataset ready: {} rows, {} locations",
            context.dataset().len(),
            context.locations().len()
        );
        Ok(Self::with_config(context, config))
    }

    pub fn config(&self) -> &AnalystConfig {
        &self.config
    }

    pub fn context(&self) -> &DatasetContext {
        &self.context
    }

    /// Known location names, sorted.
    pub fn locations(&self) -> &[String] {
        self.context.locations()
    }

    /// Metadata of the loaded file, if any.
    pub fn source(&self) -> Option<&DatasetSource> {
        self.context.source()
    }

    /// Extract the intent of a query without answering it.
    pub fn parse(&self, query: &str) -> Result<QueryDescriptor> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RealtyError::invalid_input("Query text is required."));
        }
        Ok(self.context.extractor().parse(query))
    }

    /// Answer a query.
    pub fn answer(&self, query: &str) -> Result<QueryResponse> {
        let descriptor = self.parse(query)?;
        let snapshot = self.context.snapshot();
        dispatch(&descriptor, &snapshot, &self.config)
    }

    /// Render one location's records as a CSV attachment.
    pub fn export(&self, location: &str) -> Result<CsvExport> {
        export_location(self.context.dataset(), location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartType;
    use crate::dataset::{Frame, Record};

    fn analyst() -> Analyst {
        let frame = Frame::new(
            vec!["total units".to_string()],
            vec![
                Record::new("Baner", 2021, vec![Some(10.0)])
                    .with_coordinates(18.56, 73.78),
                Record::new("Wakad", 2021, vec![Some(20.0)])
                    .with_coordinates(18.60, 73.76),
            ],
        );
        Analyst::new(DatasetContext::new(frame).unwrap())
    }

    #[test]
    fn test_empty_query_is_rejected() {
        let err = analyst().answer("   ").unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Query text is required.");
    }

    #[test]
    fn test_answer_routes_query() {
        let response = analyst().answer("coordinates of Wakad").unwrap();
        assert_eq!(response.chart_type, ChartType::None);
        assert_eq!(
            response.summary,
            "Coordinates for Wakad: lat 18.60, lng 73.76."
        );
    }

    #[test]
    fn test_clones_share_dataset() {
        let a = analyst();
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.context, &b.context));
    }

    #[test]
    fn test_custom_region() {
        let config = AnalystConfig {
            region_name: "Mumbai".to_string(),
            ..AnalystConfig::default()
        };
        let frame = Frame::new(vec!["total units".to_string()], vec![]);
        let analyst = Analyst::with_config(DatasetContext::new(frame).unwrap(), config);
        let err = analyst.answer("overall supply").unwrap_err();
        assert_eq!(
            err.to_string(),
            "No matching data was found for Mumbai-wide query."
        );
        assert!(analyst.parse("supply across Mumbai").unwrap().all_locations);
    }
}
