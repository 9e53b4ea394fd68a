//! Realty: deterministic natural-language query engine for real-estate data.
//!
//! Realty answers free-text questions about a location × year dataset of
//! prices, demand, supply and sales. A query is turned into a structured
//! intent by keyword rules, routed to one aggregation strategy, and answered
//! with a summary sentence, a chart payload and the backing table rows.
//!
//! # Core Principles
//!
//! - **Deterministic**: no models, no randomness; same text, same answer
//! - **Read-only**: the dataset is loaded once and never modified
//! - **Nulls stay null**: missing values are never reported as zero
//!
//! # Example
//!
//! ```no_run
//! use realty::{Analyst, AnalystConfig};
//!
//! let analyst = Analyst::from_file("market.csv", AnalystConfig::default()).unwrap();
//! let response = analyst.answer("Compare Kharadi and Wakad price").unwrap();
//!
//! println!("{}", response.summary);
//! println!("Rows: {}", response.table_data.len());
//! ```

pub mod chart;
pub mod columns;
pub mod dataset;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod filter;
pub mod intent;
pub mod stats;
pub mod summary;

mod analyst;

pub use crate::analyst::{Analyst, AnalystConfig};
pub use chart::{ChartData, ChartType};
pub use dataset::{DatasetContext, DatasetLoader, DatasetSource, Frame, LoaderConfig, Record};
pub use dispatch::{QueryResponse, dispatch};
pub use error::{RealtyError, Result};
pub use export::CsvExport;
pub use intent::{IntentExtractor, Metric, PropertyType, QueryDescriptor, Route, parse_query};
