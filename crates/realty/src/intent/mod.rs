//! Natural-language intent extraction.

mod descriptor;
mod extractor;
pub mod keywords;

pub use descriptor::{Metric, PropertyType, QueryDescriptor, RankingOrder, Route, StatKind};
pub use extractor::{IntentExtractor, LocationMatcher, parse_query};
pub use keywords::DEFAULT_REGION;
