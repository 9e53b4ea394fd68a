//! Mapping from (metric, property type) to dataset column names.

use indexmap::IndexMap;

use crate::intent::{Metric, PropertyType, QueryDescriptor};

/// Column read when no property type refines the metric.
pub fn base_column(metric: Metric) -> &'static str {
    match metric {
        Metric::Price => "flat - weighted average rate",
        Metric::Demand => "total sold - igr",
        Metric::Supply => "total units",
        Metric::Sales | Metric::General => "total_sales - igr",
    }
}

/// Column for a metric refined by a property type, if that pairing exists.
pub fn property_column(metric: Metric, property: PropertyType) -> Option<&'static str> {
    use Metric::*;
    use PropertyType::*;

    match (metric, property) {
        (Price, Flat) => Some("flat - weighted average rate"),
        (Price, Office) => Some("office - weighted average rate"),
        (Price, Shop) => Some("shop - weighted average rate"),
        (Demand | Sales, Flat) => Some("flat_sold - igr"),
        (Demand | Sales, Office) => Some("office_sold - igr"),
        (Demand | Sales, Shop) => Some("shop_sold - igr"),
        (Supply, Flat) => Some("flat total"),
        (Supply, Office) => Some("office total"),
        (Supply, Shop) => Some("shop total"),
        (Supply, CarpetArea) => Some("total carpet area supplied (sqft)"),
        _ => None,
    }
}

/// The single value column a descriptor reads: the first property type's
/// column when it exists, otherwise the metric's base column.
pub fn resolve_value_column(descriptor: &QueryDescriptor) -> &'static str {
    descriptor
        .property_types
        .first()
        .and_then(|p| property_column(descriptor.metric, *p))
        .unwrap_or_else(|| base_column(descriptor.metric))
}

/// One labelled column per property type, when two or more were asked for.
///
/// Property types without a column for the metric are skipped.
pub fn multi_property_columns(descriptor: &QueryDescriptor) -> IndexMap<String, &'static str> {
    let mut columns = IndexMap::new();
    if descriptor.property_types.len() <= 1 {
        return columns;
    }
    for property in &descriptor.property_types {
        if let Some(column) = property_column(descriptor.metric, *property) {
            columns.insert(
                format!("{} {}", property.label(), descriptor.metric.label()),
                column,
            );
        }
    }
    columns
}
