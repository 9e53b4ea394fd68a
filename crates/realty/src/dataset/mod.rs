//! Dataset model, loading, and the shared immutable context.

mod context;
mod frame;
mod loader;
mod source;

pub use context::DatasetContext;
pub use frame::{
    Frame, LAT_COLUMN, LNG_COLUMN, LOCATION_COLUMN, Point, Record, YEAR_COLUMN, normalize_location,
    number_or_null,
};
pub use loader::{DatasetLoader, LoaderConfig, is_null_value};
pub use source::DatasetSource;
