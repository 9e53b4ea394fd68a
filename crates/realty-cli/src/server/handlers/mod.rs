//! API request handlers.

mod export;
mod query;

pub use export::*;
pub use query::*;
