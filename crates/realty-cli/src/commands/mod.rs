//! CLI command implementations.

pub mod ask;
pub mod export;
pub mod locations;
pub mod serve;

use colored::Colorize;
use realty::Analyst;

use crate::cli::DataArgs;

/// Load the dataset named on the command line.
fn load(args: &DataArgs, verbose: bool) -> Result<Analyst, Box<dyn std::error::Error>> {
    let analyst = Analyst::from_file(&args.data, args.config()?)?;
    if verbose {
        if let Some(source) = analyst.source() {
            eprintln!(
                "{} {} ({} rows, {} locations, {} skipped, {})",
                "Loaded".cyan(),
                source.file_name(),
                source.row_count,
                source.location_count,
                source.skipped_rows,
                source.hash
            );
        }
    }
    Ok(analyst)
}
