//! Export command - write one location's records to a CSV file.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;

use crate::cli::DataArgs;

pub fn run(
    data: DataArgs,
    location: String,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let analyst = super::load(&data, verbose)?;
    let export = analyst.export(&location)?;

    let output_path = output.unwrap_or_else(|| PathBuf::from(&export.filename));
    fs::write(&output_path, &export.content)?;

    println!(
        "{} {} ({} bytes)",
        "Wrote".green().bold(),
        output_path.display(),
        export.content.len()
    );
    Ok(())
}
