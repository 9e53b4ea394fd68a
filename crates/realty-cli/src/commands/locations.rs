//! Locations command - list the locations a query can name.

use colored::Colorize;

use crate::cli::DataArgs;

pub fn run(data: DataArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let analyst = super::load(&data, verbose)?;
    let locations = analyst.locations();

    println!(
        "{} {}",
        locations.len().to_string().white().bold(),
        "locations".cyan()
    );
    for name in locations {
        println!("  {}", name);
    }
    Ok(())
}
