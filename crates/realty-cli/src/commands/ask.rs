//! Ask command - answer one question from the terminal.

use colored::Colorize;
use realty::{ChartType, QueryResponse};
use serde_json::Value;

use crate::cli::DataArgs;

/// Rows printed before the table is cut off.
const MAX_TABLE_ROWS: usize = 20;

pub fn run(
    query: String,
    data: DataArgs,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let analyst = super::load(&data, verbose)?;

    if verbose {
        let descriptor = analyst.parse(&query)?;
        eprintln!(
            "{} {:?} (metric: {}, locations: {:?})",
            "Route:".cyan(),
            descriptor.route(),
            descriptor.metric,
            descriptor.locations
        );
    }

    let response = analyst.answer(&query)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_response(&response);
    }

    Ok(())
}

fn print_response(response: &QueryResponse) {
    println!("{}", response.summary.white().bold());
    println!();

    if response.chart_type != ChartType::None {
        println!(
            "{} {} over {}",
            "Chart:".yellow().bold(),
            response.chart_type,
            response.chart_data.labels().join(", ")
        );
        println!();
    }

    if response.table_data.is_empty() {
        return;
    }
    println!("{}", "Rows:".yellow().bold());
    for row in response.table_data.iter().take(MAX_TABLE_ROWS) {
        println!("  {}", format_row(row));
    }
    if response.table_data.len() > MAX_TABLE_ROWS {
        let more = response.table_data.len() - MAX_TABLE_ROWS;
        println!("  {}", format!("... {more} more").dimmed());
    }
}

fn format_row(row: &Value) -> String {
    let Value::Object(fields) = row else {
        return row.to_string();
    };
    fields
        .iter()
        .map(|(key, value)| match value {
            Value::Null => format!("{}={}", key.dimmed(), "-".dimmed()),
            Value::String(s) => format!("{}={}", key.dimmed(), s),
            other => format!("{}={}", key.dimmed(), other),
        })
        .collect::<Vec<_>>()
        .join("  ")
}
