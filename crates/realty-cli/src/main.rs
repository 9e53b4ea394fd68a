//! Realty CLI - query real-estate market data from the terminal or over HTTP.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use log::LevelFilter;

/// Install the logger. `RUST_LOG` overrides the default level.
fn init_logger(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    pretty_env_logger::formatted_builder()
        .filter_level(default_level)
        .parse_env("RUST_LOG")
        .try_init()
        .ok();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Ask { query, data, json } => commands::ask::run(query, data, json, cli.verbose),

        Commands::Serve { data, host, port } => commands::serve::run(data, host, port, cli.verbose),

        Commands::Export {
            data,
            location,
            output,
        } => commands::export::run(data, location, output, cli.verbose),

        Commands::Locations { data } => commands::locations::run(data, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
