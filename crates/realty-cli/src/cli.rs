//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use realty::AnalystConfig;

/// Realty: ask questions about real-estate market data
#[derive(Parser)]
#[command(name = "realty")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Dataset options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Path to the dataset (CSV/TSV)
    #[arg(short, long, value_name = "FILE")]
    pub data: PathBuf,

    /// Field delimiter (default: auto-detect)
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Name of the area the dataset covers
    #[arg(long, default_value = "Pune")]
    pub region: String,
}

impl DataArgs {
    /// Library configuration with command-line overrides applied.
    pub fn config(&self) -> Result<AnalystConfig, String> {
        let mut config = AnalystConfig {
            region_name: self.region.clone(),
            ..AnalystConfig::default()
        };
        if let Some(delimiter) = self.delimiter {
            let byte = u8::try_from(delimiter)
                .map_err(|_| format!("Delimiter must be a single-byte character: {delimiter:?}"))?;
            config.loader.delimiter = Some(byte);
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer a natural-language question about the dataset
    Ask {
        /// The question, e.g. "Compare Kharadi and Wakad price"
        #[arg(value_name = "QUERY")]
        query: String,

        #[command(flatten)]
        data: DataArgs,

        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the query API over HTTP
    Serve {
        #[command(flatten)]
        data: DataArgs,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for web server
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },

    /// Export one location's records as CSV
    Export {
        #[command(flatten)]
        data: DataArgs,

        /// Location to export
        #[arg(short, long)]
        location: String,

        /// Output path (default: <location>_data.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the locations known to the dataset
    Locations {
        #[command(flatten)]
        data: DataArgs,
    },
}
