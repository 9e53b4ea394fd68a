//! Serve command - run the HTTP query API.

use colored::Colorize;

use crate::cli::DataArgs;
use crate::server::{app, state::AppState};

pub fn run(
    data: DataArgs,
    host: String,
    port: u16,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let analyst = super::load(&data, verbose)?;
    let state = AppState::new(analyst);

    let url = format!("http://{}:{}", host, port);
    println!();
    println!(
        "{} {}",
        "Starting query server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Data: {}", data.data.display());
    println!("  Locations: {}", state.analyst.locations().len());
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, &host, port))
}
