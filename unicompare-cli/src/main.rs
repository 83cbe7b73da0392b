//! Unicompare CLI - Command-line interface
//!
//! Browse, compare and manage the university catalog, request admission
//! estimates, or run the JSON API server.

mod commands;
mod output;

use clap::Parser;
use unicompare_core::CatalogError;
use unicompare_core::config::AppConfig;
use unicompare_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "unicompare")]
#[command(about = "Compare Kazakhstani universities and estimate admission chances")]
struct Cli {
    /// Console log level (the debug log file always records everything)
    #[arg(long, global = true, value_enum, default_value_t = CliLogLevel::Info)]
    log_level: CliLogLevel,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_tracing_level(), None)?;

    let config = AppConfig::from_env()?;

    if let Err(e) = commands::handle_command(cli.command, config).await {
        match e.downcast_ref::<CatalogError>() {
            Some(catalog_error) => eprintln!("Error: {}", catalog_error.user_message()),
            None => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }

    Ok(())
}
