//! Keiba filter CLI
//!
//! Loads an exported race and prints each entry's past performances
//! narrowed by venue, rank, course, weather, ground and jockey.

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use keiba_filter::config::AppConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keiba_filter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load()?;
    tracing::debug!("Configuration loaded: {:?}", config);

    match cli.command {
        Commands::Show {
            race,
            filters,
            sort_by_form,
            format,
            data_dir,
        } => cli::run_show(&config, race, filters, sort_by_form, format, data_dir),
        Commands::Facets {
            race,
            format,
            data_dir,
        } => cli::run_facets(&config, race, format, data_dir),
    }
}
