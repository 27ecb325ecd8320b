//! Triage application binary - composition root.
//!
//! 1. Parse CLI arguments
//! 2. Load configuration from TOML and apply CLI overrides
//! 3. Install the tracing subscriber (stderr)
//! 4. Dispatch to the chat loop or a records/report subcommand

mod chat;
mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use triage_core::TriageConfig;
use triage_records::RecordFilter;

use crate::cli::{CliArgs, Command};

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read before tracing exists, so a load failure is reported
    // once the subscriber is installed.
    let config_file = args.resolve_config_path();
    let loaded = TriageConfig::load(&config_file);
    let mut config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => TriageConfig::default(),
    };
    args.apply_overrides(&mut config);

    init_tracing(&config.general.log_level);
    tracing::info!("Starting triage v{}", env!("CARGO_PKG_VERSION"));
    match loaded {
        Ok(_) => tracing::info!(path = %config_file.display(), "Configuration loaded"),
        Err(e) if config_file.exists() => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Failed to load config. Using defaults."
        ),
        Err(_) => tracing::debug!(path = %config_file.display(), "No config file, using defaults"),
    }

    match args.command() {
        Command::Chat { no_save } => {
            let records_path = config.records_path();
            let save_to = (!no_save).then_some(records_path.as_path());
            chat::run(&config.conversation, save_to).await?;
        }
        Command::Records {
            search,
            urgency,
            status,
            sort,
        } => {
            let filter = RecordFilter {
                search,
                urgency,
                status,
            };
            commands::list_records(&config, &filter, sort)?;
        }
        Command::Status { id, status } => commands::update_status(&config, id, status)?,
        Command::Report { range, output } => {
            let range = commands::resolve_range(&config, range)?;
            commands::report(&config, range, output.as_deref())?;
        }
        Command::Seed { count } => commands::seed(&config, count)?,
    }

    Ok(())
}
