//! CLI argument definitions for the triage binary.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use triage_core::config::expand_home;
use triage_core::{TriageConfig, Urgency};
use triage_records::{RecordStatus, ReportRange, SortOrder};
use uuid::Uuid;

/// Triage: guided symptom intake for emergency-room patients.
#[derive(Parser, Debug)]
#[command(name = "triage", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Data directory holding the records file.
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run an interactive triage conversation (default).
    Chat {
        /// Do not store the finished triage in the records file.
        #[arg(long = "no-save")]
        no_save: bool,
    },

    /// List stored triage records.
    Records {
        /// Case-insensitive match on patient name or symptoms.
        #[arg(short = 's', long)]
        search: Option<String>,

        /// Only records with this urgency (low, medium, high).
        #[arg(short = 'u', long)]
        urgency: Option<Urgency>,

        /// Only records with this status (in_progress, completed, awaiting_doctor).
        #[arg(long)]
        status: Option<RecordStatus>,

        /// Listing order (newest, oldest, urgency).
        #[arg(long, default_value = "newest")]
        sort: SortOrder,
    },

    /// Change the status of a stored record.
    Status {
        /// Record id.
        id: Uuid,
        /// New status (in_progress, completed, awaiting_doctor).
        status: RecordStatus,
    },

    /// Build an aggregated report over a trailing window.
    Report {
        /// Window: 7d, 30d or 90d. Defaults to the configured range.
        #[arg(short = 'r', long)]
        range: Option<ReportRange>,

        /// Write the JSON report here instead of printing it.
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Append demo records to the records file.
    Seed {
        /// Number of records. Defaults to `records.mock_record_count`.
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
}

impl CliArgs {
    /// The subcommand to run, `chat` when none was given.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Chat { no_save: false })
    }

    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > TRIAGE_CONFIG env var > ~/.triage/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("TRIAGE_CONFIG") {
            return PathBuf::from(p);
        }
        expand_home("~/.triage/config.toml")
    }

    /// Apply --data-dir and --log-level on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut TriageConfig) {
        if let Some(ref dir) = self.data_dir {
            config.general.data_dir = dir.to_string_lossy().to_string();
        }
        if let Some(ref level) = self.log_level {
            config.general.log_level = level.clone();
        }
    }
}
