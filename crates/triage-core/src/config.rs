use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;

/// Top-level configuration for the triage tools.
///
/// Loaded from `~/.triage/config.toml` by default. Every section is optional
/// in the file; missing sections and fields fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriageConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub conversation: ConversationConfig,
    #[serde(default)]
    pub records: RecordsConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
}

impl TriageConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TriageConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Full path of the records file inside the resolved data directory.
    pub fn records_path(&self) -> PathBuf {
        expand_home(&self.general.data_dir).join(&self.records.file_name)
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        return PathBuf::from(home).join(rest);
    }
    PathBuf::from(path)
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory holding the records file and exported reports.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.triage/data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Presentation timing for the chat front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationConfig {
    /// Delay before the greeting is shown.
    pub greeting_delay_ms: u64,
    /// Simulated "typing" delay before each reply.
    pub thinking_delay_ms: u64,
    /// Print numbered options under choice questions.
    pub show_options: bool,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            greeting_delay_ms: 500,
            thinking_delay_ms: 1500,
            show_options: true,
        }
    }
}

/// Triage record file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    /// File name of the JSON records file, relative to `general.data_dir`.
    pub file_name: String,
    /// Seed demo records when the records file does not exist yet.
    pub seed_mock_data: bool,
    /// Number of demo records to seed.
    pub mock_record_count: usize,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            file_name: "triages.json".to_string(),
            seed_mock_data: false,
            mock_record_count: 12,
        }
    }
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportsConfig {
    /// Default time range: "7d", "30d" or "90d".
    pub default_range: String,
    /// Number of entries in the frequent-symptom ranking.
    pub top_symptoms: usize,
    /// Symptom words shorter than this are ignored in the ranking.
    pub min_symptom_word_len: usize,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            default_range: "7d".to_string(),
            top_symptoms: 10,
            min_symptom_word_len: 4,
        }
    }
}
