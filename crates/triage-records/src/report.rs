//! Aggregated triage reports over a trailing time window.
//!
//! A report bundles the dashboard charts into one exportable JSON document:
//! urgency distribution, daily volume, pain-bucket histogram, the most
//! frequent symptom words and a simulated average response time.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use triage_core::config::ReportsConfig;
use triage_core::{PainLevel, Urgency};

use crate::error::{RecordsError, Result};
use crate::filter::UrgencyCounts;
use crate::types::{RecordStatus, TriageRecord};

// =============================================================================
// ReportRange
// =============================================================================

/// Trailing window a report covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportRange {
    #[default]
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "90d")]
    Last90Days,
}

impl ReportRange {
    pub fn days(&self) -> i64 {
        match self {
            ReportRange::Last7Days => 7,
            ReportRange::Last30Days => 30,
            ReportRange::Last90Days => 90,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportRange::Last7Days => "7d",
            ReportRange::Last30Days => "30d",
            ReportRange::Last90Days => "90d",
        }
    }
}

impl fmt::Display for ReportRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportRange {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "7d" => Ok(ReportRange::Last7Days),
            "30d" => Ok(ReportRange::Last30Days),
            "90d" => Ok(ReportRange::Last90Days),
            other => Err(RecordsError::UnknownTimeRange(other.to_string())),
        }
    }
}

// =============================================================================
// Report
// =============================================================================

/// Records created on one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Number of records in one pain bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PainCount {
    pub level: PainLevel,
    pub range: String,
    pub count: usize,
}

/// How often a symptom word occurs across records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomFrequency {
    pub symptom: String,
    pub count: usize,
}

/// Exportable report document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub period: ReportRange,
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub average_response_minutes: u64,
    pub urgency_distribution: UrgencyCounts,
    pub daily: Vec<DailyCount>,
    pub pain_distribution: Vec<PainCount>,
    pub frequent_symptoms: Vec<SymptomFrequency>,
    pub records: Vec<TriageRecord>,
}

impl Report {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// =============================================================================
// ReportGenerator
// =============================================================================

/// Simulated minutes until a patient is seen, by urgency.
fn target_response_minutes(urgency: Urgency) -> u64 {
    match urgency {
        Urgency::High => 15,
        Urgency::Medium => 45,
        Urgency::Low => 120,
    }
}

/// Builds `Report`s from a record slice.
#[derive(Debug, Clone, Copy)]
pub struct ReportGenerator {
    top_symptoms: usize,
    min_word_len: usize,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::from_config(&ReportsConfig::default())
    }
}

impl ReportGenerator {
    pub fn new(top_symptoms: usize, min_word_len: usize) -> Self {
        Self {
            top_symptoms,
            min_word_len,
        }
    }

    pub fn from_config(config: &ReportsConfig) -> Self {
        Self::new(config.top_symptoms, config.min_symptom_word_len)
    }

    /// Aggregate the records created within `range` before `now`.
    pub fn generate(
        &self,
        records: &[TriageRecord],
        range: ReportRange,
        now: DateTime<Utc>,
    ) -> Report {
        let cutoff = now - Duration::days(range.days());
        let in_range: Vec<&TriageRecord> = records
            .iter()
            .filter(|r| r.created_at >= cutoff && r.created_at <= now)
            .collect();

        debug!(
            period = %range,
            total = records.len(),
            in_range = in_range.len(),
            "Generating triage report"
        );

        Report {
            period: range,
            generated_at: now,
            total: in_range.len(),
            average_response_minutes: average_response_minutes(&in_range),
            urgency_distribution: UrgencyCounts::from_records(in_range.iter().copied()),
            daily: daily_counts(&in_range, range, now),
            pain_distribution: pain_distribution(&in_range),
            frequent_symptoms: self.frequent_symptoms(&in_range),
            records: in_range.into_iter().cloned().collect(),
        }
    }

    fn frequent_symptoms(&self, records: &[&TriageRecord]) -> Vec<SymptomFrequency> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for record in records {
            for symptom in &record.symptoms {
                for word in symptom.split_whitespace() {
                    let word = word.to_lowercase();
                    if word.chars().count() >= self.min_word_len {
                        *counts.entry(word).or_insert(0) += 1;
                    }
                }
            }
        }

        let mut ranked: Vec<SymptomFrequency> = counts
            .into_iter()
            .map(|(symptom, count)| SymptomFrequency { symptom, count })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.symptom.cmp(&b.symptom)));
        ranked.truncate(self.top_symptoms);
        ranked
    }
}

fn daily_counts(
    records: &[&TriageRecord],
    range: ReportRange,
    now: DateTime<Utc>,
) -> Vec<DailyCount> {
    let today = now.date_naive();
    (0..range.days())
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let mut counts = UrgencyCounts::default();
            for record in records.iter().filter(|r| r.created_at.date_naive() == date) {
                counts.add(record.urgency);
            }
            DailyCount {
                date,
                total: counts.total(),
                high: counts.high,
                medium: counts.medium,
                low: counts.low,
            }
        })
        .collect()
}

fn pain_distribution(records: &[&TriageRecord]) -> Vec<PainCount> {
    PainLevel::ALL
        .iter()
        .map(|&level| PainCount {
            level,
            range: level.range().to_string(),
            count: records.iter().filter(|r| r.pain_level == Some(level)).count(),
        })
        .collect()
}

/// Mean target response time over completed records, rounded; 0 if none.
fn average_response_minutes(records: &[&TriageRecord]) -> u64 {
    let completed: Vec<u64> = records
        .iter()
        .filter(|r| r.status == RecordStatus::Completed)
        .map(|r| target_response_minutes(r.urgency))
        .collect();
    if completed.is_empty() {
        return 0;
    }
    let sum: u64 = completed.iter().sum();
    (sum as f64 / completed.len() as f64).round() as u64
}
