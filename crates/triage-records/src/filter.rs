//! Record filtering, sorting and urgency counts for the dashboard listing.

use std::cmp::Reverse;
use std::fmt;

use serde::{Deserialize, Serialize};
use triage_core::Urgency;

use crate::types::{RecordStatus, TriageRecord};

/// Listing order for records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
    /// Most urgent first, newest first within the same urgency.
    UrgencyDesc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::NewestFirst => write!(f, "newest"),
            SortOrder::OldestFirst => write!(f, "oldest"),
            SortOrder::UrgencyDesc => write!(f, "urgency"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" | "newest_first" => Ok(SortOrder::NewestFirst),
            "oldest" | "oldest_first" => Ok(SortOrder::OldestFirst),
            "urgency" | "urgency_desc" => Ok(SortOrder::UrgencyDesc),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

/// Dashboard filter. Unset fields match every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Case-insensitive substring over patient name and symptom labels.
    pub search: Option<String>,
    pub urgency: Option<Urgency>,
    pub status: Option<RecordStatus>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = Some(urgency);
        self
    }

    pub fn with_status(mut self, status: RecordStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, record: &TriageRecord) -> bool {
        if let Some(urgency) = self.urgency {
            if record.urgency != urgency {
                return false;
            }
        }
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => record.matches_search(&needle.to_lowercase()),
            _ => true,
        }
    }

    /// Matching records in the requested order.
    pub fn apply<'a>(
        &self,
        records: &'a [TriageRecord],
        order: SortOrder,
    ) -> Vec<&'a TriageRecord> {
        let mut matched: Vec<&TriageRecord> = records.iter().filter(|r| self.matches(r)).collect();
        match order {
            SortOrder::NewestFirst => matched.sort_by_key(|r| Reverse(r.created_at)),
            SortOrder::OldestFirst => matched.sort_by_key(|r| r.created_at),
            SortOrder::UrgencyDesc => {
                matched.sort_by_key(|r| (Reverse(r.urgency), Reverse(r.created_at)))
            }
        }
        matched
    }
}

/// Per-urgency record counts (dashboard stat cards).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl UrgencyCounts {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TriageRecord>) -> Self {
        let mut counts = Self::default();
        for record in records {
            counts.add(record.urgency);
        }
        counts
    }

    pub fn add(&mut self, urgency: Urgency) {
        match urgency {
            Urgency::High => self.high += 1,
            Urgency::Medium => self.medium += 1,
            Urgency::Low => self.low += 1,
        }
    }

    pub fn get(&self, urgency: Urgency) -> usize {
        match urgency {
            Urgency::High => self.high,
            Urgency::Medium => self.medium,
            Urgency::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}
