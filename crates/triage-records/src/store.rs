//! JSON-file record store.
//!
//! Records are kept in insertion order in memory and persisted as a single
//! pretty-printed JSON array.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};
use triage_core::{PainLevel, Urgency};
use triage_engine::classifier;
use uuid::Uuid;

use crate::error::{RecordsError, Result};
use crate::types::{RecordStatus, TriageRecord};

/// In-memory collection of triage records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<TriageRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load records from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let records: Vec<TriageRecord> = serde_json::from_str(&content)?;
        info!(count = records.len(), "Triage records loaded from {}", path.display());
        Ok(Self { records })
    }

    /// Load records, starting empty when the file does not exist yet.
    ///
    /// A file that exists but cannot be parsed is still an error so that
    /// saved records are never silently replaced.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No records file at {}, starting empty", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save all records as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(path, content)?;
        info!(count = self.records.len(), "Triage records saved to {}", path.display());
        Ok(())
    }

    /// Add a record, replacing any existing record with the same id.
    pub fn insert(&mut self, record: TriageRecord) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&TriageRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Change a record's status.
    pub fn update_status(
        &mut self,
        id: Uuid,
        status: RecordStatus,
        now: DateTime<Utc>,
    ) -> Result<&TriageRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RecordsError::NotFound(id))?;
        let from = record.status;
        record.set_status(status, now)?;
        info!(record_id = %id, from = %from, to = %status, "Record status updated");
        Ok(record)
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[TriageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// A store pre-filled with `count` demo records ending at `now`.
    ///
    /// Record contents cycle through fixed tables, one record every seven
    /// hours going back from `now`, so a given `count` always yields the
    /// same patients, symptoms and urgencies.
    pub fn with_mock_data(count: usize, now: DateTime<Utc>) -> Self {
        let records = (0..count).map(|i| mock_record(i, now)).collect();
        Self { records }
    }
}

// =============================================================================
// Mock data
// =============================================================================

const MOCK_PATIENTS: [(&str, &str); 8] = [
    ("Maria Silva", "45"),
    ("João Santos", "62"),
    ("Ana Costa", "29"),
    ("Pedro Oliveira", "71"),
    ("Carla Mendes", "38"),
    ("Lucas Ferreira", "54"),
    ("Beatriz Rocha", "23"),
    ("Rafael Lima", "47"),
];

const MOCK_SYMPTOMS: [&[&str]; 6] = [
    &["Fever", "Headache"],
    &["Chest pain"],
    &["Nausea", "Abdominal pain"],
    &["Shortness of breath", "Fever"],
    &["Headache"],
    &["Other"],
];

const MOCK_MEDICATIONS: [&[&str]; 4] = [
    &[],
    &["Paracetamol"],
    &["Ibuprofen", "Omeprazole"],
    &["Losartan"],
];

fn mock_record(i: usize, now: DateTime<Utc>) -> TriageRecord {
    let (name, age) = MOCK_PATIENTS[i % MOCK_PATIENTS.len()];
    let symptoms: Vec<String> = MOCK_SYMPTOMS[i % MOCK_SYMPTOMS.len()]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let pain = PainLevel::ALL[(i * 3) % PainLevel::ALL.len()];
    let urgency = classifier::apply_priority_override(
        classifier::classify_pain(Urgency::Low, Some(pain)),
        &symptoms,
    );
    let status = RecordStatus::ALL[i % RecordStatus::ALL.len()];
    let created_at = now - Duration::hours(7 * i as i64);

    TriageRecord {
        id: Uuid::new_v4(),
        patient_name: name.to_string(),
        age: age.to_string(),
        symptom_details: Default::default(),
        symptoms,
        medications: MOCK_MEDICATIONS[i % MOCK_MEDICATIONS.len()]
            .iter()
            .map(|m| m.to_string())
            .collect(),
        pain_level: Some(pain),
        pain_label: pain.label().to_string(),
        urgency,
        status,
        additional_info: String::new(),
        created_at,
        updated_at: created_at,
    }
}
