//! Persisted triage records.
//!
//! A record is the snapshot of a finished conversation that the medical
//! team works from: the patient's answers, the classified urgency and the
//! team's own handling status.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use triage_core::{PainLevel, Urgency};
use triage_engine::TriageSession;
use uuid::Uuid;

use crate::error::{RecordsError, Result};

// =============================================================================
// RecordStatus
// =============================================================================

/// Handling status of a triage record on the medical side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    InProgress,
    Completed,
    AwaitingDoctor,
}

impl RecordStatus {
    pub const ALL: [RecordStatus; 3] = [
        RecordStatus::InProgress,
        RecordStatus::Completed,
        RecordStatus::AwaitingDoctor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::InProgress => "in_progress",
            RecordStatus::Completed => "completed",
            RecordStatus::AwaitingDoctor => "awaiting_doctor",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for RecordStatus {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "in_progress" => Ok(RecordStatus::InProgress),
            "completed" => Ok(RecordStatus::Completed),
            "awaiting_doctor" => Ok(RecordStatus::AwaitingDoctor),
            _ => Err(format!("Unknown record status: {}", s)),
        }
    }
}

// =============================================================================
// TriageRecord
// =============================================================================

/// A completed triage as stored and reviewed by the medical team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageRecord {
    pub id: Uuid,
    pub patient_name: String,
    pub age: String,
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub symptom_details: BTreeMap<String, String>,
    #[serde(default)]
    pub medications: Vec<String>,
    pub pain_level: Option<PainLevel>,
    pub pain_label: String,
    pub urgency: Urgency,
    pub status: RecordStatus,
    #[serde(default)]
    pub additional_info: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TriageRecord {
    /// Snapshot a session that has reached the summary.
    ///
    /// The record keeps the session id and starts out awaiting a doctor.
    pub fn from_session(session: &TriageSession) -> Result<Self> {
        if !session.is_complete() {
            return Err(RecordsError::IncompleteSession(session.id()));
        }

        let answers = session.answers();
        let finished_at = session.updated_at();
        Ok(Self {
            id: session.id(),
            patient_name: answers.name.clone(),
            age: answers.age.clone(),
            symptoms: answers.symptoms.clone(),
            symptom_details: answers.symptom_details.clone(),
            medications: Vec::new(),
            pain_level: answers.pain_level,
            pain_label: answers.pain_label.clone(),
            urgency: session.urgency(),
            status: RecordStatus::AwaitingDoctor,
            additional_info: answers.additional_info.clone(),
            created_at: finished_at,
            updated_at: finished_at,
        })
    }

    /// Move the record to `status`, stamping `updated_at`.
    pub fn set_status(&mut self, status: RecordStatus, now: DateTime<Utc>) -> Result<()> {
        crate::status::validate_transition(self.status, status)?;
        self.status = status;
        self.updated_at = now;
        Ok(())
    }

    /// Whether `needle` (already lower-cased) occurs in the patient name or
    /// any symptom label.
    pub(crate) fn matches_search(&self, needle: &str) -> bool {
        self.patient_name.to_lowercase().contains(needle)
            || self
                .symptoms
                .iter()
                .any(|s| s.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_engine::{TriageEngine, FINISH_SELECTION};

    fn completed_session() -> TriageSession {
        let engine = TriageEngine::new();
        let (mut session, _) = engine.start();
        for reply in [
            "Maria Silva",
            "45",
            "Fever",
            FINISH_SELECTION,
            "38.5",
            "2 days",
            "yes",
            "no",
            "5-6 (Intense)",
            "None",
        ] {
            session = engine.submit(&session, reply).0;
        }
        session
    }

    // =========================================================================
    // RecordStatus
    // =========================================================================

    #[test]
    fn test_status_display_and_parse() {
        for status in RecordStatus::ALL {
            let parsed: RecordStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert_eq!(
            "awaiting-doctor".parse::<RecordStatus>().unwrap(),
            RecordStatus::AwaitingDoctor
        );
        assert!("closed".parse::<RecordStatus>().is_err());
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&RecordStatus::AwaitingDoctor).unwrap();
        assert_eq!(json, "\"awaiting_doctor\"");
    }

    // =========================================================================
    // TriageRecord
    // =========================================================================

    #[test]
    fn test_record_from_completed_session() {
        let session = completed_session();
        let record = TriageRecord::from_session(&session).unwrap();

        assert_eq!(record.id, session.id());
        assert_eq!(record.patient_name, "Maria Silva");
        assert_eq!(record.symptoms, vec!["Fever"]);
        assert_eq!(
            record.symptom_details.get("Fever").map(String::as_str),
            Some("38.5 | 2 days | yes | no")
        );
        assert_eq!(record.pain_level, Some(PainLevel::Intense));
        assert_eq!(record.urgency, Urgency::Medium);
        assert_eq!(record.status, RecordStatus::AwaitingDoctor);
        assert!(record.medications.is_empty());
    }

    #[test]
    fn test_record_from_incomplete_session_rejected() {
        let session = TriageSession::new();
        let err = TriageRecord::from_session(&session).unwrap_err();
        assert!(matches!(err, RecordsError::IncompleteSession(id) if id == session.id()));
    }

    #[test]
    fn test_set_status_updates_timestamp() {
        let mut record = TriageRecord::from_session(&completed_session()).unwrap();
        let later = record.updated_at + chrono::Duration::minutes(10);

        record.set_status(RecordStatus::Completed, later).unwrap();
        assert_eq!(record.status, RecordStatus::Completed);
        assert_eq!(record.updated_at, later);

        let err = record
            .set_status(RecordStatus::Completed, later)
            .unwrap_err();
        assert!(matches!(err, RecordsError::InvalidStatusTransition(_, _)));
    }

    #[test]
    fn test_record_json_round_trip() {
        let record = TriageRecord::from_session(&completed_session()).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        let back: TriageRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_matches_search_is_case_insensitive() {
        let record = TriageRecord::from_session(&completed_session()).unwrap();
        assert!(record.matches_search("maria"));
        assert!(record.matches_search("fev"));
        assert!(!record.matches_search("headache"));
    }
}
