//! Triage session state.
//!
//! A `TriageSession` is a plain value: the engine never mutates one in
//! place, it returns the next session from each accepted reply.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use triage_core::{PainLevel, Urgency};
use uuid::Uuid;

/// Where a conversation currently stands.
///
/// `DetailingSymptom` is the nested loop over follow-up questions:
/// `symptom` indexes the selected symptom list and `question` indexes that
/// symptom's follow-up questions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum TriageStep {
    AskingName,
    AskingAge,
    SelectingSymptoms,
    DetailingSymptom { symptom: usize, question: usize },
    AskingPainLevel,
    AskingAdditionalInfo,
    Summary,
}

impl TriageStep {
    /// Position in the top-level question sequence.
    ///
    /// The follow-up loop belongs to the symptom question; the terminal
    /// summary sits one past the last question.
    pub fn question_index(&self) -> usize {
        match self {
            TriageStep::AskingName => 0,
            TriageStep::AskingAge => 1,
            TriageStep::SelectingSymptoms | TriageStep::DetailingSymptom { .. } => 2,
            TriageStep::AskingPainLevel => 3,
            TriageStep::AskingAdditionalInfo => 4,
            TriageStep::Summary => 5,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TriageStep::Summary)
    }
}

impl fmt::Display for TriageStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriageStep::AskingName => write!(f, "AskingName"),
            TriageStep::AskingAge => write!(f, "AskingAge"),
            TriageStep::SelectingSymptoms => write!(f, "SelectingSymptoms"),
            TriageStep::DetailingSymptom { symptom, question } => {
                write!(f, "DetailingSymptom({}, q{})", symptom, question)
            }
            TriageStep::AskingPainLevel => write!(f, "AskingPainLevel"),
            TriageStep::AskingAdditionalInfo => write!(f, "AskingAdditionalInfo"),
            TriageStep::Summary => write!(f, "Summary"),
        }
    }
}

/// Structured answers accumulated over a conversation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TriageAnswers {
    pub name: String,
    pub age: String,
    /// Selected symptoms in selection order, no duplicates.
    pub symptoms: Vec<String>,
    /// Follow-up answers per symptom, joined with `" | "`.
    pub symptom_details: BTreeMap<String, String>,
    /// Pain reply exactly as given.
    pub pain_label: String,
    /// Recognised pain bucket, if the reply named one.
    pub pain_level: Option<PainLevel>,
    pub additional_info: String,
}

/// Separator between successive follow-up answers for one symptom.
pub const DETAIL_SEPARATOR: &str = " | ";

impl TriageAnswers {
    /// Toggle a symptom: add it if absent, remove it if present.
    ///
    /// Returns `true` when the symptom is selected afterwards.
    pub fn toggle_symptom(&mut self, symptom: &str) -> bool {
        if let Some(pos) = self.symptoms.iter().position(|s| s == symptom) {
            self.symptoms.remove(pos);
            false
        } else {
            self.symptoms.push(symptom.to_string());
            true
        }
    }

    /// Append a follow-up answer to a symptom's detail text.
    pub fn append_detail(&mut self, symptom: &str, answer: &str) {
        match self.symptom_details.get_mut(symptom) {
            Some(existing) => {
                existing.push_str(DETAIL_SEPARATOR);
                existing.push_str(answer);
            }
            None => {
                self.symptom_details
                    .insert(symptom.to_string(), answer.to_string());
            }
        }
    }

    /// Detail text recorded for a symptom.
    pub fn detail(&self, symptom: &str) -> Option<&str> {
        self.symptom_details.get(symptom).map(String::as_str)
    }
}

/// State of one patient-facing conversation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriageSession {
    pub(crate) id: Uuid,
    pub(crate) step: TriageStep,
    pub(crate) answers: TriageAnswers,
    pub(crate) urgency: Urgency,
    pub(crate) updated_at: DateTime<Utc>,
}

impl TriageSession {
    /// A fresh session waiting for the patient's name.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            step: TriageStep::AskingName,
            answers: TriageAnswers::default(),
            urgency: Urgency::Low,
            updated_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> TriageStep {
        self.step
    }

    pub fn answers(&self) -> &TriageAnswers {
        &self.answers
    }

    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Position in the top-level question sequence (0..=5).
    pub fn current_question_index(&self) -> usize {
        self.step.question_index()
    }

    /// Whether follow-up questions for a selected symptom are being asked.
    pub fn in_symptom_follow_up_mode(&self) -> bool {
        matches!(self.step, TriageStep::DetailingSymptom { .. })
    }

    /// Index of the symptom being detailed, while in follow-up mode.
    pub fn active_symptom_index(&self) -> Option<usize> {
        match self.step {
            TriageStep::DetailingSymptom { symptom, .. } => Some(symptom),
            _ => None,
        }
    }

    /// Label of the symptom being detailed, while in follow-up mode.
    pub fn active_symptom(&self) -> Option<&str> {
        self.active_symptom_index()
            .and_then(|i| self.answers.symptoms.get(i))
            .map(String::as_str)
    }

    /// Whether the summary has been produced.
    pub fn is_complete(&self) -> bool {
        self.step.is_terminal()
    }
}

impl Default for TriageSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // TriageStep
    // =====================================================================

    #[test]
    fn test_question_index_per_step() {
        assert_eq!(TriageStep::AskingName.question_index(), 0);
        assert_eq!(TriageStep::AskingAge.question_index(), 1);
        assert_eq!(TriageStep::SelectingSymptoms.question_index(), 2);
        assert_eq!(
            TriageStep::DetailingSymptom {
                symptom: 1,
                question: 3
            }
            .question_index(),
            2
        );
        assert_eq!(TriageStep::AskingPainLevel.question_index(), 3);
        assert_eq!(TriageStep::AskingAdditionalInfo.question_index(), 4);
        assert_eq!(TriageStep::Summary.question_index(), 5);
    }

    #[test]
    fn test_only_summary_is_terminal() {
        assert!(TriageStep::Summary.is_terminal());
        assert!(!TriageStep::AskingAdditionalInfo.is_terminal());
        assert!(!TriageStep::SelectingSymptoms.is_terminal());
    }

    #[test]
    fn test_step_display() {
        assert_eq!(TriageStep::AskingName.to_string(), "AskingName");
        assert_eq!(
            TriageStep::DetailingSymptom {
                symptom: 0,
                question: 2
            }
            .to_string(),
            "DetailingSymptom(0, q2)"
        );
    }

    #[test]
    fn test_step_serialization_is_tagged() {
        let json = serde_json::to_value(TriageStep::DetailingSymptom {
            symptom: 1,
            question: 0,
        })
        .unwrap();
        assert_eq!(json["step"], "detailing_symptom");
        assert_eq!(json["symptom"], 1);
    }

    // =====================================================================
    // TriageAnswers
    // =====================================================================

    #[test]
    fn test_toggle_symptom_adds_then_removes() {
        let mut answers = TriageAnswers::default();
        assert!(answers.toggle_symptom("Fever"));
        assert!(answers.toggle_symptom("Nausea"));
        assert_eq!(answers.symptoms, vec!["Fever", "Nausea"]);

        assert!(!answers.toggle_symptom("Fever"));
        assert_eq!(answers.symptoms, vec!["Nausea"]);
    }

    #[test]
    fn test_toggle_preserves_insertion_order() {
        let mut answers = TriageAnswers::default();
        answers.toggle_symptom("Nausea");
        answers.toggle_symptom("Headache");
        answers.toggle_symptom("Fever");
        assert_eq!(answers.symptoms, vec!["Nausea", "Headache", "Fever"]);
    }

    #[test]
    fn test_append_detail_joins_with_separator() {
        let mut answers = TriageAnswers::default();
        answers.append_detail("Headache", "3 days");
        assert_eq!(answers.detail("Headache"), Some("3 days"));
        answers.append_detail("Headache", "pulsing");
        assert_eq!(answers.detail("Headache"), Some("3 days | pulsing"));
        assert_eq!(answers.detail("Fever"), None);
    }

    // =====================================================================
    // TriageSession
    // =====================================================================

    #[test]
    fn test_new_session_defaults() {
        let session = TriageSession::new();
        assert_eq!(session.step(), TriageStep::AskingName);
        assert_eq!(session.current_question_index(), 0);
        assert_eq!(session.urgency(), Urgency::Low);
        assert!(!session.in_symptom_follow_up_mode());
        assert_eq!(session.active_symptom_index(), None);
        assert!(!session.is_complete());
        assert_eq!(session.answers(), &TriageAnswers::default());
    }

    #[test]
    fn test_active_symptom_in_follow_up_mode() {
        let mut session = TriageSession::new();
        session.answers.toggle_symptom("Fever");
        session.answers.toggle_symptom("Nausea");
        session.step = TriageStep::DetailingSymptom {
            symptom: 1,
            question: 0,
        };
        assert!(session.in_symptom_follow_up_mode());
        assert_eq!(session.active_symptom_index(), Some(1));
        assert_eq!(session.active_symptom(), Some("Nausea"));
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        assert_ne!(TriageSession::new().id(), TriageSession::new().id());
    }
}
