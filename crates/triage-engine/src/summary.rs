//! Terminal triage summary.

use std::fmt;

use serde::Serialize;
use triage_core::Urgency;
use uuid::Uuid;

use crate::session::TriageSession;

/// A selected symptom with its accumulated follow-up answers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SymptomEntry {
    pub symptom: String,
    pub details: Option<String>,
}

/// Summary shown to the patient and handed to the medical team.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TriageSummary {
    pub session_id: Uuid,
    pub patient_name: String,
    pub age: String,
    pub symptoms: Vec<SymptomEntry>,
    pub pain_level: String,
    pub urgency: Urgency,
    pub additional_info: String,
}

impl TriageSummary {
    /// Build the summary from a session's answers and urgency.
    pub fn from_session(session: &TriageSession) -> Self {
        let answers = session.answers();
        let symptoms = answers
            .symptoms
            .iter()
            .map(|s| SymptomEntry {
                symptom: s.clone(),
                details: answers.detail(s).map(str::to_string),
            })
            .collect();

        Self {
            session_id: session.id(),
            patient_name: answers.name.clone(),
            age: answers.age.clone(),
            symptoms,
            pain_level: answers.pain_label.clone(),
            urgency: session.urgency(),
            additional_info: answers.additional_info.clone(),
        }
    }

    /// Rendered summary text.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TriageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "**TRIAGE SUMMARY**\n\n\
             **Patient:** {}\n\
             **Age:** {} years\n\
             **Symptoms:**\n",
            self.patient_name, self.age,
        )?;

        if self.symptoms.is_empty() {
            writeln!(f, "• None reported")?;
        }
        for entry in &self.symptoms {
            write!(f, "• {}", entry.symptom)?;
            if let Some(details) = &entry.details {
                write!(f, ": {}", details)?;
            }
            writeln!(f)?;
        }

        let additional = if self.additional_info.trim().is_empty() {
            "None"
        } else {
            self.additional_info.as_str()
        };

        write!(
            f,
            "**Pain level:** {}\n\
             **Urgency:** {}\n\
             **Additional information:** {}\n\n\
             This summary has been sent to the medical team. You will be called \
             shortly according to the priority of your case.",
            self.pain_level,
            self.urgency.label(),
            additional,
        )
    }
}
