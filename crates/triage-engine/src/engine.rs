//! Triage conversation engine.
//!
//! `TriageEngine::submit` is a pure transition function: it takes the
//! current session and the patient's reply and returns the next session
//! together with what the assistant says next.
//!
//! Transition table:
//! - AskingName -> AskingAge
//! - AskingAge -> SelectingSymptoms
//! - SelectingSymptoms -> SelectingSymptoms (toggle a symptom)
//! - SelectingSymptoms -> DetailingSymptom (finish, a selected symptom has follow-ups)
//! - SelectingSymptoms -> AskingPainLevel (finish, no follow-ups to ask)
//! - DetailingSymptom -> DetailingSymptom (next follow-up, same or later symptom)
//! - DetailingSymptom -> AskingPainLevel (follow-ups exhausted)
//! - AskingPainLevel -> AskingAdditionalInfo
//! - AskingAdditionalInfo -> Summary
//!
//! Summary is terminal. Blank replies are ignored in every state.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};
use triage_core::{Message, MessageKind, PainLevel};

use crate::catalog::{self, QuestionId, SymptomFollowUpTable, FINISH_SELECTION};
use crate::classifier;
use crate::session::{TriageSession, TriageStep};
use crate::summary::TriageSummary;

/// The next question to render.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Prompt {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl Prompt {
    fn question(id: QuestionId) -> Self {
        let q = catalog::question(id);
        Self {
            text: q.prompt.to_string(),
            options: q.option_labels(),
        }
    }

    fn free_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: None,
        }
    }

    /// Transcript entry for this prompt.
    pub fn to_message(&self) -> Message {
        Message::bot(self.text.clone(), MessageKind::Question, self.options.clone())
    }
}

/// Result of submitting one reply.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    /// Blank reply or finished conversation: nothing changed, nothing to show.
    Ignored,
    /// Ask the patient another question.
    Prompt(Prompt),
    /// The conversation reached its summary.
    Summary(TriageSummary),
}

impl Outcome {
    /// Transcript entry for this outcome, if anything is to be shown.
    pub fn to_message(&self) -> Option<Message> {
        match self {
            Outcome::Ignored => None,
            Outcome::Prompt(prompt) => Some(prompt.to_message()),
            Outcome::Summary(summary) => {
                Some(Message::bot(summary.text(), MessageKind::Summary, None))
            }
        }
    }
}

/// What the step handler decided before urgency is re-evaluated.
enum Next {
    Ask(Prompt),
    Finish,
}

/// Drives triage sessions through the question sequence.
#[derive(Debug, Clone, Copy)]
pub struct TriageEngine {
    follow_ups: &'static SymptomFollowUpTable,
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TriageEngine {
    /// Create an engine backed by the built-in follow-up table.
    pub fn new() -> Self {
        Self {
            follow_ups: SymptomFollowUpTable::standard(),
        }
    }

    /// Start a conversation: a fresh session and its first question.
    pub fn start(&self) -> (TriageSession, Prompt) {
        let session = TriageSession::new();
        info!(session_id = %session.id(), "Triage session started");
        (session, Prompt::question(QuestionId::Name))
    }

    /// Prompt that re-asks the current step's question.
    ///
    /// Returns `None` once the session is complete.
    pub fn current_prompt(&self, session: &TriageSession) -> Option<Prompt> {
        match session.step() {
            TriageStep::AskingName => Some(Prompt::question(QuestionId::Name)),
            TriageStep::AskingAge => Some(Prompt::question(QuestionId::Age)),
            TriageStep::SelectingSymptoms => Some(self.selection_prompt(session)),
            TriageStep::DetailingSymptom { symptom, question } => {
                let label = session.answers().symptoms.get(symptom)?;
                let text = self.follow_ups.questions_for(label).get(question)?;
                Some(Prompt::free_text(*text))
            }
            TriageStep::AskingPainLevel => Some(Prompt::question(QuestionId::PainLevel)),
            TriageStep::AskingAdditionalInfo => {
                Some(Prompt::question(QuestionId::AdditionalInfo))
            }
            TriageStep::Summary => None,
        }
    }

    /// Apply one patient reply to a session.
    ///
    /// Blank replies and replies after the summary return the session
    /// unchanged with `Outcome::Ignored`.
    pub fn submit(&self, session: &TriageSession, response: &str) -> (TriageSession, Outcome) {
        let reply = response.trim();
        if reply.is_empty() {
            debug!(session_id = %session.id(), "Ignoring blank reply");
            return (session.clone(), Outcome::Ignored);
        }

        let mut next = session.clone();
        let from = next.step;

        let decision = match from {
            TriageStep::AskingName => {
                next.answers.name = response.to_string();
                next.step = TriageStep::AskingAge;
                Next::Ask(Prompt::question(QuestionId::Age))
            }
            TriageStep::AskingAge => {
                next.answers.age = response.to_string();
                next.step = TriageStep::SelectingSymptoms;
                Next::Ask(Prompt::question(QuestionId::Symptoms))
            }
            TriageStep::SelectingSymptoms => self.select_symptom(&mut next, reply),
            TriageStep::DetailingSymptom { symptom, question } => {
                self.record_detail(&mut next, symptom, question, response)
            }
            TriageStep::AskingPainLevel => {
                let level = PainLevel::parse(reply);
                next.answers.pain_label = response.to_string();
                next.answers.pain_level = level;
                next.urgency = classifier::classify_pain(next.urgency, level);
                next.step = TriageStep::AskingAdditionalInfo;
                Next::Ask(Prompt::question(QuestionId::AdditionalInfo))
            }
            TriageStep::AskingAdditionalInfo => {
                next.answers.additional_info = response.to_string();
                next.step = TriageStep::Summary;
                Next::Finish
            }
            TriageStep::Summary => {
                debug!(session_id = %session.id(), "Ignoring reply to completed session");
                return (session.clone(), Outcome::Ignored);
            }
        };

        // Re-checked after every answer, not only when symptoms change.
        next.urgency = classifier::apply_priority_override(next.urgency, &next.answers.symptoms);
        next.updated_at = Utc::now();

        debug!(
            session_id = %next.id,
            from = %from,
            to = %next.step,
            urgency = %next.urgency,
            "Triage step transition"
        );

        let outcome = match decision {
            Next::Ask(prompt) => Outcome::Prompt(prompt),
            Next::Finish => {
                info!(
                    session_id = %next.id,
                    urgency = %next.urgency,
                    symptoms = next.answers.symptoms.len(),
                    "Triage summary generated"
                );
                Outcome::Summary(TriageSummary::from_session(&next))
            }
        };

        (next, outcome)
    }

    // -------------------------------------------------------------------------
    // Step handlers
    // -------------------------------------------------------------------------

    fn select_symptom(&self, session: &mut TriageSession, reply: &str) -> Next {
        if reply != FINISH_SELECTION {
            session.answers.toggle_symptom(reply);
            return Next::Ask(self.selection_prompt(session));
        }

        match self.next_symptom_with_follow_ups(session, 0) {
            Some(index) => {
                session.step = TriageStep::DetailingSymptom {
                    symptom: index,
                    question: 0,
                };
                let label = &session.answers.symptoms[index];
                let first = self.follow_ups.questions_for(label)[0];
                Next::Ask(Prompt::free_text(format!(
                    "I'll ask a few specific questions about {}: {}",
                    label.to_lowercase(),
                    first
                )))
            }
            None => {
                session.step = TriageStep::AskingPainLevel;
                Next::Ask(Prompt::question(QuestionId::PainLevel))
            }
        }
    }

    fn record_detail(
        &self,
        session: &mut TriageSession,
        symptom: usize,
        question: usize,
        response: &str,
    ) -> Next {
        let label = match session.answers.symptoms.get(symptom) {
            Some(label) => label.clone(),
            None => {
                session.step = TriageStep::AskingPainLevel;
                return Next::Ask(Prompt::question(QuestionId::PainLevel));
            }
        };
        session.answers.append_detail(&label, response);

        let questions = self.follow_ups.questions_for(&label);
        if let Some(text) = questions.get(question + 1) {
            session.step = TriageStep::DetailingSymptom {
                symptom,
                question: question + 1,
            };
            return Next::Ask(Prompt::free_text(*text));
        }

        match self.next_symptom_with_follow_ups(session, symptom + 1) {
            Some(index) => {
                session.step = TriageStep::DetailingSymptom {
                    symptom: index,
                    question: 0,
                };
                let next_label = &session.answers.symptoms[index];
                let first = self.follow_ups.questions_for(next_label)[0];
                Next::Ask(Prompt::free_text(format!(
                    "Now about {}: {}",
                    next_label.to_lowercase(),
                    first
                )))
            }
            None => {
                session.step = TriageStep::AskingPainLevel;
                Next::Ask(Prompt::question(QuestionId::PainLevel))
            }
        }
    }

    /// First selected symptom at or after `from` that has follow-ups.
    fn next_symptom_with_follow_ups(&self, session: &TriageSession, from: usize) -> Option<usize> {
        session
            .answers
            .symptoms
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, s)| self.follow_ups.has_follow_ups(s))
            .map(|(i, _)| i)
    }

    /// Symptom question re-prompt reflecting the current selection.
    fn selection_prompt(&self, session: &TriageSession) -> Prompt {
        let selected = &session.answers.symptoms;
        if selected.is_empty() {
            return Prompt::question(QuestionId::Symptoms);
        }

        let mut options: Vec<String> = catalog::question(QuestionId::Symptoms)
            .options
            .iter()
            .map(|o| o.to_string())
            .collect();
        options.push(FINISH_SELECTION.to_string());

        Prompt {
            text: format!(
                "Selected symptoms: {}. Select more or finish.",
                selected.join(", ")
            ),
            options: Some(options),
        }
    }
}
