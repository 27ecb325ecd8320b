//! Conversational triage engine.
//!
//! Walks a patient through a fixed question sequence with per-symptom
//! follow-up questions, classifies urgency, and renders the final summary.

pub mod catalog;
pub mod classifier;
pub mod conversation;
pub mod engine;
pub mod session;
pub mod summary;

pub use catalog::{
    Question, QuestionId, QuestionKind, SymptomFollowUpTable, FINISH_SELECTION,
    HIGH_PRIORITY_SYMPTOMS, QUESTIONS, SYMPTOM_OPTIONS,
};
pub use conversation::Conversation;
pub use engine::{Outcome, Prompt, TriageEngine};
pub use session::{TriageAnswers, TriageSession, TriageStep, DETAIL_SEPARATOR};
pub use summary::{SymptomEntry, TriageSummary};
