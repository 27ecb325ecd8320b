//! Static question catalog and symptom follow-up table.
//!
//! Everything here is defined at compile time and never mutated.

use serde::Serialize;
use triage_core::PainLevel;

/// Option label that closes the multi-select symptom question.
pub const FINISH_SELECTION: &str = "Finish selection";

/// Symptoms that force urgency to high whenever selected.
pub const HIGH_PRIORITY_SYMPTOMS: [&str; 2] = ["Chest pain", "Shortness of breath"];

/// Symptom choices offered by the symptom question.
pub const SYMPTOM_OPTIONS: [&str; 7] = [
    "Headache",
    "Fever",
    "Chest pain",
    "Shortness of breath",
    "Nausea",
    "Abdominal pain",
    "Other",
];

/// Pain buckets offered by the pain question, in ascending order.
pub const PAIN_OPTIONS: [&str; 5] = [
    PainLevel::Mild.label(),
    PainLevel::Moderate.label(),
    PainLevel::Intense.label(),
    PainLevel::VeryIntense.label(),
    PainLevel::Unbearable.label(),
];

/// How a question expects to be answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    FreeText,
    SingleChoice,
    MultiChoice,
    Scale,
}

/// Identifier of a top-level question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionId {
    Name,
    Age,
    Symptoms,
    PainLevel,
    AdditionalInfo,
}

/// A top-level question definition.
#[derive(Debug, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: &'static str,
    pub kind: QuestionKind,
    pub options: &'static [&'static str],
    /// Per-choice follow-up questions (symptom question only).
    #[serde(skip)]
    pub follow_ups: Option<&'static SymptomFollowUpTable>,
}

impl Question {
    /// Choice labels as owned strings, or `None` for free-text questions.
    pub fn option_labels(&self) -> Option<Vec<String>> {
        if self.options.is_empty() {
            None
        } else {
            Some(self.options.iter().map(|o| o.to_string()).collect())
        }
    }
}

/// The fixed top-level question sequence.
pub static QUESTIONS: [Question; 5] = [
    Question {
        id: QuestionId::Name,
        prompt: "Hello! I'm the hospital's triage assistant. I'll ask you a few questions \
                 to help our medical team prepare for your visit. What is your full name?",
        kind: QuestionKind::FreeText,
        options: &[],
        follow_ups: None,
    },
    Question {
        id: QuestionId::Age,
        prompt: "Thank you! How old are you?",
        kind: QuestionKind::FreeText,
        options: &[],
        follow_ups: None,
    },
    Question {
        id: QuestionId::Symptoms,
        prompt: "Which symptoms are you experiencing today? (Select all that apply)",
        kind: QuestionKind::MultiChoice,
        options: &SYMPTOM_OPTIONS,
        follow_ups: Some(&FOLLOW_UP_TABLE),
    },
    Question {
        id: QuestionId::PainLevel,
        prompt: "On a scale from 1 to 10, how would you rate your pain or discomfort?",
        kind: QuestionKind::Scale,
        options: &PAIN_OPTIONS,
        follow_ups: None,
    },
    Question {
        id: QuestionId::AdditionalInfo,
        prompt: "Is there anything else you would like to tell us about your current condition? \
                 (Medications in use, allergies, etc.)",
        kind: QuestionKind::FreeText,
        options: &[],
        follow_ups: None,
    },
];

/// Look up a top-level question by identifier.
pub fn question(id: QuestionId) -> &'static Question {
    match id {
        QuestionId::Name => &QUESTIONS[0],
        QuestionId::Age => &QUESTIONS[1],
        QuestionId::Symptoms => &QUESTIONS[2],
        QuestionId::PainLevel => &QUESTIONS[3],
        QuestionId::AdditionalInfo => &QUESTIONS[4],
    }
}

/// Whether a symptom label belongs to the high-priority set.
pub fn is_high_priority(symptom: &str) -> bool {
    HIGH_PRIORITY_SYMPTOMS.contains(&symptom)
}

// =============================================================================
// SymptomFollowUpTable
// =============================================================================

/// Mapping from symptom label to its ordered follow-up questions.
#[derive(Debug)]
pub struct SymptomFollowUpTable {
    entries: &'static [(&'static str, &'static [&'static str])],
}

/// The built-in follow-up table.
pub static FOLLOW_UP_TABLE: SymptomFollowUpTable = SymptomFollowUpTable {
    entries: &[
        (
            "Headache",
            &[
                "How long have you had this headache?",
                "Is the pain pulsing, pressing or stabbing?",
                "Are you sensitive to light or sound?",
                "Have you had similar headaches before?",
            ],
        ),
        (
            "Fever",
            &[
                "What is the highest temperature you have measured?",
                "How long have you had a fever?",
                "Do you have chills or sweating?",
                "Have you taken any medication for the fever?",
            ],
        ),
        (
            "Chest pain",
            &[
                "Is the pain tight, burning or stabbing?",
                "Does the pain spread to your arm, neck or jaw?",
                "Does it get worse when you breathe or move?",
                "How long ago did it start?",
            ],
        ),
        (
            "Shortness of breath",
            &[
                "Did the shortness of breath start suddenly or gradually?",
                "Does it get worse lying down or better sitting up?",
                "Do you have a cough along with it?",
                "Can you speak full sentences?",
            ],
        ),
        (
            "Nausea",
            &[
                "Have you vomited?",
                "Does the nausea get worse with movement?",
                "Can you keep fluids down?",
                "Do you also have abdominal pain?",
            ],
        ),
        (
            "Abdominal pain",
            &[
                "Where exactly is the pain? (upper, lower, side)",
                "Is the pain constant or cramping?",
                "Does any position make it better or worse?",
                "Have you noticed any changes in your bowel habits?",
            ],
        ),
    ],
};

impl SymptomFollowUpTable {
    /// The built-in table.
    pub fn standard() -> &'static SymptomFollowUpTable {
        &FOLLOW_UP_TABLE
    }

    /// Follow-up questions for a symptom; empty for unknown symptoms.
    pub fn questions_for(&self, symptom: &str) -> &'static [&'static str] {
        self.entries
            .iter()
            .find(|(label, _)| *label == symptom)
            .map(|(_, questions)| *questions)
            .unwrap_or(&[])
    }

    /// Whether the symptom has at least one follow-up question.
    pub fn has_follow_ups(&self, symptom: &str) -> bool {
        !self.questions_for(symptom).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_order() {
        let ids: Vec<QuestionId> = QUESTIONS.iter().map(|q| q.id).collect();
        assert_eq!(
            ids,
            vec![
                QuestionId::Name,
                QuestionId::Age,
                QuestionId::Symptoms,
                QuestionId::PainLevel,
                QuestionId::AdditionalInfo,
            ]
        );
    }

    #[test]
    fn test_question_lookup_matches_sequence() {
        for q in QUESTIONS.iter() {
            assert_eq!(question(q.id).id, q.id);
        }
    }

    #[test]
    fn test_free_text_questions_have_no_options() {
        assert!(question(QuestionId::Name).option_labels().is_none());
        assert!(question(QuestionId::Age).option_labels().is_none());
        assert!(question(QuestionId::AdditionalInfo).option_labels().is_none());
    }

    #[test]
    fn test_pain_options_match_pain_levels() {
        let labels: Vec<&str> = PainLevel::ALL.iter().map(|l| l.label()).collect();
        assert_eq!(PAIN_OPTIONS.to_vec(), labels);
        assert_eq!(question(QuestionId::PainLevel).kind, QuestionKind::Scale);
    }

    #[test]
    fn test_symptom_question_carries_follow_up_table() {
        let q = question(QuestionId::Symptoms);
        assert_eq!(q.kind, QuestionKind::MultiChoice);
        assert!(q.follow_ups.is_some());
        assert!(!q.options.contains(&FINISH_SELECTION));
    }

    #[test]
    fn test_follow_up_lookup() {
        let table = SymptomFollowUpTable::standard();
        let headache = table.questions_for("Headache");
        assert_eq!(headache.len(), 4);
        assert_eq!(headache[0], "How long have you had this headache?");
        assert!(table.has_follow_ups("Chest pain"));
    }

    #[test]
    fn test_follow_up_lookup_unknown_symptom_is_empty() {
        let table = SymptomFollowUpTable::standard();
        assert!(table.questions_for("Other").is_empty());
        assert!(table.questions_for("Back pain").is_empty());
        assert!(table.questions_for("headache").is_empty());
        assert!(!table.has_follow_ups("Other"));
    }

    #[test]
    fn test_every_option_except_other_has_follow_ups() {
        let table = SymptomFollowUpTable::standard();
        for symptom in SYMPTOM_OPTIONS.iter().filter(|s| **s != "Other") {
            assert!(table.has_follow_ups(symptom), "{} has no follow-ups", symptom);
        }
    }

    #[test]
    fn test_high_priority_symptoms() {
        assert!(is_high_priority("Chest pain"));
        assert!(is_high_priority("Shortness of breath"));
        assert!(!is_high_priority("Fever"));
        assert!(!is_high_priority("chest pain"));
    }
}
