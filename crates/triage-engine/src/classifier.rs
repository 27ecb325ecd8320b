//! Rule-based urgency classification.
//!
//! Two rules feed the urgency level:
//! - the pain bucket, recomputed from the pain reply;
//! - the high-priority symptom override, re-checked after every answer.

use triage_core::{PainLevel, Urgency};

use crate::catalog::is_high_priority;

/// Urgency after a pain reply.
///
/// A recognised bucket replaces the current level; an unrecognised reply
/// leaves it unchanged.
pub fn classify_pain(current: Urgency, pain: Option<PainLevel>) -> Urgency {
    match pain {
        Some(level) => level.urgency(),
        None => current,
    }
}

/// Whether any selected symptom is in the high-priority set.
pub fn has_high_priority_symptom(symptoms: &[String]) -> bool {
    symptoms.iter().any(|s| is_high_priority(s))
}

/// Force urgency to high when a high-priority symptom is selected.
pub fn apply_priority_override(current: Urgency, symptoms: &[String]) -> Urgency {
    if has_high_priority_symptom(symptoms) {
        Urgency::High
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symptoms(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pain_buckets_without_priority_symptoms() {
        let cases = [
            ("9-10 (Unbearable)", Urgency::High),
            ("7-8 (Very intense)", Urgency::High),
            ("5-6 (Intense)", Urgency::Medium),
            ("3-4 (Moderate)", Urgency::Medium),
            ("1-2 (Mild)", Urgency::Low),
            ("no idea", Urgency::Low),
        ];
        for (reply, expected) in cases {
            let urgency = classify_pain(Urgency::Low, PainLevel::parse(reply));
            let urgency = apply_priority_override(urgency, &symptoms(&["Fever"]));
            assert_eq!(urgency, expected, "reply {:?}", reply);
        }
    }

    #[test]
    fn test_unrecognised_pain_keeps_current_level() {
        assert_eq!(classify_pain(Urgency::Medium, None), Urgency::Medium);
        assert_eq!(classify_pain(Urgency::High, None), Urgency::High);
    }

    #[test]
    fn test_priority_symptom_beats_every_pain_level() {
        for level in PainLevel::ALL {
            for priority in ["Chest pain", "Shortness of breath"] {
                let urgency = classify_pain(Urgency::Low, Some(level));
                let urgency = apply_priority_override(urgency, &symptoms(&["Nausea", priority]));
                assert_eq!(urgency, Urgency::High);
            }
        }
    }

    #[test]
    fn test_override_without_priority_symptom_is_identity() {
        for current in Urgency::DESCENDING {
            assert_eq!(
                apply_priority_override(current, &symptoms(&["Headache", "Other"])),
                current
            );
        }
        assert_eq!(apply_priority_override(Urgency::Low, &[]), Urgency::Low);
    }

    #[test]
    fn test_has_high_priority_symptom() {
        assert!(has_high_priority_symptom(&symptoms(&["Fever", "Chest pain"])));
        assert!(!has_high_priority_symptom(&symptoms(&["Fever", "chest pain"])));
        assert!(!has_high_priority_symptom(&[]));
    }
}
