use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TriageError;

// =============================================================================
// Urgency
// =============================================================================

/// Ordinal urgency classification driving queue priority.
///
/// Ordered so that `Low < Medium < High`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    #[default]
    Low,
    Medium,
    High,
}

impl Urgency {
    /// All urgency levels, most severe first.
    pub const DESCENDING: [Urgency; 3] = [Urgency::High, Urgency::Medium, Urgency::Low];

    /// Lower-case identifier used in config, CLI flags and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }

    /// Upper-case label shown in summaries and on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Low => "LOW",
            Urgency::Medium => "MEDIUM",
            Urgency::High => "HIGH",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "medium" => Ok(Urgency::Medium),
            "high" => Ok(Urgency::High),
            other => Err(TriageError::InvalidInput(format!(
                "unknown urgency '{}'",
                other
            ))),
        }
    }
}

// =============================================================================
// PainLevel
// =============================================================================

/// Pain-scale bucket offered to the patient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PainLevel {
    /// 1-2
    Mild,
    /// 3-4
    Moderate,
    /// 5-6
    Intense,
    /// 7-8
    VeryIntense,
    /// 9-10
    Unbearable,
}

impl PainLevel {
    /// All buckets in ascending order.
    pub const ALL: [PainLevel; 5] = [
        PainLevel::Mild,
        PainLevel::Moderate,
        PainLevel::Intense,
        PainLevel::VeryIntense,
        PainLevel::Unbearable,
    ];

    /// Numeric range token, e.g. `"7-8"`.
    pub fn range(&self) -> &'static str {
        match self {
            PainLevel::Mild => "1-2",
            PainLevel::Moderate => "3-4",
            PainLevel::Intense => "5-6",
            PainLevel::VeryIntense => "7-8",
            PainLevel::Unbearable => "9-10",
        }
    }

    /// Option label shown to the patient.
    pub const fn label(&self) -> &'static str {
        match self {
            PainLevel::Mild => "1-2 (Mild)",
            PainLevel::Moderate => "3-4 (Moderate)",
            PainLevel::Intense => "5-6 (Intense)",
            PainLevel::VeryIntense => "7-8 (Very intense)",
            PainLevel::Unbearable => "9-10 (Unbearable)",
        }
    }

    /// Urgency implied by this bucket on its own.
    pub fn urgency(&self) -> Urgency {
        match self {
            PainLevel::Mild => Urgency::Low,
            PainLevel::Moderate | PainLevel::Intense => Urgency::Medium,
            PainLevel::VeryIntense | PainLevel::Unbearable => Urgency::High,
        }
    }

    /// Bucket containing a score on the 1-10 scale.
    pub fn from_score(score: u8) -> Option<PainLevel> {
        match score {
            1..=2 => Some(PainLevel::Mild),
            3..=4 => Some(PainLevel::Moderate),
            5..=6 => Some(PainLevel::Intense),
            7..=8 => Some(PainLevel::VeryIntense),
            9..=10 => Some(PainLevel::Unbearable),
            _ => None,
        }
    }

    /// Recognise a bucket from a reply by its range token.
    ///
    /// Both option clicks ("7-8 (Very intense)") and typed replies that
    /// mention a range ("about 7-8") are accepted. Higher buckets are checked
    /// first. Returns `None` when no range token is present.
    pub fn parse(reply: &str) -> Option<PainLevel> {
        PainLevel::ALL
            .iter()
            .rev()
            .copied()
            .find(|level| reply.contains(level.range()))
    }
}

impl fmt::Display for PainLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Transcript messages
// =============================================================================

/// Who wrote a transcript entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    /// The triage assistant.
    Bot,
    /// The patient.
    User,
}

/// Kind tag for assistant messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Question,
    Info,
    Summary,
}

/// One entry of the append-only conversation transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub author: Author,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MessageKind>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// A message written by the patient.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            author: Author::User,
            options: None,
            kind: None,
            timestamp: Utc::now(),
        }
    }

    /// A message written by the assistant.
    pub fn bot(text: impl Into<String>, kind: MessageKind, options: Option<Vec<String>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            author: Author::Bot,
            options,
            kind: Some(kind),
            timestamp: Utc::now(),
        }
    }
}
