//! Conversation transcript.
//!
//! Wraps a `TriageSession` with the append-only message log and the
//! "currently composing" flag consumed by a presentation layer.

use triage_core::Message;

use crate::engine::{Outcome, TriageEngine};
use crate::session::TriageSession;
use crate::summary::TriageSummary;

/// One patient conversation: session state plus its transcript.
#[derive(Debug, Clone)]
pub struct Conversation {
    engine: TriageEngine,
    session: TriageSession,
    messages: Vec<Message>,
    summary: Option<TriageSummary>,
    composing: bool,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Start a conversation with the built-in engine.
    pub fn new() -> Self {
        Self::with_engine(TriageEngine::new())
    }

    /// Start a conversation; the transcript opens with the first question.
    pub fn with_engine(engine: TriageEngine) -> Self {
        let (session, prompt) = engine.start();
        Self {
            engine,
            session,
            messages: vec![prompt.to_message()],
            summary: None,
            composing: false,
        }
    }

    /// Send a patient reply.
    ///
    /// Returns the assistant's answer, or `None` when the reply was blank or
    /// the conversation is already complete. Ignored replies leave the
    /// transcript untouched.
    pub fn send(&mut self, text: &str) -> Option<&Message> {
        let (next, outcome) = self.engine.submit(&self.session, text);
        let reply = outcome.to_message()?;

        self.session = next;
        self.messages.push(Message::user(text));
        self.messages.push(reply);
        if let Outcome::Summary(summary) = outcome {
            self.summary = Some(summary);
        }
        self.composing = false;
        self.messages.last()
    }

    /// Mark the assistant as typing (cosmetic, for the presentation layer).
    pub fn set_composing(&mut self, composing: bool) {
        self.composing = composing;
    }

    pub fn is_composing(&self) -> bool {
        self.composing
    }

    pub fn session(&self) -> &TriageSession {
        &self.session
    }

    /// The full transcript, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Options offered by the most recent assistant message.
    pub fn current_options(&self) -> Option<&[String]> {
        self.messages
            .last()
            .and_then(|m| m.options.as_deref())
    }

    pub fn summary(&self) -> Option<&TriageSummary> {
        self.summary.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }
}
