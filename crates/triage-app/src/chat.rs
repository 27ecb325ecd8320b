//! Interactive terminal conversation.
//!
//! Reads patient replies from stdin and prints the assistant's messages to
//! stdout. Logs go to stderr, so the transcript stays readable.

use std::io::Write;
use std::path::Path;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{sleep, Duration};
use tracing::{debug, info};
use triage_core::config::ConversationConfig;
use triage_core::{Message, PainLevel, Result};
use triage_engine::{Conversation, TriageStep};
use triage_records::{RecordStore, TriageRecord};

/// Map a typed reply to the text submitted to the engine.
///
/// At the pain question a bare number is a score on the 1-10 scale and is
/// replaced by its bucket's label. At other questions a bare number picks the
/// matching 1-based option of the last prompt. Anything else is submitted as
/// typed.
pub fn resolve_reply(input: &str, step: TriageStep, options: Option<&[String]>) -> String {
    let trimmed = input.trim();
    if step == TriageStep::AskingPainLevel {
        if let Some(level) = trimmed.parse::<u8>().ok().and_then(PainLevel::from_score) {
            return level.label().to_string();
        }
    } else if let (Some(options), Ok(n)) = (options, trimmed.parse::<usize>()) {
        if let Some(option) = n.checked_sub(1).and_then(|i| options.get(i)) {
            return option.clone();
        }
    }
    input.trim_end_matches(['\r', '\n']).to_string()
}

/// Render an assistant message for the terminal.
///
/// Options are numbered for picking by number, except on the pain question
/// where typed numbers are scores and the options are plain bullets.
pub fn render_message(message: &Message, step: TriageStep, show_options: bool) -> String {
    let mut out = format!("Assistant: {}", message.text);
    if show_options {
        if let Some(options) = &message.options {
            for (i, option) in options.iter().enumerate() {
                if step == TriageStep::AskingPainLevel {
                    out.push_str(&format!("\n  - {}", option));
                } else {
                    out.push_str(&format!("\n  {}. {}", i + 1, option));
                }
            }
        }
    }
    out
}

fn print_flush(text: &str) {
    print!("{}", text);
    let _ = std::io::stdout().flush();
}

/// Run one conversation to completion or end of input.
///
/// When `records_path` is set, the finished triage is appended to the
/// records file.
pub async fn run(config: &ConversationConfig, records_path: Option<&Path>) -> Result<()> {
    let mut convo = Conversation::new();

    sleep(Duration::from_millis(config.greeting_delay_ms)).await;
    for message in convo.messages() {
        println!("{}\n", render_message(message, convo.session().step(), config.show_options));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !convo.is_complete() {
        print_flush("> ");
        let Some(line) = lines.next_line().await? else {
            debug!(session_id = %convo.session().id(), "Input closed before summary");
            println!();
            return Ok(());
        };

        let reply = resolve_reply(&line, convo.session().step(), convo.current_options());
        if reply.trim().is_empty() {
            continue;
        }

        convo.set_composing(true);
        print_flush("Assistant is typing…");
        sleep(Duration::from_millis(config.thinking_delay_ms)).await;
        print_flush("\r                     \r");

        if convo.send(&reply).is_some() {
            let step = convo.session().step();
            if let Some(message) = convo.messages().last() {
                println!("{}\n", render_message(message, step, config.show_options));
            }
        }
    }

    if let (Some(path), Some(summary)) = (records_path, convo.summary()) {
        let record = TriageRecord::from_session(convo.session())?;
        let mut store = RecordStore::load_or_default(path)?;
        store.insert(record);
        store.save(path)?;
        info!(
            record_id = %summary.session_id,
            urgency = %summary.urgency,
            "Triage record stored"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::{Author, MessageKind, Urgency};
    use triage_engine::FINISH_SELECTION;

    fn options() -> Vec<String> {
        vec!["Headache".to_string(), "Fever".to_string(), "Other".to_string()]
    }

    /// A conversation waiting for the pain answer, with no symptoms selected.
    fn at_pain_question() -> Conversation {
        let mut convo = Conversation::new();
        for reply in ["Ana", "30", FINISH_SELECTION] {
            convo.send(reply);
        }
        assert_eq!(convo.session().step(), TriageStep::AskingPainLevel);
        convo
    }

    /// Type `input` at the pain question and return the resulting urgency.
    fn urgency_for_typed_pain(input: &str) -> Urgency {
        let mut convo = at_pain_question();
        let reply = resolve_reply(input, convo.session().step(), convo.current_options());
        convo.send(&reply);
        convo.session().urgency()
    }

    // =========================================================================
    // Reply resolution
    // =========================================================================

    #[test]
    fn test_numeric_reply_selects_option() {
        let opts = options();
        let step = TriageStep::SelectingSymptoms;
        assert_eq!(resolve_reply("2", step, Some(opts.as_slice())), "Fever");
        assert_eq!(resolve_reply(" 1 \n", step, Some(opts.as_slice())), "Headache");
    }

    #[test]
    fn test_out_of_range_number_is_submitted_as_text() {
        let opts = options();
        let step = TriageStep::SelectingSymptoms;
        assert_eq!(resolve_reply("0", step, Some(opts.as_slice())), "0");
        assert_eq!(resolve_reply("4", step, Some(opts.as_slice())), "4");
    }

    #[test]
    fn test_number_without_options_is_text() {
        // Age answers are plain numbers.
        assert_eq!(resolve_reply("45", TriageStep::AskingAge, None), "45");
    }

    #[test]
    fn test_text_reply_passes_through() {
        let opts = options();
        let step = TriageStep::SelectingSymptoms;
        assert_eq!(resolve_reply("Fever\r\n", step, Some(opts.as_slice())), "Fever");
        assert_eq!(resolve_reply("  Maria Silva", TriageStep::AskingName, None), "  Maria Silva");
    }

    #[test]
    fn test_pain_score_maps_to_bucket_label() {
        let convo = at_pain_question();
        let step = convo.session().step();
        let opts = convo.current_options();
        assert_eq!(resolve_reply("4", step, opts), PainLevel::Moderate.label());
        assert_eq!(resolve_reply(" 9\n", step, opts), PainLevel::Unbearable.label());
        assert_eq!(resolve_reply("10", step, opts), PainLevel::Unbearable.label());
        assert_eq!(resolve_reply("0", step, opts), "0");
        assert_eq!(resolve_reply("11", step, opts), "11");
        assert_eq!(resolve_reply("7-8 (Very intense)", step, opts), "7-8 (Very intense)");
    }

    #[test]
    fn test_typed_pain_score_sets_urgency() {
        assert_eq!(urgency_for_typed_pain("9"), Urgency::High);
        assert_eq!(urgency_for_typed_pain("7"), Urgency::High);
        assert_eq!(urgency_for_typed_pain("4"), Urgency::Medium);
        assert_eq!(urgency_for_typed_pain("5"), Urgency::Medium);
        assert_eq!(urgency_for_typed_pain("2"), Urgency::Low);
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    #[test]
    fn test_render_message_with_options() {
        let message = Message::bot("Pick one", MessageKind::Question, Some(options()));
        assert_eq!(message.author, Author::Bot);
        let step = TriageStep::SelectingSymptoms;
        let rendered = render_message(&message, step, true);
        assert_eq!(
            rendered,
            "Assistant: Pick one\n  1. Headache\n  2. Fever\n  3. Other"
        );
        assert_eq!(render_message(&message, step, false), "Assistant: Pick one");
    }

    #[test]
    fn test_pain_options_are_not_numbered() {
        let convo = at_pain_question();
        let message = convo.messages().last().unwrap();
        let rendered = render_message(message, convo.session().step(), true);
        assert!(rendered.contains("\n  - 1-2 (Mild)"));
        assert!(!rendered.contains("1. "));
    }
}
