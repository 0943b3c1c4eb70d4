//! Prompt assembly for the chat assistant.

use crate::session::ChatTurn;

/// Default number of past turns included in a prompt.
pub const DEFAULT_MAX_HISTORY_TURNS: usize = 6;

const SYSTEM_INSTRUCTION: &str = "You are a precise, professional financial analyst assistant. \
Use the provided company financial data (KPIs and ratios) to answer the user's question \
factually, and cite which metrics you used where possible. If the data needed to answer \
is missing, say so plainly instead of guessing.";

/// Structured financial context passed alongside each question.
///
/// Rendered as one `key: value` line per entry, typically the latest ratio
/// record plus issuer KPIs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatContext {
    entries: Vec<(String, String)>,
}

impl ChatContext {
    /// Create an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append one context entry.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// True when no entries have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn render(&self) -> String {
        let mut block = String::new();
        for (key, value) in &self.entries {
            block.push_str(key);
            block.push_str(": ");
            block.push_str(value);
            block.push('\n');
        }
        block
    }
}

/// Build the full prompt sent to the assistant.
///
/// Layout: system instruction, the structured context block, the last
/// `max_history_turns` conversation turns, then the current question.
/// Only the prompt window is bounded; the caller's history may be longer.
#[must_use]
pub fn build_prompt(
    question: &str,
    context: &ChatContext,
    history: &[ChatTurn],
    max_history_turns: usize,
) -> String {
    let mut prompt = String::new();

    prompt.push_str(SYSTEM_INSTRUCTION);
    prompt.push_str("\n\n---\nCompany financial data:\n");
    if context.is_empty() {
        prompt.push_str("No financial context provided.\n");
    } else {
        prompt.push_str(&context.render());
    }
    prompt.push_str("---\n\nConversation so far:\n");

    let start = history.len().saturating_sub(max_history_turns);
    for turn in &history[start..] {
        prompt.push_str("User: ");
        prompt.push_str(&turn.question);
        prompt.push('\n');
        prompt.push_str("Assistant: ");
        prompt.push_str(&turn.answer);
        prompt.push('\n');
    }

    prompt.push_str("User: ");
    prompt.push_str(question);
    prompt.push_str("\nAssistant:");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn turn(question: &str, answer: &str) -> ChatTurn {
        ChatTurn {
            question: question.to_string(),
            answer: answer.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_context_block_rendering() {
        let mut context = ChatContext::new();
        context.push("Period", "2024-12-31");
        context.push("ROA", "0.1000");

        let prompt = build_prompt("How profitable is it?", &context, &[], 6);
        assert!(prompt.contains("Period: 2024-12-31\nROA: 0.1000\n"));
        assert!(prompt.ends_with("User: How profitable is it?\nAssistant:"));
    }

    #[test]
    fn test_missing_context_is_stated() {
        let prompt = build_prompt("Hello", &ChatContext::new(), &[], 6);
        assert!(prompt.contains("No financial context provided."));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(2, 2)]
    #[case(6, 6)]
    #[case(9, 6)] // window caps at six turns
    fn test_history_window(#[case] turns: usize, #[case] expected: usize) {
        let history: Vec<ChatTurn> = (0..turns)
            .map(|i| turn(&format!("q{i}"), &format!("a{i}")))
            .collect();

        let prompt = build_prompt("next", &ChatContext::new(), &history, 6);
        let included = prompt.matches("Assistant: a").count();
        assert_eq!(included, expected);

        if turns > 6 {
            // The oldest turns fall outside the window.
            assert!(!prompt.contains("User: q0\n"));
            assert!(prompt.contains(&format!("User: q{}\n", turns - 1)));
        }
    }
}
