//! Session state for the conversational assistant.

use crate::client::GeminiClient;
use crate::prompt::{ChatContext, DEFAULT_MAX_HISTORY_TURNS, build_prompt};
use chrono::{DateTime, Utc};
use tracing::warn;

/// One user/assistant exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    /// The user's question.
    pub question: String,
    /// The assistant's answer, or the error text shown in its place.
    pub answer: String,
    /// When the exchange completed.
    pub timestamp: DateTime<Utc>,
}

/// A process-local conversation bound to one analysis session.
///
/// History grows without eviction for the lifetime of the session; only the
/// window included in each prompt is bounded. Nothing is persisted.
#[derive(Debug)]
pub struct ChatSession {
    client: GeminiClient,
    history: Vec<ChatTurn>,
    max_history_turns: usize,
}

impl ChatSession {
    /// Create a session with the default prompt window.
    pub fn new(client: GeminiClient) -> Self {
        Self::with_max_history_turns(client, DEFAULT_MAX_HISTORY_TURNS)
    }

    /// Create a session with a custom prompt window.
    pub fn with_max_history_turns(client: GeminiClient, max_history_turns: usize) -> Self {
        Self {
            client,
            history: Vec::new(),
            max_history_turns,
        }
    }

    /// All exchanges so far, oldest first.
    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Drop the conversation history.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Ask a question with the given financial context.
    ///
    /// This boundary never fails: transport and provider errors come back
    /// as an explicit error string suitable for inline display, and the
    /// exchange is recorded either way so the conversation stays coherent.
    pub async fn ask(&mut self, question: &str, context: &ChatContext) -> String {
        let prompt = build_prompt(question, context, &self.history, self.max_history_turns);

        let answer = match self.client.complete(&prompt).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "assistant call failed");
                format!("Error while contacting the assistant: {err}")
            }
        };

        self.history.push(ChatTurn {
            question: question.to_string(),
            answer: answer.clone(),
            timestamp: Utc::now(),
        });

        answer
    }
}
