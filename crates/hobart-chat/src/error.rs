//! Error types for the chat assistant boundary.

use thiserror::Error;

/// Result type for chat operations.
pub type Result<T> = std::result::Result<T, ChatError>;

/// Errors that can occur while talking to the assistant.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Assistant API key not configured
    #[error("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Provider-reported error
    #[error("Assistant API error: {0}")]
    Api(String),

    /// Response carried no usable text
    #[error("No response received from the assistant")]
    EmptyResponse,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
