//! Goal decomposition error types

use thiserror::Error;

use super::GoalError;
use crate::llm::LlmError;

/// Errors that can occur while breaking down a goal
#[derive(Debug, Error)]
pub enum DecomposeError {
    /// The submitted goal failed validation
    #[error(transparent)]
    Validation(#[from] GoalError),

    /// The model output held no parseable JSON
    #[error("Failed to parse Gemini's response as JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The provider call failed
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The prompt template could not be rendered
    #[error("Failed to build prompt: {0}")]
    Prompt(String),

    /// The output file could not be written
    #[error("Failed to write {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl DecomposeError {
    /// HTTP status this error is reported with
    pub fn status_code(&self) -> u16 {
        match self {
            DecomposeError::Validation(_) => 400,
            _ => 500,
        }
    }

    /// Message placed in the `error` field of the response body
    pub fn client_message(&self) -> String {
        match self {
            DecomposeError::Validation(e) => e.to_string(),
            DecomposeError::Parse(_) => self.to_string(),
            other => format!("An error occurred: {}", other),
        }
    }

    /// Whether the caller, not the server, is at fault
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    /// Whether the provider rejected the configured API key
    pub fn is_auth_error(&self) -> bool {
        matches!(self, DecomposeError::Llm(e) if e.is_auth_error())
    }
}
