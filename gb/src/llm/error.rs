//! LLM error types

use thiserror::Error;

/// Errors that can occur during LLM operations
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing API key: {0}")]
    MissingApiKey(String),
}

impl LlmError {
    /// HTTP status reported by the provider, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::ApiError { status, .. } => Some(*status),
            LlmError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the provider rejected the credential
    pub fn is_auth_error(&self) -> bool {
        matches!(self, LlmError::MissingApiKey(_)) || matches!(self.status(), Some(401 | 403))
    }
}
