//! LLM request/response types for goalbreak
//!
//! Single-turn text completion: one prompt in, one block of text out.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A completion request - everything needed for one LLM call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Fully rendered prompt (from a Handlebars template)
    pub prompt: String,

    /// Max output tokens; provider default when unset
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// Create a request for a single prompt
    pub fn new(prompt: impl Into<String>) -> Self {
        debug!("CompletionRequest::new: called");
        Self {
            prompt: prompt.into(),
            max_tokens: None,
        }
    }

    /// Set the output token cap
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Response from a completion request
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Concatenated text of the first candidate
    pub text: String,

    /// Why the provider stopped generating
    pub stop_reason: StopReason,

    /// Token usage, when the provider reports it
    pub usage: TokenUsage,
}

/// Why generation stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    Safety,
    Other(String),
}

impl StopReason {
    /// Map a Gemini `finishReason` value
    pub fn from_gemini(s: &str) -> Self {
        debug!(%s, "StopReason::from_gemini: called");
        match s {
            "STOP" => Self::EndTurn,
            "MAX_TOKENS" => Self::MaxTokens,
            "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" => Self::Safety,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_reason_from_gemini() {
        assert_eq!(StopReason::from_gemini("STOP"), StopReason::EndTurn);
        assert_eq!(StopReason::from_gemini("MAX_TOKENS"), StopReason::MaxTokens);
        assert_eq!(StopReason::from_gemini("SAFETY"), StopReason::Safety);
        assert_eq!(
            StopReason::from_gemini("FINISH_REASON_UNSPECIFIED"),
            StopReason::Other("FINISH_REASON_UNSPECIFIED".to_string())
        );
    }

    #[test]
    fn test_completion_request_builder() {
        let req = CompletionRequest::new("hello").with_max_tokens(Some(256));
        assert_eq!(req.prompt, "hello");
        assert_eq!(req.max_tokens, Some(256));
    }

    #[test]
    fn test_token_usage_total() {
        let usage = TokenUsage {
            input_tokens: 120,
            output_tokens: 80,
        };
        assert_eq!(usage.total(), 200);
    }
}
