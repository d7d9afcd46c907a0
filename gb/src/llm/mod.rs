//! LLM Client module for goalbreak
//!
//! Provides the provider-agnostic client trait and the Gemini implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

mod error;
mod gemini;
mod types;

pub use error::LlmError;
pub use gemini::GeminiClient;
pub use types::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};

use crate::config::LlmConfig;

/// A text-generation backend
///
/// Implementations make exactly one request per call.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Request a single completion for the prompt
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Model identifier, for logging
    fn model(&self) -> &str;
}

/// Create an LLM client based on the provider specified in config
///
/// Supports the "gemini" provider.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "gemini" => {
            debug!("create_client: creating Gemini client");
            Ok(Arc::new(GeminiClient::from_config(config)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::InvalidResponse(format!(
                "Unknown LLM provider: '{}'. Supported: gemini",
                other
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_unknown_provider() {
        let config = LlmConfig {
            provider: "carrier-pigeon".to_string(),
            ..Default::default()
        };
        let err = create_client(&config).err().unwrap();
        assert!(err.to_string().contains("carrier-pigeon"));
    }

    #[test]
    fn test_create_client_missing_key() {
        let config = LlmConfig {
            api_key_env: "GOALBREAK_TEST_NO_SUCH_KEY".to_string(),
            ..Default::default()
        };
        let err = create_client(&config).err().unwrap();
        assert!(matches!(err, LlmError::MissingApiKey(_)));
    }
}
