//! Google Gemini API client implementation
//!
//! Implements the LlmClient trait for the `generateContent` endpoint. One
//! request per call: no retries, no streaming.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::{CompletionRequest, CompletionResponse, LlmClient, LlmError, StopReason, TokenUsage};
use crate::config::LlmConfig;

/// Google Gemini API client
pub struct GeminiClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: Option<u32>,
}

impl GeminiClient {
    /// Create a new client from configuration
    ///
    /// Reads the API key from the environment variable named in config.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(model = %config.model, base_url = %config.base_url, "from_config: called");
        let api_key = config
            .get_api_key()
            .map_err(|e| LlmError::MissingApiKey(e.to_string()))?;

        let mut builder = Client::builder();
        if let Some(ms) = config.timeout_ms {
            debug!(timeout_ms = ms, "from_config: applying request timeout");
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let http = builder.build().map_err(LlmError::Network)?;

        Ok(Self::new(&config.model, api_key, &config.base_url, http, config.max_tokens))
    }

    /// Create a client from explicit parts
    pub fn new(
        model: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        http: Client,
        max_tokens: Option<u32>,
    ) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            max_tokens,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Build the request body for the Gemini API
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        debug!(%self.model, prompt_len = request.prompt.len(), "build_request_body: called");
        let mut body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }],
            }],
        });

        let max_tokens = match (request.max_tokens, self.max_tokens) {
            (Some(req), Some(cap)) => Some(req.min(cap)),
            (req, cap) => req.or(cap),
        };
        if let Some(max) = max_tokens {
            debug!(max, "build_request_body: setting maxOutputTokens");
            body["generationConfig"] = serde_json::json!({ "maxOutputTokens": max });
        }

        body
    }

    /// Parse the Gemini API response
    ///
    /// The text of every part of the first candidate is concatenated.
    fn parse_response(&self, api_response: GeminiResponse) -> Result<CompletionResponse, LlmError> {
        debug!(candidates = api_response.candidates.len(), "parse_response: called");
        let usage = api_response
            .usage_metadata
            .map(|u| TokenUsage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        let Some(candidate) = api_response.candidates.into_iter().next() else {
            let reason = api_response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates returned".to_string());
            debug!(%reason, "parse_response: no candidates");
            return Err(LlmError::InvalidResponse(format!("Response contained no candidates: {}", reason)));
        };

        let stop_reason = candidate
            .finish_reason
            .as_deref()
            .map(StopReason::from_gemini)
            .unwrap_or(StopReason::EndTurn);

        let texts: Vec<String> = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        // An empty string is still a reply; only a candidate with no text parts is malformed
        if texts.is_empty() {
            debug!(?stop_reason, "parse_response: candidate has no text parts");
            return Err(LlmError::InvalidResponse(format!(
                "Response candidate has no text parts (finish reason: {:?})",
                stop_reason
            )));
        }

        Ok(CompletionResponse {
            text: texts.concat(),
            stop_reason,
            usage,
        })
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(%self.model, "complete: called");
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "complete: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        let api_response: GeminiResponse = response.json().await?;
        let completion = self.parse_response(api_response)?;
        info!(
            model = %self.model,
            input_tokens = completion.usage.input_tokens,
            output_tokens = completion.usage.output_tokens,
            total_tokens = completion.usage.total(),
            "Gemini completion received"
        );
        Ok(completion)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Pull `error.message` out of a Gemini error body, or return the body as-is
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<GeminiErrorBody>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

// Gemini API response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}
