//! GoalDecomposer - LLM-driven breakdown of a goal into phases
//!
//! Validates the goal, asks the model for a phased plan, pulls the JSON out of
//! the reply, writes it to the plan store and hands it back.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::{DecomposeError, Goal, MAX_GOAL_LENGTH, Plan, extract_json_payload};
use crate::config::Config;
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompts::PromptLoader;
use crate::store::PlanStore;

/// Configuration for decomposition
#[derive(Debug, Clone)]
pub struct DecomposerConfig {
    /// Maximum goal length in characters, inclusive
    pub max_goal_length: usize,
    /// Output token cap passed to the provider
    pub max_tokens: Option<u32>,
}

impl Default for DecomposerConfig {
    fn default() -> Self {
        Self {
            max_goal_length: MAX_GOAL_LENGTH,
            max_tokens: None,
        }
    }
}

/// GoalDecomposer turns goals into structured plans
pub struct GoalDecomposer {
    llm: Arc<dyn LlmClient>,
    prompts: PromptLoader,
    store: PlanStore,
    config: DecomposerConfig,
}

impl GoalDecomposer {
    /// Create a new decomposer
    pub fn new(llm: Arc<dyn LlmClient>, prompts: PromptLoader, store: PlanStore, config: DecomposerConfig) -> Self {
        Self {
            llm,
            prompts,
            store,
            config,
        }
    }

    /// Break a raw goal down into a plan
    ///
    /// The parsed JSON is returned exactly as the model produced it, whatever
    /// its shape. The model is called once, and only after validation passes;
    /// the store is written only after parsing succeeds.
    pub async fn submit_goal(&self, raw: &str) -> Result<Value, DecomposeError> {
        debug!(raw_len = raw.len(), "submit_goal: called");
        let goal = Goal::parse(raw, self.config.max_goal_length)?;
        info!(model = %self.llm.model(), goal = %goal, "Breaking down goal");

        let prompt = self
            .prompts
            .goal_prompt(&goal)
            .map_err(|e| DecomposeError::Prompt(e.to_string()))?;

        let request = CompletionRequest::new(prompt).with_max_tokens(self.config.max_tokens);
        let response = self.llm.complete(request).await?;
        debug!(text_len = response.text.len(), stop_reason = ?response.stop_reason, "submit_goal: got response");

        let payload = extract_json_payload(&response.text);
        let value: Value = serde_json::from_str(payload).map_err(|e| {
            warn!(error = %e, "Model response is not valid JSON");
            DecomposeError::Parse(e)
        })?;

        match Plan::from_value(&value) {
            Some(plan) => info!(
                phases = plan.phases.len(),
                tasks = plan.task_count(),
                "Goal broken down into {} phases",
                plan.phases.len()
            ),
            None => warn!("Model output does not have the goal/phases shape; returning it as-is"),
        }

        self.store.write_async(&value).await.map_err(|source| DecomposeError::Persist {
            path: self.store.path().display().to_string(),
            source,
        })?;
        debug!(path = %self.store.path().display(), "submit_goal: plan written");

        Ok(value)
    }

    /// Wire a decomposer from loaded configuration
    pub fn from_config(config: &Config, llm: Arc<dyn LlmClient>) -> Self {
        debug!(output = %config.output.path.display(), prompts = %config.prompts.dir.display(), "from_config: called");
        Self::new(
            llm,
            PromptLoader::new(&config.prompts.dir),
            PlanStore::new(&config.output.path),
            DecomposerConfig {
                max_goal_length: config.goal.max_length,
                max_tokens: config.llm.max_tokens,
            },
        )
    }

    pub fn prompts(&self) -> &PromptLoader {
        &self.prompts
    }

    pub fn store(&self) -> &PlanStore {
        &self.store
    }

    pub fn config(&self) -> &DecomposerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{CompletionResponse, LlmError, StopReason, TokenUsage};
    use crate::planning::GoalError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Returns a canned reply and records every prompt it receives
    struct ScriptedLlm {
        reply: Result<String, u16>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedLlm {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(status),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            self.prompts.lock().unwrap().push(request.prompt);
            match &self.reply {
                Ok(text) => Ok(CompletionResponse {
                    text: text.clone(),
                    stop_reason: StopReason::EndTurn,
                    usage: TokenUsage::default(),
                }),
                Err(status) => Err(LlmError::ApiError {
                    status: *status,
                    message: "scripted failure".to_string(),
                }),
            }
        }

        fn model(&self) -> &str {
            "scripted"
        }
    }

    fn decomposer(llm: Arc<ScriptedLlm>, dir: &TempDir) -> GoalDecomposer {
        GoalDecomposer::new(
            llm,
            PromptLoader::embedded_only(),
            PlanStore::new(dir.path().join("output.json")),
            DecomposerConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_fenced_reply() {
        let dir = TempDir::new().unwrap();
        let llm = ScriptedLlm::replying("Here is the plan:\n```json\n{\"goal\":\"x\",\"phases\":[]}\n```");
        let d = decomposer(llm.clone(), &dir);

        let value = d.submit_goal("  x  ").await.unwrap();
        assert_eq!(value, json!({"goal": "x", "phases": []}));
        assert_eq!(llm.calls(), 1);
        assert!(llm.prompts.lock().unwrap()[0].contains(r#"The user's goal is: "x""#));
        assert_eq!(d.store().read().unwrap(), value);
    }

    #[tokio::test]
    async fn test_unfenced_reply() {
        let dir = TempDir::new().unwrap();
        let d = decomposer(ScriptedLlm::replying(r#"{"goal":"x","phases":[]}"#), &dir);

        let value = d.submit_goal("x").await.unwrap();
        assert_eq!(value, json!({"goal": "x", "phases": []}));
    }

    #[tokio::test]
    async fn test_any_json_shape_is_relayed() {
        let dir = TempDir::new().unwrap();
        let d = decomposer(ScriptedLlm::replying("[1, \"two\", null]"), &dir);

        let value = d.submit_goal("x").await.unwrap();
        assert_eq!(value, json!([1, "two", null]));
    }

    #[tokio::test]
    async fn test_empty_goal_never_calls_model() {
        let dir = TempDir::new().unwrap();
        let llm = ScriptedLlm::replying("{}");
        let d = decomposer(llm.clone(), &dir);

        let err = d.submit_goal(" \n\t ").await.unwrap_err();
        assert!(matches!(err, DecomposeError::Validation(GoalError::Empty)));
        assert_eq!(llm.calls(), 0);
        assert!(!d.store().path().exists());
    }

    #[tokio::test]
    async fn test_long_goal_never_calls_model() {
        let dir = TempDir::new().unwrap();
        let llm = ScriptedLlm::replying("{}");
        let d = decomposer(llm.clone(), &dir);

        let err = d.submit_goal(&"z".repeat(1001)).await.unwrap_err();
        assert!(matches!(err, DecomposeError::Validation(GoalError::TooLong { .. })));
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_prose_reply_is_parse_error_and_keeps_prior_file() {
        let dir = TempDir::new().unwrap();
        let d = decomposer(ScriptedLlm::replying("Sure! Step one: buy balloons."), &dir);
        d.store().write(&json!({"goal": "previous"})).unwrap();

        let err = d.submit_goal("Plan a party").await.unwrap_err();
        assert!(matches!(err, DecomposeError::Parse(_)));
        assert_eq!(d.store().read().unwrap(), json!({"goal": "previous"}));
    }

    #[tokio::test]
    async fn test_provider_failure_is_generic_error() {
        let dir = TempDir::new().unwrap();
        let llm = ScriptedLlm::failing(502);
        let d = decomposer(llm.clone(), &dir);

        let err = d.submit_goal("Plan a party").await.unwrap_err();
        assert!(matches!(err, DecomposeError::Llm(_)));
        assert_eq!(err.status_code(), 500);
        assert_eq!(llm.calls(), 1);
        assert!(!d.store().path().exists());
    }

    #[tokio::test]
    async fn test_unwritable_store_is_generic_error() {
        let dir = TempDir::new().unwrap();
        let d = GoalDecomposer::new(
            ScriptedLlm::replying("{}"),
            PromptLoader::embedded_only(),
            PlanStore::new(dir.path().join("missing").join("output.json")),
            DecomposerConfig::default(),
        );

        let err = d.submit_goal("x").await.unwrap_err();
        assert!(matches!(err, DecomposeError::Persist { .. }));
        assert!(err.client_message().starts_with("An error occurred: "));
    }

    #[tokio::test]
    async fn test_custom_max_goal_length() {
        let dir = TempDir::new().unwrap();
        let d = GoalDecomposer::new(
            ScriptedLlm::replying("{}"),
            PromptLoader::embedded_only(),
            PlanStore::new(dir.path().join("output.json")),
            DecomposerConfig {
                max_goal_length: 5,
                max_tokens: None,
            },
        );

        assert!(d.submit_goal("12345").await.is_ok());
        assert!(d.submit_goal("123456").await.is_err());
    }
}
