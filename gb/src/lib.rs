//! goalbreak - break a free-text goal into phased task checklists
//!
//! A goal submitted through a web form (or the `gb breakdown` command) is
//! validated, embedded in a fixed prompt and sent to Gemini. The JSON in the
//! model's reply is parsed, written to a single output file and returned.
//!
//! # Modules
//!
//! - [`planning`] - goal validation, JSON extraction and the [`GoalDecomposer`]
//! - [`llm`] - LLM client trait and Gemini implementation
//! - [`prompts`] - prompt and page templates
//! - [`store`] - the output file holding the latest plan
//! - [`server`] - HTTP routes
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod llm;
pub mod planning;
pub mod prompts;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use config::{Config, LlmConfig};
pub use llm::{CompletionRequest, CompletionResponse, GeminiClient, LlmClient, LlmError, create_client};
pub use planning::{
    DecomposeError, DecomposerConfig, Goal, GoalDecomposer, GoalError, MAX_GOAL_LENGTH, Plan, PlanPhase,
    extract_json_payload,
};
pub use prompts::PromptLoader;
pub use server::{AppState, router, run_server, serve_on_listener};
pub use store::PlanStore;
