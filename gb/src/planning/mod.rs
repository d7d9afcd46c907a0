//! Planning module - goal validation and decomposition
//!
//! # Architecture
//!
//! ```text
//! raw goal → Goal::parse → PromptLoader → LlmClient → extract_json_payload
//!                                                          ↓
//!                                   caller ← PlanStore ← serde_json
//! ```
//!
//! The result is a loose `serde_json::Value`. [`Plan`] offers a typed view
//! for callers that need one.

mod decomposer;
mod error;
mod extract;
mod goal;
mod plan;

pub use decomposer::{DecomposerConfig, GoalDecomposer};
pub use error::DecomposeError;
pub use extract::extract_json_payload;
pub use goal::{Goal, GoalError, MAX_GOAL_LENGTH};
pub use plan::{Plan, PlanPhase};
