//! Typed view of a model-produced plan
//!
//! The service relays whatever JSON the model returns. [`Plan`] is an optional
//! lens for code that wants to do more than relay it; a value that does not fit
//! is still a valid result.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A goal broken into ordered phases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Echo of the submitted goal
    pub goal: String,
    /// Ordered phases
    pub phases: Vec<PlanPhase>,
}

/// A named group of tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanPhase {
    pub name: String,
    pub tasks: Vec<String>,
}

impl Plan {
    /// Interpret a parsed value as a plan, if it has the expected shape
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }

    /// Total tasks across all phases
    pub fn task_count(&self) -> usize {
        self.phases.iter().map(|p| p.tasks.len()).sum()
    }

    /// Plain-text checklist, one `[ ]` line per task
    pub fn render_checklist(&self) -> String {
        let mut out = format!("Goal: \"{}\"\n", self.goal);
        for phase in &self.phases {
            out.push('\n');
            out.push_str(&phase.name);
            out.push('\n');
            for task in &phase.tasks {
                out.push_str(&format!("  [ ] {}\n", task));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn birthday() -> Value {
        json!({
            "goal": "Plan a birthday party",
            "phases": [
                {"name": "Phase 1: Initial Planning", "tasks": ["Set budget", "Choose date and time", "Create guest list"]},
                {"name": "Phase 2: Execution", "tasks": ["Send out invitations", "Order cake", "Decorate venue"]}
            ]
        })
    }

    #[test]
    fn test_from_value() {
        let plan = Plan::from_value(&birthday()).unwrap();
        assert_eq!(plan.goal, "Plan a birthday party");
        assert_eq!(plan.phases.len(), 2);
        assert_eq!(plan.phases[1].tasks[1], "Order cake");
        assert_eq!(plan.task_count(), 6);
    }

    #[test]
    fn test_from_value_tolerates_extra_fields() {
        let value = json!({"goal": "g", "phases": [], "notes": "extra"});
        assert!(Plan::from_value(&value).is_some());
    }

    #[test]
    fn test_from_value_wrong_shape() {
        assert!(Plan::from_value(&json!({"goal": "g"})).is_none());
        assert!(Plan::from_value(&json!([1, 2, 3])).is_none());
        assert!(Plan::from_value(&json!({"goal": "g", "phases": [{"name": "p", "tasks": "oops"}]})).is_none());
    }

    #[test]
    fn test_render_checklist() {
        let plan = Plan::from_value(&birthday()).unwrap();
        let text = plan.render_checklist();

        assert!(text.starts_with("Goal: \"Plan a birthday party\"\n"));
        assert!(text.contains("\nPhase 1: Initial Planning\n  [ ] Set budget\n"));
        assert!(text.ends_with("  [ ] Decorate venue\n"));
    }
}
