//! Prompt Loader
//!
//! Loads templates from an override directory or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;
use crate::planning::Goal;

/// Context for rendering the goal breakdown prompt
#[derive(Debug, Clone, Serialize)]
struct PromptContext<'a> {
    /// The validated, trimmed goal
    goal: &'a str,
}

/// Context for rendering the landing page
#[derive(Debug, Clone, Serialize)]
struct PageContext {
    /// Client-side limit mirrored from the server-side check
    max_goal_length: usize,
}

/// Loads and renders templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// Override directory (e.g., `.goalbreak/prompts/`)
    dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a new loader that checks `dir` for `{name}.pmt` overrides
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        debug!(dir = %dir.display(), "PromptLoader::new: called");

        Self {
            hbs: Handlebars::new(),
            dir: if dir.exists() { Some(dir.to_path_buf()) } else { None },
        }
    }

    /// Create a loader that only uses embedded templates
    pub fn embedded_only() -> Self {
        Self {
            hbs: Handlebars::new(),
            dir: None,
        }
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. Override: `{dir}/{name}.pmt`
    /// 2. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String> {
        if let Some(ref dir) = self.dir {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!("Loading template from override: {:?}", path);
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read template {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!("Using embedded template: {}", name);
            return Ok(content.to_string());
        }

        Err(eyre!("Template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        let template = self.load_template(template_name)?;
        debug!(template_name, "render: rendering template");

        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }

    /// Render the breakdown prompt for a goal
    pub fn goal_prompt(&self, goal: &Goal) -> Result<String> {
        self.render("goal-breakdown", &PromptContext { goal: goal.as_str() })
    }

    /// Render the landing page
    pub fn index_page(&self, max_goal_length: usize) -> Result<String> {
        self.render("index", &PageContext { max_goal_length })
    }
}
