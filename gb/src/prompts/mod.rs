//! Prompt and page templates
//!
//! Templates are Handlebars strings. Each can be overridden by a
//! `{name}.pmt` file in the configured prompts directory.

mod embedded;
mod loader;

pub use embedded::INDEX_SCRIPT;
pub use loader::PromptLoader;
