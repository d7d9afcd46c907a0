//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// goalbreak - break a goal into phased checklists
#[derive(Parser)]
#[command(
    name = "gb",
    about = "Break a free-text goal into phases of tasks using Gemini",
    version = env!("GIT_DESCRIBE"),
    after_help = "Logs are written to: ~/.local/share/goalbreak/logs/goalbreak.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, help = "Log level (overrides config)")]
    pub log_level: Option<String>,

    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the web server
    Serve {
        /// Interface to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Break down a single goal and print the plan
    Breakdown {
        /// The goal to break down
        goal: String,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },
}

/// Output format for the breakdown command
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "plain" => Ok(Self::Text),
            _ => Err(format!("Unknown format: {}. Use: json or text", s)),
        }
    }
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("goalbreak")
        .join("logs")
        .join("goalbreak.log")
}
