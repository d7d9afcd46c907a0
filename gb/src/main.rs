//! goalbreak - goal breakdown service
//!
//! CLI entry point: runs the web server or breaks down a single goal.

use std::fs;

use clap::{CommandFactory, FromArgMatches};
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};

use goalbreak::cli::{Cli, Command, OutputFormat, get_log_path};
use goalbreak::config::Config;
use goalbreak::llm::create_client;
use goalbreak::planning::{GoalDecomposer, Plan};
use goalbreak::server::{AppState, run_server};
use goalbreak::store::to_pretty_json;

fn parse_level(s: &str) -> Option<tracing::Level> {
    match s.to_uppercase().as_str() {
        "TRACE" => Some(tracing::Level::TRACE),
        "DEBUG" => Some(tracing::Level::DEBUG),
        "INFO" => Some(tracing::Level::INFO),
        "WARN" | "WARNING" => Some(tracing::Level::WARN),
        "ERROR" => Some(tracing::Level::ERROR),
        _ => None,
    }
}

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => parse_level(s).unwrap_or_else(|| {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
            tracing::Level::INFO
        }),
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cli::command();
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(provider = %config.llm.provider, model = %config.llm.model, "goalbreak loaded config");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        None => cmd_serve(config, None, None).await,
        Some(Command::Serve { host, port }) => cmd_serve(config, host, port).await,
        Some(Command::Breakdown { goal, format }) => cmd_breakdown(&config, &goal, format).await,
    }
}

/// Build the decomposer shared by every request
fn build_decomposer(config: &Config) -> Result<GoalDecomposer> {
    config.validate()?;
    let llm = create_client(&config.llm).context("Failed to create LLM client")?;
    Ok(GoalDecomposer::from_config(config, llm))
}

async fn cmd_serve(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let decomposer = build_decomposer(&config)?;
    let state = AppState::new(std::sync::Arc::new(decomposer));
    run_server(&config.server.addr(), state).await
}

async fn cmd_breakdown(config: &Config, goal: &str, format: OutputFormat) -> Result<()> {
    let decomposer = build_decomposer(config)?;

    let value = match decomposer.submit_goal(goal).await {
        Ok(value) => value,
        Err(e) => {
            if e.is_auth_error() {
                eprintln!(
                    "{} check that {} holds a valid Gemini API key",
                    "Hint:".yellow(),
                    config.llm.api_key_env
                );
            }
            return Err(eyre::eyre!(e.client_message()));
        }
    };

    match format {
        OutputFormat::Json => {
            let bytes = to_pretty_json(&value).context("Failed to format plan")?;
            println!("{}", String::from_utf8_lossy(&bytes));
        }
        OutputFormat::Text => match Plan::from_value(&value) {
            Some(plan) => print!("{}", plan.render_checklist()),
            None => {
                eprintln!("{}", "Model output is not a goal/phases plan; showing raw JSON".yellow());
                let bytes = to_pretty_json(&value).context("Failed to format plan")?;
                println!("{}", String::from_utf8_lossy(&bytes));
            }
        },
    }

    eprintln!("{} {}", "Saved to".green(), decomposer.store().path().display());
    Ok(())
}
