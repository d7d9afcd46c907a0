//! goalbreak configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main goalbreak configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider configuration
    pub llm: LlmConfig,

    /// HTTP listener configuration
    pub server: ServerConfig,

    /// Goal input limits
    pub goal: GoalConfig,

    /// Where the latest plan is written
    pub output: OutputConfig,

    /// Prompt template overrides
    pub prompts: PromptsConfig,

    /// Log level (trace, debug, info, warn, error)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that the provider credential is present so startup fails fast
    /// instead of on the first request.
    pub fn validate(&self) -> Result<()> {
        if std::env::var(&self.llm.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.llm.api_key_env
            ));
        }
        if self.goal.max_length == 0 {
            return Err(eyre::eyre!("goal.max-length must be greater than zero"));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .goalbreak.yml
        let local_config = PathBuf::from(".goalbreak.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/goalbreak/goalbreak.yml
        if let Some(user_config) = Self::user_config_path()
            && user_config.exists()
        {
            match Self::load_from_file(&user_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is initialized
    ///
    /// Errors are swallowed here; [`Config::load`] reports them once logging is up.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates = match config_path {
            Some(path) => vec![path.clone()],
            None => {
                let mut paths = vec![PathBuf::from(".goalbreak.yml")];
                paths.extend(Self::user_config_path());
                paths
            }
        };

        candidates
            .into_iter()
            .filter(|p| p.exists())
            .find_map(|p| Self::load_from_file(&p).ok())
            .and_then(|config| config.log_level)
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("goalbreak").join("goalbreak.yml"))
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (currently only "gemini" supported)
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum output tokens; provider default when unset
    #[serde(rename = "max-tokens")]
    pub max_tokens: Option<u32>,

    /// Request timeout in milliseconds; no client-side timeout when unset
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: Option<u64>,
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        let key = std::env::var(&self.api_key_env)
            .map_err(|_| eyre::eyre!("Environment variable {} is not set", self.api_key_env))?;
        if key.trim().is_empty() {
            return Err(eyre::eyre!("Environment variable {} is empty", self.api_key_env));
        }
        Ok(key)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-2.5-pro".to_string(),
            api_key_env: "GOOGLE_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            max_tokens: None,
            timeout_ms: None,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port to bind
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string for binding
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Goal input limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalConfig {
    /// Maximum goal length in characters, after trimming
    #[serde(rename = "max-length")]
    pub max_length: usize,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            max_length: crate::planning::MAX_GOAL_LENGTH,
        }
    }
}

/// Output file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON file overwritten by every successful breakdown
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("output.json"),
        }
    }
}

/// Prompt template configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    /// Directory searched for `<name>.pmt` overrides before the embedded templates
    pub dir: PathBuf,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".goalbreak/prompts"),
        }
    }
}
