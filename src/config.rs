//! Configuration management
//!
//! All configuration lives in one explicit [`Config`] object passed to
//! components at construction time. Nothing reads process-global state at
//! import time, so every component is independently testable against mock
//! servers.
//!
//! Configuration can be loaded from a TOML file or built from defaults with
//! secrets (`GITHUB_TOKEN`, `GEMINI_API_KEY`) overlaid from the environment.
//! Secrets never live in the config file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable holding the optional GitHub bearer token
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Environment variable holding the Gemini API key; absence disables enrichment
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// GitHub API settings
    #[serde(default)]
    pub github: GithubConfig,

    /// Summarization settings
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// GitHub API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Base URL for the GitHub REST API
    #[serde(default = "default_github_base_url")]
    pub base_url: String,

    /// Optional bearer token; absent means anonymous (rate-limited) access
    #[serde(default)]
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of repositories to list
    #[serde(default = "default_max_repos")]
    pub max_repos: u32,
}

/// Summarization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Base URL for the Gemini API
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// API key; absence fully disables enrichment
    #[serde(default)]
    pub api_key: Option<String>,

    /// Fallback chain of model identifiers, tried in order until one succeeds
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of leading repositories eligible for enrichment
    #[serde(default = "default_budget")]
    pub budget: usize,

    /// Word cap on generated summaries
    #[serde(default = "default_max_words")]
    pub max_words: usize,

    /// Character cap on README excerpts sent to the model
    #[serde(default = "default_readme_limit")]
    pub readme_limit: usize,

    /// Maximum simultaneous enrichment units
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Overall deadline in seconds for the enrichment fan-out join
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Default log level when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default value functions

fn default_github_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_models() -> Vec<String> {
    vec![
        "gemini-2.5-flash".to_string(),
        "gemini-2.5-pro".to_string(),
        "gemini-2.5-flash-lite".to_string(),
    ]
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_repos() -> u32 {
    6
}

fn default_budget() -> usize {
    6
}

fn default_max_words() -> usize {
    60
}

fn default_readme_limit() -> usize {
    2000
}

fn default_concurrency() -> usize {
    4
}

fn default_deadline_secs() -> u64 {
    45
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            base_url: default_github_base_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
            max_repos: default_max_repos(),
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            base_url: default_gemini_base_url(),
            api_key: None,
            models: default_models(),
            timeout_secs: default_timeout_secs(),
            budget: default_budget(),
            max_words: default_max_words(),
            readme_limit: default_readme_limit(),
            concurrency: default_concurrency(),
            deadline_secs: default_deadline_secs(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Build configuration from defaults with secrets taken from the
    /// environment (`GITHUB_TOKEN`, `GEMINI_API_KEY`).
    pub fn from_env() -> Self {
        Self::default().with_env_secrets()
    }

    /// Load configuration from a TOML file, then overlay environment
    /// secrets for any that the file leaves unset.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;

        let config = config.with_env_secrets();
        config.validate()?;

        Ok(config)
    }

    /// Fill `github.token` and `summary.api_key` from the environment when
    /// the configuration leaves them unset.
    pub fn with_env_secrets(self) -> Self {
        self.overlay_env(GITHUB_TOKEN_VAR, GEMINI_API_KEY_VAR)
    }

    fn overlay_env(mut self, github_var: &str, gemini_var: &str) -> Self {
        if self.github.token.is_none() {
            self.github.token = env_secret(github_var);
        }
        if self.summary.api_key.is_none() {
            self.summary.api_key = env_secret(gemini_var);
        }
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` on empty base URLs, an empty model chain, or
    /// zero timeouts/limits.
    pub fn validate(&self) -> Result<()> {
        if self.github.base_url.trim().is_empty() {
            return Err(Error::Config("github.base_url must not be empty".into()));
        }
        if self.summary.base_url.trim().is_empty() {
            return Err(Error::Config("summary.base_url must not be empty".into()));
        }
        if self.github.timeout_secs == 0 || self.summary.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than zero".into()));
        }
        if self.github.max_repos == 0 {
            return Err(Error::Config("github.max_repos must be greater than zero".into()));
        }
        if self.summary.models.is_empty() {
            return Err(Error::Config(
                "summary.models must list at least one model".into(),
            ));
        }
        if self.summary.max_words == 0 {
            return Err(Error::Config("summary.max_words must be greater than zero".into()));
        }
        if self.summary.concurrency == 0 {
            return Err(Error::Config(
                "summary.concurrency must be greater than zero".into(),
            ));
        }
        if self.summary.deadline_secs == 0 {
            return Err(Error::Config(
                "summary.deadline_secs must be greater than zero".into(),
            ));
        }
        if self.telemetry.log_level.trim().is_empty() {
            return Err(Error::Config(
                "telemetry.log_level must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Read a non-empty trimmed value from the environment.
fn env_secret(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
