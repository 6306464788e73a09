//! Global configuration types for TableTalk.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls
//! the database path, model selection, and agent limits.

use serde::{Deserialize, Serialize};

/// Top-level configuration for TableTalk.
///
/// Loaded from `~/.tabletalk/config.toml` (or a `--config` override).
/// All fields have sensible defaults; CLI flags override file values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Path to the SQLite database file, resolved against the working
    /// directory of the invocation.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Model identifier sent to the provider.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the OpenAI-compatible endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Maximum reasoning steps per agent invocation.
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,

    /// Maximum output tokens per model call.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature for model calls.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Seconds a cached database handle stays valid before it is
    /// reopened, tolerating file replacement without a restart.
    #[serde(default = "default_handle_ttl_secs")]
    pub handle_ttl_secs: u64,
}

fn default_database_path() -> String {
    "analytics.db".to_string()
}

fn default_model() -> String {
    "llama3-8b-8192".to_string()
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_max_steps() -> u32 {
    15
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f64 {
    0.0
}

fn default_handle_ttl_secs() -> u64 {
    // Matches the two-hour resource cache the app has always used.
    2 * 60 * 60
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            model: default_model(),
            base_url: default_base_url(),
            max_steps: default_max_steps(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            handle_ttl_secs: default_handle_ttl_secs(),
        }
    }
}
