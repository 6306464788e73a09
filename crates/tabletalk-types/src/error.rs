//! Error taxonomy for TableTalk.
//!
//! Three boundaries, three enums:
//! - [`ConfigError`] -- startup-time configuration problems (missing
//!   credential). Blocks agent use but not app load.
//! - [`ConnectionError`] -- the database cannot be opened or used
//!   read-only. Fatal to that session's querying capability.
//! - [`AgentError`] -- any per-interaction failure during reasoning or
//!   tool execution. Caught at the controller boundary and converted to
//!   an inline notice; the session continues.

use thiserror::Error;

use crate::llm::LlmError;

/// Startup-time configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} not found in environment")]
    MissingApiKey { key: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors opening or using the read-only database handle.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("database file not found: {path}")]
    NotFound { path: String },

    #[error("not a valid SQLite database: {path}")]
    InvalidDatabase { path: String },

    #[error("database is read-only: {0}")]
    ReadOnlyViolation(String),

    #[error("connection error: {0}")]
    Open(String),
}

/// Errors from an agent invocation.
///
/// Every variant is caught per-interaction; none of them terminates the
/// session.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("model backend error: {0}")]
    Llm(#[from] LlmError),

    #[error("malformed agent step: {0}")]
    MalformedStep(String),

    #[error("query execution failed: {0}")]
    Tool(#[from] ConnectionError),

    #[error("agent stopped after {0} steps without a final answer")]
    StepLimit(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingApiKey {
            key: "GROQ_API_KEY".to_string(),
        };
        assert_eq!(err.to_string(), "GROQ_API_KEY not found in environment");
    }

    #[test]
    fn test_connection_error_display() {
        let err = ConnectionError::NotFound {
            path: "analytics.db".to_string(),
        };
        assert_eq!(err.to_string(), "database file not found: analytics.db");
    }

    #[test]
    fn test_agent_error_wraps_llm_error() {
        let err: AgentError = LlmError::Provider {
            message: "backend timeout".to_string(),
        }
        .into();
        assert!(err.to_string().contains("backend timeout"));
    }

    #[test]
    fn test_agent_error_step_limit_display() {
        let err = AgentError::StepLimit(15);
        assert!(err.to_string().contains("15 steps"));
    }
}
