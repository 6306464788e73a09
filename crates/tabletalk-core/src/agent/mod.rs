//! The conversational SQL agent.
//!
//! [`Agent`] is the seam the chat controller talks through: a question
//! plus the session history in, a classified [`AgentResponse`] or an
//! [`AgentError`] out. The shipped implementation is [`SqlAgentEngine`],
//! a zero-shot ReAct loop over an LLM provider and a [`SqlToolkit`].
//! The agent never mutates the database; the read-only handle enforces
//! that, not trusted model behavior.

pub mod classify;
pub mod engine;
pub mod parser;
pub mod prompt;
pub mod toolkit;

use tabletalk_types::chat::{AgentResponse, ChatTurn};
use tabletalk_types::error::AgentError;

pub use engine::{AgentSettings, SqlAgentEngine};
pub use toolkit::{QueryResult, SqlToolkit, ToolError};

/// A black box that answers natural-language questions with schema-aware
/// tool access, returning either prose or a tabular result.
pub trait Agent: Send + Sync {
    fn ask(
        &self,
        question: &str,
        history: &[ChatTurn],
    ) -> impl std::future::Future<Output = Result<AgentResponse, AgentError>> + Send;
}
