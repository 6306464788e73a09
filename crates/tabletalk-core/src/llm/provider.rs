//! LlmProvider trait definition.
//!
//! The core abstraction every model backend implements. Uses native
//! async fn in traits (RPITIT); `BoxLlmProvider` provides the
//! object-safe wrapper for runtime dispatch.
//!
//! The agent loop parses complete responses step by step, so the
//! contract is intentionally non-streaming.

use tabletalk_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends (Groq, OpenAI, ...).
///
/// Implementations live in tabletalk-infra (e.g., `GroqProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "groq").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
