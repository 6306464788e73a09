//! Shared domain types for TableTalk.
//!
//! This crate contains the core domain types used across the TableTalk
//! workspace: chat turns, agent responses, rendered views, LLM request
//! shapes, configuration, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
