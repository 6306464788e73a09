//! Business logic and trait seams for TableTalk.
//!
//! This crate defines the "ports" (the LLM provider and SQL toolkit
//! traits) that the infrastructure layer implements, plus everything
//! that runs on top of them: the ReAct SQL agent, the per-session
//! store, the response renderer, and the chat controller. It depends
//! only on `tabletalk-types` -- never on `tabletalk-infra` or any
//! database/HTTP crate.

pub mod agent;
pub mod chat;
pub mod llm;
pub mod render;
