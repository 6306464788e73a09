//! Infrastructure layer for TableTalk.
//!
//! Contains implementations of the ports defined in `tabletalk-core`:
//! the read-only SQLite handle and its TTL cache, the SQL toolkit the
//! agent queries through, the Groq provider, environment credential
//! lookup, and config file loading.

pub mod config;
pub mod llm;
pub mod secret;
pub mod sqlite;
