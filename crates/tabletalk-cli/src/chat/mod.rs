//! Interactive chat surface for TableTalk.
//!
//! Implements the terminal conversation: welcome banner, async readline
//! input, slash commands, a thinking spinner while the agent works, and
//! rendering of text, table, and notice views. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
