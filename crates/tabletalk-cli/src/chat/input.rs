//! Async readline input for the chat loop.
//!
//! Owns the styled `You >` prompt and skips blank submissions, so the
//! loop only ever sees a question, a slash command, or an exit signal.

use console::style;
use rustyline_async::{Readline, ReadlineError, SharedWriter};

/// Events produced by the input handler.
#[derive(Debug)]
pub enum InputEvent {
    /// User submitted a non-empty line.
    Message(String),
    /// End of file (Ctrl+D).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Async input handler wrapping rustyline_async.
pub struct ChatInput {
    rl: Readline,
    // Held so the readline prompt stays coordinated with output.
    _writer: SharedWriter,
}

impl ChatInput {
    /// Create the input handler with the standard chat prompt.
    pub fn new() -> Result<Self, ReadlineError> {
        let prompt = format!("  {} ", style("You >").green().bold());
        let (rl, writer) = Readline::new(prompt)?;
        Ok(Self {
            rl,
            _writer: writer,
        })
    }

    /// Read the next non-empty line of input.
    ///
    /// Blank lines are consumed silently; Ctrl+D yields `Eof` and
    /// Ctrl+C yields `Interrupted`.
    pub async fn read_line(&mut self) -> InputEvent {
        loop {
            match self.rl.readline().await {
                Ok(rustyline_async::ReadlineEvent::Line(line)) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    return InputEvent::Message(trimmed.to_string());
                }
                Ok(rustyline_async::ReadlineEvent::Eof) => return InputEvent::Eof,
                Ok(rustyline_async::ReadlineEvent::Interrupted) => return InputEvent::Interrupted,
                Err(_) => return InputEvent::Eof,
            }
        }
    }

    /// Clear the terminal screen.
    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }
}
