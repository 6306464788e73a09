//! Welcome banner display for chat sessions.
//!
//! Prints a styled banner when a session starts, showing the database
//! being queried, the model, and the session ID.

use console::style;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(database: &str, model: &str, session_id: &str) {
    println!();
    println!("  {} {}", style("#").bold(), style("TableTalk").cyan().bold());
    println!(
        "  {}",
        style("Ask questions about your database in plain English").dim()
    );
    println!();
    println!("  {}  {}", style("Database:").bold(), style(database).dim());
    println!("  {}     {}", style("Model:").bold(), style(model).dim());
    println!(
        "  {}   {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
