//! Main chat loop orchestration.
//!
//! Coordinates the complete conversation lifecycle: database handle
//! acquisition, provider setup, welcome banner, greeting, input loop
//! with a thinking spinner, slash commands, and rendering.

use std::path::PathBuf;
use std::time::Duration;

use console::style;
use tracing::info;

use tabletalk_core::agent::{AgentSettings, SqlAgentEngine};
use tabletalk_core::chat::ChatController;
use tabletalk_core::chat::session::GREETING;
use tabletalk_core::llm::BoxLlmProvider;
use tabletalk_infra::llm::GroqProvider;
use tabletalk_infra::secret::api_key_from_env;
use tabletalk_infra::sqlite::{HandleCache, SqliteToolkit};
use tabletalk_types::chat::TurnRole;
use tabletalk_types::config::GlobalConfig;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// First `max` characters of a turn for the `/history` scrollback,
/// with an ellipsis when cut. Counts chars, not bytes, so multibyte
/// content never splits mid-character.
fn preview_turn(content: &str, max: usize) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Build a thinking spinner in the house style.
fn thinking_spinner() -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("static template"),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Run the interactive chat loop against the configured database.
pub async fn run_chat_loop(config: GlobalConfig) -> anyhow::Result<()> {
    // Open the database before anything else; a bad path should fail
    // fast, not surface mid-conversation.
    let db_path = PathBuf::from(&config.database_path);
    let cache = HandleCache::new(Duration::from_secs(config.handle_ttl_secs));
    let handle = cache.get_or_open(&db_path).await?;
    let toolkit = SqliteToolkit::new(handle);

    // A missing API key disables the agent but not the surface; every
    // submission will explain what is wrong.
    let mut controller = match api_key_from_env() {
        Ok(api_key) => {
            let provider =
                GroqProvider::with_base_url(&api_key, config.model.clone(), &config.base_url);
            let engine = SqlAgentEngine::new(
                BoxLlmProvider::new(provider),
                toolkit,
                AgentSettings {
                    model: config.model.clone(),
                    max_steps: config.max_steps,
                    max_tokens: config.max_tokens,
                    temperature: config.temperature,
                },
            );
            ChatController::new(engine)
        }
        Err(reason) => {
            eprintln!("\n  {} {reason}", style("!").yellow().bold());
            ChatController::without_agent(&reason)
        }
    };

    let session_id = controller.store().id().to_string();
    info!(session = %session_id, db = %db_path.display(), "chat session started");

    print_welcome_banner(&config.database_path, &config.model, &session_id);
    println!("  {}\n", style(GREETING).cyan());

    let renderer = ChatRenderer::new();
    let mut chat_input =
        ChatInput::new().map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let event = chat_input.read_line().await;
        match event {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => {
                            commands::print_help();
                            continue;
                        }
                        ChatCommand::Clear => {
                            chat_input.clear();
                            controller.clear_history();
                            print_welcome_banner(&config.database_path, &config.model, &session_id);
                            println!("  {}\n", style(GREETING).cyan());
                            continue;
                        }
                        ChatCommand::History => {
                            println!();
                            for turn in controller.store().turns() {
                                let role_label = match turn.role {
                                    TurnRole::User => format!("{}", style("You").green().bold()),
                                    TurnRole::Assistant => {
                                        format!("{}", style("TableTalk").cyan().bold())
                                    }
                                };
                                println!("  {role_label} {}", preview_turn(&turn.content, 97));
                            }
                            println!();
                            continue;
                        }
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::Unknown(cmd_name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(cmd_name).dim()
                            );
                            continue;
                        }
                    }
                }

                let spinner = thinking_spinner();
                let outcome = controller.submit(&text).await;
                spinner.finish_and_clear();

                println!();
                print!("{}", renderer.render(&outcome.view));
                println!();
            }
        }
    }

    info!(session = %session_id, "chat session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_turn_short_content_untouched() {
        assert_eq!(preview_turn("how many orders?", 97), "how many orders?");
    }

    #[test]
    fn test_preview_turn_truncates_long_multibyte_content() {
        let content = "é".repeat(150);
        let preview = preview_turn(&content, 97);
        assert_eq!(preview.chars().count(), 100); // 97 chars + "..."
        assert!(preview.ends_with("..."));
    }
}
