//! TableTalk terminal entry point.
//!
//! Binary name: `ttalk`
//!
//! Parses CLI arguments, loads `config.toml`, applies flag overrides,
//! then hands off to the interactive chat loop.

mod chat;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tabletalk_infra::config::{ConfigOverrides, apply_overrides, default_config_dir, load_global_config};

/// Chat with a SQLite database in plain English.
#[derive(Parser, Debug)]
#[command(name = "ttalk", version, about)]
struct Cli {
    /// Path to the SQLite database file (overrides config.toml)
    #[arg(long)]
    db: Option<String>,

    /// Model identifier sent to the provider (overrides config.toml)
    #[arg(long)]
    model: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint
    #[arg(long)]
    base_url: Option<String>,

    /// Maximum reasoning steps per question
    #[arg(long)]
    max_steps: Option<u32>,

    /// Directory containing config.toml (defaults to ~/.tabletalk)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,tabletalk=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let config_dir = cli
        .config_dir
        .or_else(default_config_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let config = load_global_config(&config_dir).await;
    let config = apply_overrides(
        config,
        ConfigOverrides {
            database_path: cli.db,
            model: cli.model,
            base_url: cli.base_url,
            max_steps: cli.max_steps,
        },
    );

    chat::loop_runner::run_chat_loop(config).await
}
