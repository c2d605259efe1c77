// Parley conversational assistant
// Main entry point for the parley binary

use clap::Parser;
use parley_engine::cli::{Cli, Command};
use parley_engine::config::Config;
use parley_engine::handlers::{
    handle_ask, handle_chat, handle_config, handle_doctor, handle_plan, OutputFormat,
};
use parley_engine::telemetry::init_telemetry_with_level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine output format
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    // Load configuration (or use custom path if provided)
    let (config, config_path) = if let Some(config_path) = &cli.config {
        (Config::load_from_path(config_path)?, config_path.clone())
    } else {
        (Config::load_or_create()?, Config::default_config_path()?)
    };

    // --log beats the config file; RUST_LOG beats both
    let log_level = cli.log.as_deref().unwrap_or(&config.core.log_level);
    init_telemetry_with_level(log_level);

    tracing::info!(
        "Parley v{} using {} backend",
        env!("CARGO_PKG_VERSION"),
        config.llm.provider
    );

    match cli.command() {
        Command::Chat {
            max_tokens,
            max_memory,
        } => handle_chat(&config, max_tokens, max_memory).await,

        Command::Ask { text } => {
            tracing::info!("Single turn: {}", text);
            handle_ask(text, &config, format).await
        }

        Command::Plan { text } => {
            tracing::info!("Planning only: {}", text);
            handle_plan(text, &config, format).await
        }

        Command::Doctor => {
            tracing::info!("Running diagnostics...");
            handle_doctor(&config, format).await
        }

        Command::Config { action } => {
            tracing::info!("Config management: {:?}", action);
            handle_config(action, &config, &config_path, format)
        }
    }
}
