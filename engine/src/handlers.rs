//! Command handlers
//!
//! Each CLI command maps to one handler here. The interactive chat loop is
//! generic over its input and output streams so it can be driven from tests.

use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::agent::Assistant;
use crate::cli::ConfigAction;
use crate::config::Config;
use crate::llm::{build_generator, TextGenerator};
use sdk::errors::ErrorHintExt;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for machine consumption
    Json,
}

/// Words that end the chat session (case-insensitive)
const EXIT_WORDS: [&str; 2] = ["exit", "quit"];

/// Whether `input` asks to leave the chat
pub fn is_exit_command(input: &str) -> bool {
    let input = input.trim();
    EXIT_WORDS
        .iter()
        .any(|word| input.eq_ignore_ascii_case(word))
}

/// Build the configured backend and an assistant around it.
fn build_assistant(config: &Config) -> Result<(Assistant, Arc<dyn TextGenerator>)> {
    let llm = build_generator(&config.llm).context("Failed to create text generator")?;
    let assistant = Assistant::from_config(config, Arc::clone(&llm))
        .context("Failed to create assistant")?;
    Ok((assistant, llm))
}

/// Start an interactive chat on stdin/stdout
pub async fn handle_chat(
    config: &Config,
    max_tokens: Option<usize>,
    max_memory: Option<usize>,
) -> Result<()> {
    let mut config = config.clone();
    if let Some(max_tokens) = max_tokens {
        config.llm.max_tokens = max_tokens;
    }
    if let Some(max_memory) = max_memory {
        config.memory.max_memory = max_memory;
    }
    config.validate()?;

    let (mut assistant, llm) = build_assistant(&config)?;

    if !llm.check_health().await {
        tracing::warn!(
            "Backend '{}' did not pass its health check; replies may fail",
            llm.name()
        );
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    run_chat_loop(&mut assistant, stdin, &mut stdout).await
}

/// Drive a chat session until an exit word or end of input.
///
/// Blank lines are ignored. `/clear` forgets the conversation and `/history`
/// prints the context the next reply will see. A failed turn is reported and
/// the session continues; only non-recoverable errors end it.
pub async fn run_chat_loop<R, W>(assistant: &mut Assistant, reader: R, writer: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    writer
        .write_all(b"\nAssistant ready. Type 'exit' to quit.\n\n")
        .await?;

    loop {
        writer.write_all(b"You: ").await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            writer.write_all(b"\n").await?;
            break;
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if is_exit_command(input) {
            break;
        }

        match input {
            "/clear" => {
                assistant.clear_memory();
                writer.write_all(b"Memory cleared.\n\n").await?;
                continue;
            }
            "/history" => {
                let context = assistant.context();
                let text = if context.is_empty() {
                    "(no history)".to_string()
                } else {
                    context
                };
                writer.write_all(format!("{}\n\n", text).as_bytes()).await?;
                continue;
            }
            _ => {}
        }

        match assistant.handle_turn(input).await {
            Ok(outcome) => {
                tracing::debug!("Turn completed in {}ms", outcome.duration_ms);
                let text = format!(
                    "Planner chose action: {}\nAI: {}\n\n",
                    outcome.action, outcome.reply
                );
                writer.write_all(text.as_bytes()).await?;
            }
            Err(e) if e.is_recoverable() => {
                tracing::error!("Turn failed: {}", e);
                let text = format!("Error: {}\nHint: {}\n\n", e, e.user_hint());
                writer.write_all(text.as_bytes()).await?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    writer.write_all(b"Goodbye.\n").await?;
    writer.flush().await?;
    Ok(())
}

/// Plan and answer a single message
pub async fn handle_ask(text: String, config: &Config, format: OutputFormat) -> Result<()> {
    let (mut assistant, _) = build_assistant(config)?;
    let outcome = assistant.handle_turn(&text).await?;

    match format {
        OutputFormat::Text => {
            println!("Planner chose action: {}", outcome.action);
            println!("AI: {}", outcome.reply);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }
    Ok(())
}

/// Show the planner's label for a message
pub async fn handle_plan(text: String, config: &Config, format: OutputFormat) -> Result<()> {
    let (assistant, _) = build_assistant(config)?;
    let action = assistant.plan(&text).await?;
    let intent = sdk::types::Intent::from_label(&action);

    match format {
        OutputFormat::Text => println!("{}", action),
        OutputFormat::Json => {
            let output = json!({
                "action": action,
                "intent": intent,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

/// Run diagnostics on configuration and the backend
pub async fn handle_doctor(config: &Config, format: OutputFormat) -> Result<()> {
    let mut checks: Vec<(&str, String)> = Vec::new();
    let mut issues = Vec::new();

    // Config is already validated when loaded
    checks.push(("Configuration", "Valid".to_string()));
    checks.push((
        "Memory",
        format!(
            "{} turns, {} in context",
            config.memory.max_memory, config.memory.context_turns
        ),
    ));

    let model = match config.llm.provider.as_str() {
        "openai" => config.llm.openai.model.clone(),
        _ => config.llm.ollama.model.clone(),
    };
    checks.push(("Backend", format!("{} ({})", config.llm.provider, model)));

    match build_generator(&config.llm) {
        Ok(llm) => {
            if llm.check_health().await {
                checks.push(("Backend health", "Available".to_string()));
            } else {
                checks.push(("Backend health", "Unavailable".to_string()));
                issues.push(format!(
                    "Backend '{}' is not reachable or not configured",
                    llm.name()
                ));
            }
        }
        Err(e) => {
            checks.push(("Backend health", "Failed".to_string()));
            issues.push(e.to_string());
        }
    }

    match format {
        OutputFormat::Text => {
            println!("Parley diagnostics:");
            for (name, status) in &checks {
                println!("  {:<16} {}", name, status);
            }
            if issues.is_empty() {
                println!("\nNo issues found.");
            } else {
                println!("\nIssues:");
                for issue in &issues {
                    println!("  - {}", issue);
                }
            }
        }
        OutputFormat::Json => {
            let checks: serde_json::Map<String, serde_json::Value> = checks
                .into_iter()
                .map(|(name, status)| (name.to_string(), json!(status)))
                .collect();
            let output = json!({
                "checks": checks,
                "issues": issues,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

/// Show, locate, or validate the configuration
pub fn handle_config(
    action: ConfigAction,
    config: &Config,
    path: &Path,
    format: OutputFormat,
) -> Result<()> {
    match action {
        ConfigAction::Show => match format {
            OutputFormat::Text => {
                let text =
                    toml::to_string_pretty(config).context("Failed to serialize config")?;
                print!("{}", text);
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        },
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Validate => {
            // Loading already validated the file
            println!("Configuration at {} is valid.", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_words() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("QUIT"));
        assert!(is_exit_command("  Exit  "));
        assert!(!is_exit_command("exit now"));
        assert!(!is_exit_command("q"));
        assert!(!is_exit_command(""));
    }
}
