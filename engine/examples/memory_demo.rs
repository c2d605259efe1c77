//! Example demonstrating a few conversational turns without a model server
//!
//! A scripted generator stands in for the backend so the planner labels and
//! the memory window can be inspected offline.
//!
//! Run with: cargo run --example memory_demo

use std::sync::Arc;

use parley_engine::agent::Assistant;
use parley_engine::config::Config;
use parley_engine::llm::mock::MockGenerator;
use parley_engine::llm::TextGenerator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Memory Demo ===\n");

    let mut config = Config::default();
    config.memory.max_memory = 3;

    let mock = Arc::new(MockGenerator::scripted([
        "chat",
        "Hello! How can I assist?",
        "chat",
        "I'm your AI Agent.",
        "report",
        "In the Helsinki data center.",
        "email",
        "Sure, drafting it now.",
    ]));
    let llm: Arc<dyn TextGenerator> = mock.clone();
    let mut assistant = Assistant::from_config(&config, llm)?;

    for text in [
        "Hi",
        "What's your name?",
        "Where is the server located?",
        "Email the team about it",
    ] {
        let outcome = assistant.handle_turn(text).await?;
        println!("You: {}", text);
        println!("  action: {} (known: {})", outcome.action, outcome.intent.is_some());
        println!("  AI: {}\n", outcome.reply);
    }

    println!("{}", assistant.memory());
    println!("Context for the next reply:\n{}", assistant.context());
    println!("\nModel calls made: {}", mock.calls().len());

    Ok(())
}
