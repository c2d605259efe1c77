//! Example demonstrating the Ollama backend
//!
//! Prerequisites:
//! - Ollama must be installed and running (https://ollama.ai)
//! - A model must be pulled (e.g., `ollama pull llama3.1:8b`)
//!
//! Run with: cargo run --example ollama_chat

use parley_engine::llm::{ollama::OllamaProvider, TextGenerator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Ollama Backend Example ===\n");

    let provider = OllamaProvider::new("http://localhost:11434", "llama3.1:8b");

    println!("Backend: {}", provider.name());
    println!("Is Local: {}\n", provider.is_local());

    if !provider.check_health().await {
        eprintln!("Ollama is not reachable at http://localhost:11434");
        eprintln!("  1. Install Ollama from https://ollama.ai");
        eprintln!("  2. Pull a model: ollama pull llama3.1:8b");
        return Ok(());
    }

    let reply = provider
        .generate("Answer in one sentence: what is a ring buffer?", 60)
        .await?;
    println!("Reply: {}", reply.trim());

    Ok(())
}
