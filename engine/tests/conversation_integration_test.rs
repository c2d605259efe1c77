//! Integration tests for full conversational turns
//!
//! Covers the planner → response generator → memory chain end to end, both
//! against a wiremock Ollama and through the interactive chat loop.

use serde_json::json;
use std::sync::Arc;
use wiremock::{
    matchers::{body_string_contains, method, path},
    Mock, MockServer, ResponseTemplate,
};

use parley_engine::agent::Assistant;
use parley_engine::config::Config;
use parley_engine::handlers::run_chat_loop;
use parley_engine::llm::mock::MockGenerator;
use parley_engine::llm::{ollama::OllamaProvider, GenerationError, TextGenerator};
use sdk::errors::EngineError;
use sdk::types::Intent;

fn mock_assistant(mock: &Arc<MockGenerator>) -> Assistant {
    let llm: Arc<dyn TextGenerator> = mock.clone();
    Assistant::from_config(&Config::default(), llm).unwrap()
}

#[tokio::test]
async fn test_turns_against_ollama() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_string_contains("You are a planning assistant."))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": " Email\n",
            "done": true
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_string_contains("Conversation so far:"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Draft ready.",
            "done": true
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let llm: Arc<dyn TextGenerator> =
        Arc::new(OllamaProvider::new(mock_server.uri(), "llama3.1:8b"));
    let mut assistant = Assistant::from_config(&Config::default(), llm).unwrap();

    let first = assistant.handle_turn("Email Bob about lunch").await.unwrap();
    assert_eq!(first.action, "email");
    assert_eq!(first.intent, Some(Intent::Email));
    assert_eq!(first.reply, "Draft ready.");

    assistant.handle_turn("Make it shorter").await.unwrap();
    assert_eq!(
        assistant.context(),
        "User: Email Bob about lunch\nAI: Draft ready.\nUser: Make it shorter\nAI: Draft ready."
    );
}

#[tokio::test]
async fn test_backend_failure_aborts_turn_only() {
    let mock = Arc::new(MockGenerator::scripted(["chat"]).with_fallback("Fine, thanks."));
    mock.push_error(GenerationError::Timeout);
    let mut assistant = mock_assistant(&mock);

    // Planner succeeds, responder times out
    let err = assistant.handle_turn("How are you?").await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Generation(GenerationError::Timeout)
    ));
    assert!(assistant.memory().is_empty());

    // The session keeps working
    let outcome = assistant.handle_turn("How are you?").await.unwrap();
    assert_eq!(outcome.reply, "Fine, thanks.");
    assert_eq!(assistant.memory().len(), 1);
}

#[tokio::test]
async fn test_memory_capacity_from_config() {
    let mut config = Config::default();
    config.memory.max_memory = 2;
    let mock = Arc::new(MockGenerator::always("chat"));
    let llm: Arc<dyn TextGenerator> = mock.clone();
    let mut assistant = Assistant::from_config(&config, llm).unwrap();

    for text in ["A", "B", "C"] {
        assistant.handle_turn(text).await.unwrap();
    }

    let users: Vec<&str> = assistant.memory().turns().map(|t| t.user()).collect();
    assert_eq!(users, vec!["B", "C"]);
}

#[tokio::test]
async fn test_chat_loop_transcript() {
    let mock = Arc::new(MockGenerator::scripted(["Chat", "Hello!"]));
    let mut assistant = mock_assistant(&mock);

    let input = b"Hi\n\n   \n/history\nEXIT\nnever sent\n";
    let mut output: Vec<u8> = Vec::new();

    run_chat_loop(&mut assistant, &input[..], &mut output)
        .await
        .unwrap();

    let transcript = String::from_utf8(output).unwrap();
    assert!(transcript.contains("Type 'exit' to quit."));
    assert!(transcript.contains("Planner chose action: chat\nAI: Hello!\n"));
    assert!(transcript.contains("User: Hi\nAI: Hello!\n"));
    assert!(transcript.ends_with("Goodbye.\n"));
    assert!(!transcript.contains("never sent"));

    // Blank lines and commands never reach the model
    assert_eq!(mock.calls().len(), 2);
}

#[tokio::test]
async fn test_chat_loop_clear_and_quit() {
    let mock = Arc::new(MockGenerator::always("chat"));
    let mut assistant = mock_assistant(&mock);

    let input = b"Hi\n/clear\n/history\nquit\n";
    let mut output: Vec<u8> = Vec::new();

    run_chat_loop(&mut assistant, &input[..], &mut output)
        .await
        .unwrap();

    let transcript = String::from_utf8(output).unwrap();
    assert!(transcript.contains("Memory cleared."));
    assert!(transcript.contains("(no history)"));
    assert!(assistant.memory().is_empty());
}

#[tokio::test]
async fn test_chat_loop_reports_errors_and_continues() {
    let mock = Arc::new(MockGenerator::new().with_fallback("chat"));
    mock.push_error(GenerationError::ProviderUnavailable("down".to_string()));
    let mut assistant = mock_assistant(&mock);

    let input = b"First\nSecond\n";
    let mut output: Vec<u8> = Vec::new();

    // End of input also ends the session cleanly
    run_chat_loop(&mut assistant, &input[..], &mut output)
        .await
        .unwrap();

    let transcript = String::from_utf8(output).unwrap();
    assert!(transcript.contains("Error: Generation failed: Provider unavailable: down"));
    assert!(transcript.contains("Hint: "));
    assert!(transcript.contains("AI: chat"));
    assert!(transcript.ends_with("Goodbye.\n"));
    assert_eq!(assistant.memory().len(), 1);
}
