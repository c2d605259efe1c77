//! Integration tests for configuration management
//!
//! These tests verify that Config can be written, loaded from disk and
//! validated.

use parley_engine::config::Config;
use sdk::errors::EngineError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_full_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    fs::write(
        &config_path,
        r#"
[core]
log_level = "debug"

[llm]
provider = "openai"
max_tokens = 200
planner_max_tokens = 8

[llm.ollama]
base_url = "http://10.0.0.5:11434"
model = "mistral"
timeout_secs = 60

[llm.openai]
base_url = "http://localhost:8000/v1"
model = "local-model"
api_key_env = "LOCAL_LLM_KEY"
timeout_secs = 30

[memory]
max_memory = 4
context_turns = 2
"#,
    )
    .unwrap();

    let config = Config::load_from_path(&config_path).unwrap();

    assert_eq!(config.core.log_level, "debug");
    assert_eq!(config.llm.provider, "openai");
    assert_eq!(config.llm.max_tokens, 200);
    assert_eq!(config.llm.planner_max_tokens, 8);
    assert_eq!(config.llm.ollama.model, "mistral");
    assert_eq!(config.llm.ollama.timeout_secs, 60);
    assert_eq!(config.llm.openai.api_key_env, "LOCAL_LLM_KEY");
    assert_eq!(config.memory.max_memory, 4);
    assert_eq!(config.memory.context_turns, 2);
}

#[test]
fn test_create_default_writes_loadable_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let created = Config::create_default(&config_path).unwrap();
    assert!(config_path.exists());

    let loaded = Config::load_from_path(&config_path).unwrap();
    assert_eq!(created, loaded);
    assert_eq!(loaded, Config::default());
}

#[test]
fn test_missing_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = Config::load_from_path(&temp_dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, EngineError::Config(msg) if msg.contains("read")));
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let cases = [
        "[memory]\nmax_memory = 0\n",
        "[llm]\nmax_tokens = 0\n",
        "[llm]\nplanner_max_tokens = 0\n",
        "[llm.ollama]\ntimeout_secs = 0\n",
        "[llm]\nprovider = \"huggingface\"\n",
        "[core]\nlog_level = \"verbose\"\n",
        "not toml at all [",
    ];

    for case in cases {
        fs::write(&config_path, case).unwrap();
        let result = Config::load_from_path(&config_path);
        assert!(
            matches!(result, Err(EngineError::Config(_))),
            "Expected config error for {:?}",
            case
        );
    }
}
