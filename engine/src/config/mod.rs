//! Configuration management
//!
//! This module handles loading, validation, and management of the Parley configuration.
//! Configuration is stored in TOML format at ~/.parley/config.toml.
//!
//! # Configuration Sections
//!
//! - **core**: Log level
//! - **llm**: Text generation backend selection and token bounds
//! - **memory**: Conversation memory capacity and context window
//!
//! Every section is optional in the file; missing sections and fields fall
//! back to their defaults.
//!
//! # Examples
//!
//! ```no_run
//! use parley_engine::config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration from default location
//! let config = Config::load_or_create()?;
//!
//! println!("Provider: {}", config.llm.provider);
//! println!("Memory capacity: {}", config.memory.max_memory);
//! # Ok(())
//! # }
//! ```

use sdk::errors::EngineError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Valid log levels
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Valid text generation backends
pub const PROVIDERS: [&str; 2] = ["ollama", "openai"];

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Core engine settings
    #[serde(default)]
    pub core: CoreConfig,

    /// Text generation configuration
    #[serde(default)]
    pub llm: LLMConfig,

    /// Conversation memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// Core engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoreConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Text generation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LLMConfig {
    /// Backend to use (ollama, openai)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Maximum output tokens for a reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Maximum output tokens for an intent decision
    #[serde(default = "default_max_tokens")]
    pub planner_max_tokens: usize,

    /// Ollama backend settings
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// OpenAI-compatible backend settings
    #[serde(default)]
    pub openai: OpenAIConfig,
}

/// Ollama backend configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OllamaConfig {
    /// Base URL for Ollama API
    #[serde(default = "default_ollama_base_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_ollama_model")]
    pub model: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_ollama_timeout")]
    pub timeout_secs: u64,
}

/// OpenAI-compatible backend configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenAIConfig {
    /// Base URL for the API
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_openai_api_key_env")]
    pub api_key_env: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_openai_timeout")]
    pub timeout_secs: u64,
}

/// Conversation memory configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryConfig {
    /// Number of turns retained before the oldest is evicted
    #[serde(default = "default_max_memory")]
    pub max_memory: usize,

    /// Number of most recent turns rendered into each prompt
    #[serde(default = "default_context_turns")]
    pub context_turns: usize,
}

// Default value functions
fn default_log_level() -> String {
    "warn".to_string()
}

fn default_provider() -> String {
    "ollama".to_string()
}

fn default_max_tokens() -> usize {
    150
}

fn default_ollama_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.1:8b".to_string()
}

fn default_ollama_timeout() -> u64 {
    300
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_openai_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_openai_timeout() -> u64 {
    120
}

fn default_max_memory() -> usize {
    10
}

fn default_context_turns() -> usize {
    5
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            max_tokens: default_max_tokens(),
            planner_max_tokens: default_max_tokens(),
            ollama: OllamaConfig::default(),
            openai: OpenAIConfig::default(),
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_base_url(),
            model: default_ollama_model(),
            timeout_secs: default_ollama_timeout(),
        }
    }
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: default_openai_base_url(),
            model: default_openai_model(),
            api_key_env: default_openai_api_key_env(),
            timeout_secs: default_openai_timeout(),
        }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_memory: default_max_memory(),
            context_turns: default_context_turns(),
        }
    }
}

impl Config {
    /// Load configuration from the default location (~/.parley/config.toml)
    ///
    /// If the configuration file doesn't exist, writes a default configuration
    /// there first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written, TOML parsing
    /// fails, or validation fails.
    pub fn load_or_create() -> Result<Self, EngineError> {
        let config_path = Self::default_config_path()?;

        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            Self::create_default(&config_path)
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, EngineError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, EngineError> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| EngineError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Create default configuration and save to path
    pub fn create_default(path: &Path) -> Result<Self, EngineError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                EngineError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let config = Self::default();

        let toml_string = toml::to_string_pretty(&config)
            .map_err(|e| EngineError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string)
            .map_err(|e| EngineError::Config(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Created default configuration at {}", path.display());
        Ok(config)
    }

    /// Get the default configuration file path (~/.parley/config.toml)
    pub fn default_config_path() -> Result<PathBuf, EngineError> {
        let home = dirs::home_dir()
            .ok_or_else(|| EngineError::Config("Could not determine home directory".to_string()))?;

        Ok(home.join(".parley").join("config.toml"))
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Config` if:
    /// - The log level or provider is unknown
    /// - A token bound, the memory capacity or a timeout is zero
    pub fn validate(&self) -> Result<(), EngineError> {
        if !LOG_LEVELS.contains(&self.core.log_level.as_str()) {
            return Err(EngineError::Config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.core.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        if !PROVIDERS.contains(&self.llm.provider.as_str()) {
            return Err(EngineError::Config(format!(
                "Invalid provider '{}'. Must be one of: {}",
                self.llm.provider,
                PROVIDERS.join(", ")
            )));
        }

        if self.llm.max_tokens == 0 {
            return Err(EngineError::Config(
                "max_tokens must be at least 1".to_string(),
            ));
        }
        if self.llm.planner_max_tokens == 0 {
            return Err(EngineError::Config(
                "planner_max_tokens must be at least 1".to_string(),
            ));
        }

        if self.llm.ollama.timeout_secs == 0 || self.llm.openai.timeout_secs == 0 {
            return Err(EngineError::Config(
                "timeout_secs must be at least 1".to_string(),
            ));
        }

        if self.memory.max_memory == 0 {
            return Err(EngineError::Config(
                "max_memory must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
