//! Parley Engine Library
//!
//! This library provides the core functionality of the Parley assistant.
//! It is used by both the main binary and integration tests.

/// Configuration management module
pub mod config;

/// Text generation abstraction layer
pub mod llm;

/// Conversation memory, planner and response generator
pub mod conductor;

/// Turn orchestration
pub mod agent;

/// Telemetry and Observability
pub mod telemetry;

/// CLI interface module
pub mod cli;

/// Command handlers module
pub mod handlers;
