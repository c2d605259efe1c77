//! Agent Core
//!
//! Runs one conversational turn at a time: plan, answer, remember.

pub mod core;

pub use self::core::{Assistant, TurnOutcome};
