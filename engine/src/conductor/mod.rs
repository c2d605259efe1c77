//! Conductor System
//!
//! Planning, reply generation, and the conversation memory they share.

pub mod memory;
pub mod planner;
pub mod responder;

pub use memory::MemoryBuffer;
pub use planner::Planner;
pub use responder::ResponseGenerator;
