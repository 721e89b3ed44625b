//! AI systems (FSM glue: senses → controller → effects)

pub mod fsm;
pub mod reactions;
pub mod sinks;

// Re-export all systems
pub use fsm::*;
pub use reactions::*;
pub use sinks::*;
