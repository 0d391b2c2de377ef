//! Domain logic - pure, synchronous rules with no external calls.

pub mod emergency;
pub mod facility;
pub mod tools;

pub use emergency::{is_emergency, EMERGENCY_KEYWORDS};
pub use facility::Facility;
pub use tools::{tool_choice_for, tool_schema, ToolChoice, ASSISTANT_INSTRUCTIONS};
