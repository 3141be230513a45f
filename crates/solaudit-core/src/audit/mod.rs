//! Audit review domain: prompts, the model port, state transitions, the
//! controller, and Markdown rendering.

pub mod client;
pub mod controller;
pub mod prompt;
pub mod report;
pub mod state;
