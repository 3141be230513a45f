//! REST API endpoint handlers.

pub mod session;
