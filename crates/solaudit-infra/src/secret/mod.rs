//! API key resolution.
//!
//! Keys are only ever read from the environment and are wrapped in
//! [`secrecy::SecretString`] immediately so they cannot leak through `Debug`
//! or tracing output.

pub mod env;

pub use env::resolve_api_key;
