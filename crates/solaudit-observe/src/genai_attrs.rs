//! OpenTelemetry GenAI Semantic Convention attribute names.
//!
//! Model-call spans declare their fields with literal names in the span
//! macro, leaving response-dependent ones as `tracing::field::Empty`. The
//! constants below name the fields that are filled in later with
//! `Span::record`, plus the operation name values.

pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";

pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";

/// Why the model stopped (e.g., "end_turn", "max_tokens").
pub const GEN_AI_RESPONSE_FINISH_REASONS: &str = "gen_ai.response.finish_reasons";

/// The unique response/message ID from the provider.
pub const GEN_AI_RESPONSE_ID: &str = "gen_ai.response.id";

// --- Operation name values ---

/// Schema-constrained audit completion (initial or revision).
pub const OP_STRUCTURED_AUDIT: &str = "structured_audit";

/// Minimal completion used to verify credentials.
pub const OP_CONNECTION_CHECK: &str = "connection_check";
