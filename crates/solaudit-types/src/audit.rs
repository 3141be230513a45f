//! Audit value objects.
//!
//! `AuditSegment` is the three-field structured result the model is asked to
//! produce for one Solidity function. `AuditHistoryEntry` is a frozen copy of
//! a segment together with the code it was computed from, created only when
//! the reviewer finalizes an audit.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Structured audit of a single Solidity function.
///
/// All three fields are required when deserializing model output: a missing
/// field is a schema conformance failure, not an empty default. Empty lists
/// are valid and mean "nothing found".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AuditSegment {
    /// A concise explanation of what the function does.
    pub summary: String,
    /// Security or logic risks.
    pub risks: Vec<String>,
    /// Fixes or improvements.
    pub suggestions: Vec<String>,
}

impl AuditSegment {
    pub fn new(
        summary: impl Into<String>,
        risks: Vec<String>,
        suggestions: Vec<String>,
    ) -> Self {
        Self {
            summary: summary.into(),
            risks,
            suggestions,
        }
    }
}

/// A finalized audit, owned by the session's history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditHistoryEntry {
    pub function_code: String,
    pub summary: String,
    pub risks: Vec<String>,
    pub suggestions: Vec<String>,
}

impl AuditHistoryEntry {
    /// Freeze a segment together with the code it audits.
    pub fn from_segment(function_code: impl Into<String>, segment: &AuditSegment) -> Self {
        Self {
            function_code: function_code.into(),
            summary: segment.summary.clone(),
            risks: segment.risks.clone(),
            suggestions: segment.suggestions.clone(),
        }
    }

    /// The audit portion of this entry as a segment value.
    pub fn segment(&self) -> AuditSegment {
        AuditSegment {
            summary: self.summary.clone(),
            risks: self.risks.clone(),
            suggestions: self.suggestions.clone(),
        }
    }
}

/// JSON schema for `AuditSegment`, ready to hand to a structured-output API.
///
/// Strict structured output modes reject schemas that allow extra keys, so
/// every object is closed with `additionalProperties: false`. The `$schema`
/// meta key is dropped.
pub fn audit_segment_schema() -> serde_json::Value {
    let mut schema = schemars::schema_for!(AuditSegment).to_value();
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("$schema");
    }
    add_additional_properties_false(&mut schema);
    schema
}

/// Recursively set `additionalProperties: false` on every object schema.
pub fn add_additional_properties_false(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            let is_object_schema = map
                .get("type")
                .and_then(|t| t.as_str())
                .is_some_and(|t| t == "object")
                || map.contains_key("properties");
            if is_object_schema {
                map.insert(
                    "additionalProperties".to_string(),
                    serde_json::Value::Bool(false),
                );
            }
            for (_, child) in map.iter_mut() {
                add_additional_properties_false(child);
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                add_additional_properties_false(item);
            }
        }
        _ => {}
    }
}
