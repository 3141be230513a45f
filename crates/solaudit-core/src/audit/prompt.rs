//! Prompt templates for the initial audit and the feedback revision.
//!
//! Both builders are pure. They reject empty required input before any model
//! call is made, and both templates spell out the `AuditSegment` schema so
//! the model knows which three fields to return.

use solaudit_types::audit::AuditSegment;
use solaudit_types::error::AuditError;

/// Build the prompt asking for a first audit of `function_code`.
///
/// The code is trimmed before substitution.
pub fn build_audit_prompt(function_code: &str) -> Result<String, AuditError> {
    let function_code = require_text(function_code, "function code")?;

    Ok(format!(
        r#"You are a smart contract auditor. Analyze the following Solidity function:

{function_code}

Return your findings in structured format:
1. Summary of what the function does,
2. List of potential vulnerabilities,
3. Suggestions for fixing issues or improving security.

Output must match the AuditSegment schema:
- summary: string
- risks: List of strings
- suggestions: List of strings
"#
    ))
}

/// Build the prompt asking the model to revise `old_segment` given reviewer
/// feedback.
///
/// The prior risks and suggestions are embedded as newline-joined blocks in
/// their original order, and the feedback is quoted verbatim (trimmed).
pub fn build_feedback_prompt(
    function_code: &str,
    old_segment: &AuditSegment,
    human_feedback: &str,
) -> Result<String, AuditError> {
    let human_feedback = require_text(human_feedback, "feedback")?;
    let old_summary = &old_segment.summary;
    let old_risks = old_segment.risks.join("\n");
    let old_suggestions = old_segment.suggestions.join("\n");

    Ok(format!(
        r#"You previously audited this Solidity function:

{function_code}

Original Audit Output:
SUMMARY:
{old_summary}

RISKS:
{old_risks}

SUGGESTIONS:
{old_suggestions}

A human reviewer provided the following feedback:
"{human_feedback}"

Using the feedback, revise your audit and return a complete structured object like this:

{{
  "summary": "...",
  "risks": ["...", "..."],
  "suggestions": ["...", "..."]
}}
"#
    ))
}

fn require_text<'a>(value: &'a str, what: &str) -> Result<&'a str, AuditError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AuditError::InvalidInput(format!("{what} is empty")));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WITHDRAW: &str = "function withdraw() public { ... }";

    fn segment() -> AuditSegment {
        AuditSegment::new(
            "Withdraws funds",
            vec!["reentrancy".to_string(), "unchecked call".to_string()],
            vec![
                "add checks-effects-interactions".to_string(),
                "use a reentrancy guard".to_string(),
            ],
        )
    }

    #[test]
    fn test_audit_prompt_contains_code_and_schema_fields() {
        let prompt = build_audit_prompt(WITHDRAW).unwrap();
        assert!(prompt.contains(WITHDRAW));
        assert!(prompt.contains("summary"));
        assert!(prompt.contains("risks"));
        assert!(prompt.contains("suggestions"));
        assert!(prompt.starts_with("You are a smart contract auditor."));
    }

    #[test]
    fn test_audit_prompt_trims_code() {
        let prompt = build_audit_prompt("\n\n  function f() {}  \n").unwrap();
        assert!(prompt.contains("\n\nfunction f() {}\n\n"));
    }

    #[test]
    fn test_audit_prompt_rejects_blank_code() {
        for code in ["", "   ", "\n\t  \n"] {
            let err = build_audit_prompt(code).unwrap_err();
            assert!(matches!(err, AuditError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_feedback_prompt_contains_prior_output_and_feedback() {
        let old = segment();
        let feedback = "The risk about \"unchecked call\" is a false positive.";
        let prompt = build_feedback_prompt(WITHDRAW, &old, feedback).unwrap();

        assert!(prompt.contains(WITHDRAW));
        assert!(prompt.contains(&old.summary));
        for risk in &old.risks {
            assert!(prompt.contains(risk.as_str()));
        }
        for suggestion in &old.suggestions {
            assert!(prompt.contains(suggestion.as_str()));
        }
        assert!(prompt.contains(feedback));
        assert!(prompt.contains("\"summary\": \"...\""));
    }

    #[test]
    fn test_feedback_prompt_joins_lists_in_order() {
        let prompt = build_feedback_prompt(WITHDRAW, &segment(), "tighten it").unwrap();
        assert!(prompt.contains("RISKS:\nreentrancy\nunchecked call\n"));
        assert!(prompt.contains(
            "SUGGESTIONS:\nadd checks-effects-interactions\nuse a reentrancy guard\n"
        ));
    }

    #[test]
    fn test_feedback_prompt_with_empty_lists() {
        let old = AuditSegment::new("Returns a constant", vec![], vec![]);
        let prompt = build_feedback_prompt(WITHDRAW, &old, "looks right").unwrap();
        assert!(prompt.contains("RISKS:\n\n\nSUGGESTIONS:\n\n\nA human reviewer"));
    }

    #[test]
    fn test_feedback_prompt_rejects_blank_feedback() {
        let err = build_feedback_prompt(WITHDRAW, &segment(), "  \n ").unwrap_err();
        assert!(matches!(err, AuditError::InvalidInput(ref m) if m.contains("feedback")));
    }
}
