//! Markdown rendering of audits.
//!
//! Pure view functions used by every presentation surface: the current audit
//! block (summary, risks, suggestions) and the final report listing each
//! finalized function with its code.

use std::fmt::Write as _;

use solaudit_types::audit::{AuditHistoryEntry, AuditSegment};

const NONE_FOUND: &str = "_None identified._";

/// Render one audit as Markdown.
pub fn render_audit(segment: &AuditSegment) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "**Summary:** {}", segment.summary);
    out.push('\n');
    out.push_str("**Risks:**\n");
    push_bullets(&mut out, &segment.risks);
    out.push('\n');
    out.push_str("**Suggestions:**\n");
    push_bullets(&mut out, &segment.suggestions);
    out
}

/// Render the finalized history as a Markdown report.
///
/// Functions are numbered from 1 in finalization order. Returns an empty
/// string when there is no history.
pub fn render_report(history: &[AuditHistoryEntry]) -> String {
    if history.is_empty() {
        return String::new();
    }

    let mut out = String::from("# Final Audit Report\n");
    for (idx, entry) in history.iter().enumerate() {
        let _ = writeln!(out, "\n## Function {}\n", idx + 1);
        let fence = code_fence(&entry.function_code);
        let _ = writeln!(out, "{fence}solidity");
        out.push_str(entry.function_code.trim_end());
        let _ = write!(out, "\n{fence}\n\n");
        out.push_str(&render_audit(&entry.segment()));
    }
    out
}

/// A backtick fence longer than any backtick run inside `code`, minimum three.
fn code_fence(code: &str) -> String {
    let longest = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

fn push_bullets(out: &mut String, items: &[String]) {
    if items.is_empty() {
        let _ = writeln!(out, "- {NONE_FOUND}");
        return;
    }
    for item in items {
        let _ = writeln!(out, "- {item}");
    }
}
