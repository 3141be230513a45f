//! Terminal output for audits and reports.
//!
//! Markdown produced by `solaudit_core::audit::report` is rendered with
//! `termimad`; the history overview is a `comfy_table` table.

use std::time::Duration;

use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use termimad::MadSkin;

use solaudit_core::audit::report::{render_audit, render_report};
use solaudit_types::audit::{AuditHistoryEntry, AuditSegment};
use solaudit_types::error::AuditError;

/// Widest signature shown in the history table.
const SIGNATURE_WIDTH: usize = 60;

pub struct AuditRenderer {
    skin: MadSkin,
}

impl AuditRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(termimad::crossterm::style::Color::Cyan);
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);
        Self { skin }
    }

    pub fn print_markdown(&self, markdown: &str) {
        println!("{}", self.skin.term_text(markdown));
    }

    /// Print the current audit block.
    pub fn print_audit(&self, segment: &AuditSegment) {
        println!();
        println!("  {}", style("── Current Audit ──").dim());
        self.print_markdown(&render_audit(segment));
    }

    /// Print the finalized-history table followed by the full Markdown report.
    pub fn print_report(&self, history: &[AuditHistoryEntry]) {
        if history.is_empty() {
            println!(
                "  {} No finalized audits yet.",
                style("i").blue().bold()
            );
            return;
        }

        println!();
        println!("{}", history_table(history));
        println!();
        self.print_markdown(&render_report(history));
    }
}

impl Default for AuditRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Overview table of finalized audits, one row per function.
pub fn history_table(history: &[AuditHistoryEntry]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Function").fg(Color::Cyan),
            Cell::new("Summary").fg(Color::Cyan),
            Cell::new("Risks").fg(Color::Cyan),
            Cell::new("Suggestions").fg(Color::Cyan),
        ]);

    for (idx, entry) in history.iter().enumerate() {
        let risk_color = if entry.risks.is_empty() {
            Color::Green
        } else {
            Color::Red
        };
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(signature(&entry.function_code)),
            Cell::new(&entry.summary),
            Cell::new(entry.risks.len()).fg(risk_color),
            Cell::new(entry.suggestions.len()),
        ]);
    }

    table
}

/// First non-blank line of the code, cut at the opening brace and shortened
/// to fit the table.
fn signature(code: &str) -> String {
    let line = code
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("");
    let line = line.split('{').next().unwrap_or(line).trim_end();
    truncate(line, SIGNATURE_WIDTH)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Print a trigger error: warnings in yellow, model failures in red.
pub fn print_audit_error(err: &AuditError) {
    if err.is_warning() {
        eprintln!("  {} {}", style("!").yellow().bold(), style(err).yellow());
    } else {
        eprintln!("  {} {}", style("✗").red().bold(), style(err).red());
    }
}

/// Steady-ticking spinner shown while the model is working.
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
