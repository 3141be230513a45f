//! Interactive review loop.
//!
//! The reviewer submits a function, reads the audit, refines it with
//! feedback as often as needed, and finalizes it into the session history.
//! Errors from a single trigger are printed and the loop carries on with the
//! session unchanged.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Editor, Input, Select};

use solaudit_types::session::{SessionPhase, SessionState};

use super::render::{AuditRenderer, print_audit_error, spinner};
use crate::state::AppState;

/// Menu entries, filtered by session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Feedback,
    Finalize,
    SubmitCode,
    ShowReport,
    Quit,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::Feedback => "Regenerate with feedback",
            Action::Finalize => "Finalize this audit",
            Action::SubmitCode => "Submit new code",
            Action::ShowReport => "Show report",
            Action::Quit => "Quit",
        }
    }

    fn available(phase: SessionPhase) -> Vec<Action> {
        match phase {
            SessionPhase::Reviewing => vec![
                Action::Feedback,
                Action::Finalize,
                Action::SubmitCode,
                Action::ShowReport,
                Action::Quit,
            ],
            SessionPhase::Idle => vec![Action::SubmitCode, Action::ShowReport, Action::Quit],
        }
    }
}

/// Run an interactive review session.
///
/// `initial_file`, when given, is audited before the first menu is shown.
pub async fn run_review(state: &AppState, initial_file: Option<&Path>) -> Result<()> {
    let renderer = AuditRenderer::new();
    let controller = &state.controller;
    let mut session = SessionState::default();

    println!();
    println!(
        "  {} Reviewing with {}",
        style("◆").cyan().bold(),
        style(&state.config.model.model).cyan()
    );
    println!();

    if let Some(path) = initial_file {
        let code = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        submit(state, &renderer, &mut session, &code).await;
    }

    loop {
        let phase = controller.render(&session).phase;
        let actions = Action::available(phase);
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();

        let choice = Select::new()
            .with_prompt(format!(
                "[{}] {} finalized",
                phase,
                session.audit_history.len()
            ))
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[choice] {
            Action::SubmitCode => {
                let Some(code) = read_code().await? else {
                    println!("  {} Nothing submitted.", style("i").blue().bold());
                    continue;
                };
                submit(state, &renderer, &mut session, &code).await;
            }
            Action::Feedback => {
                let feedback: String = Input::new()
                    .with_prompt("Feedback")
                    .allow_empty(true)
                    .interact_text()?;

                let pb = spinner("Regenerating audit...");
                let result = controller.submit_feedback(&mut session, &feedback).await;
                pb.finish_and_clear();

                match result {
                    Ok(segment) => renderer.print_audit(&segment),
                    Err(e) => print_audit_error(&e),
                }
            }
            Action::Finalize => match controller.finalize(&mut session) {
                Ok(_) => println!(
                    "  {} Audit finalized ({} in report)",
                    style("✓").green().bold(),
                    session.audit_history.len()
                ),
                Err(e) => print_audit_error(&e),
            },
            Action::ShowReport => {
                renderer.print_report(&controller.render(&session).audit_history);
            }
            Action::Quit => {
                if session.current_audit.is_some()
                    && !Confirm::new()
                        .with_prompt("The current audit is not finalized. Quit anyway?")
                        .default(false)
                        .interact()?
                {
                    continue;
                }
                break;
            }
        }
    }

    let view = controller.render(&session);
    if !view.audit_history.is_empty() {
        renderer.print_report(&view.audit_history);
    }

    tracing::info!(
        finalized = view.audit_history.len(),
        "review session ended"
    );
    Ok(())
}

async fn submit(state: &AppState, renderer: &AuditRenderer, session: &mut SessionState, code: &str) {
    let pb = spinner("Auditing function...");
    let result = state.controller.submit_code(session, code).await;
    pb.finish_and_clear();

    match result {
        Ok(segment) => renderer.print_audit(&segment),
        Err(e) => print_audit_error(&e),
    }
}

/// Ask for code: from `$EDITOR`, or from a file path.
///
/// Returns `None` when the editor was closed without saving or the file
/// could not be read.
async fn read_code() -> Result<Option<String>> {
    let sources = ["Open editor", "Load from file"];
    let source = Select::new()
        .with_prompt("Function source")
        .items(&sources)
        .default(0)
        .interact()?;

    if source == 0 {
        return Ok(Editor::new().extension(".sol").edit("")?);
    }

    let path: String = Input::new().with_prompt("Path").interact_text()?;
    Ok(load_code_file(path.trim()).await)
}

/// Read a code file without blocking the runtime. Read errors are printed
/// and yield `None` so the loop can continue.
async fn load_code_file(path: &str) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(code) => Some(code),
        Err(e) => {
            eprintln!("  {} Failed to read {path}: {e}", style("✗").red().bold());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_code_file_reads_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("withdraw.sol");
        tokio::fs::write(&path, "function withdraw() public {}\n")
            .await
            .unwrap();

        let code = load_code_file(path.to_str().unwrap()).await;
        assert_eq!(code.as_deref(), Some("function withdraw() public {}\n"));
    }

    #[tokio::test]
    async fn test_load_code_file_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.sol");
        assert!(load_code_file(path.to_str().unwrap()).await.is_none());
    }

    #[test]
    fn test_idle_menu_hides_review_actions() {
        let actions = Action::available(SessionPhase::Idle);
        assert!(!actions.contains(&Action::Feedback));
        assert!(!actions.contains(&Action::Finalize));
        assert_eq!(actions.first(), Some(&Action::SubmitCode));
    }

    #[test]
    fn test_reviewing_menu_defaults_to_feedback() {
        let actions = Action::available(SessionPhase::Reviewing);
        assert_eq!(actions.first(), Some(&Action::Feedback));
        assert!(actions.contains(&Action::Finalize));
        assert_eq!(actions.last(), Some(&Action::Quit));
    }
}
