//! `solaudit audit <FILE>`: one-shot audit without the review loop.

use std::path::Path;

use anyhow::{Context, Result};

use solaudit_types::session::SessionState;

use super::render::{AuditRenderer, spinner};
use crate::state::AppState;

pub async fn audit_file(state: &AppState, path: &Path, json: bool, quiet: bool) -> Result<()> {
    let code = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut session = SessionState::default();

    let pb = (!json && !quiet).then(|| spinner("Auditing function..."));
    let result = state.controller.submit_code(&mut session, &code).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let segment = result.with_context(|| format!("Audit of {} failed", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&segment)?);
    } else {
        AuditRenderer::new().print_audit(&segment);
    }

    Ok(())
}
