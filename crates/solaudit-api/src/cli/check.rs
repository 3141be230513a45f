//! `solaudit check`: verify the configured provider is reachable.

use anyhow::Result;
use console::style;

use solaudit_infra::llm::test_provider_connection;

use crate::state::AppState;

pub async fn check_provider(state: &AppState, json: bool) -> Result<()> {
    let provider = state.controller.client().provider();
    let model = &state.config.model.model;

    if !json {
        println!(
            "  {} {}",
            style("Data dir:").bold(),
            style(state.data_dir.display()).dim()
        );
        print!(
            "  Testing connection to {} ({})... ",
            style(provider.name()).cyan(),
            model
        );
        let _ = std::io::Write::flush(&mut std::io::stdout());
    }

    match test_provider_connection(provider, model).await {
        Ok(()) => {
            if json {
                let out = serde_json::json!({
                    "status": "connected",
                    "provider": provider.name(),
                    "model": model,
                    "data_dir": state.data_dir.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", style("connected").green().bold());
            }
            Ok(())
        }
        Err(e) => {
            if json {
                let out = serde_json::json!({
                    "error": "connection_test_failed",
                    "message": e.to_string(),
                    "provider": provider.name(),
                    "model": model,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", style("FAILED").red().bold());
                eprintln!(
                    "  {} Connection test failed: {}",
                    style("!").red().bold(),
                    e
                );
            }
            anyhow::bail!("provider '{}' is not reachable", provider.name())
        }
    }
}
