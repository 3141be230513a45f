mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,solaudit=debug",
        _ => "trace",
    };

    solaudit_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Completions need no config or credentials.
    let command = match cli.command {
        Commands::Completions { shell } => {
            print_completions(shell);
            return Ok(());
        }
        command => command,
    };

    let state = AppState::init(cli.config.as_deref()).await?;

    let result = run(command, cli.json, cli.quiet, state).await;
    solaudit_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(command: Commands, json: bool, quiet: bool, state: AppState) -> anyhow::Result<()> {
    match command {
        Commands::Review { file } => {
            cli::review::run_review(&state, file.as_deref()).await?;
        }

        Commands::Audit { file } => {
            cli::audit::audit_file(&state, &file, json, quiet).await?;
        }

        Commands::Check => {
            cli::check::check_provider(&state, json).await?;
        }

        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} solaudit API listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            spawn_session_sweeper(&state);
            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Completions { shell } => print_completions(shell),
    }

    Ok(())
}

fn print_completions(shell: clap_complete::Shell) {
    let mut cmd = <Cli as clap::CommandFactory>::command();
    generate(shell, &mut cmd, "solaudit", &mut std::io::stdout());
}

/// Periodically drop idle review sessions while the server runs.
fn spawn_session_sweeper(state: &AppState) {
    let max_idle = std::time::Duration::from_secs(state.config.server.session_idle_secs);
    if max_idle.is_zero() {
        return;
    }

    let state = state.clone();
    let period = max_idle.min(std::time::Duration::from_secs(60));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            state.sweep_idle_sessions(max_idle);
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
