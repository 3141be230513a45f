//! CLI command definitions for the `solaudit` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod audit;
pub mod check;
pub mod render;
pub mod review;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Human-in-the-loop auditing of Solidity functions with an LLM.
#[derive(Parser)]
#[command(name = "solaudit", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of `<data dir>/config.toml`.
    #[arg(long, global = true, env = "SOLAUDIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive review: submit code, refine the audit with feedback,
    /// finalize, and build a report.
    Review {
        /// Start by auditing this file instead of opening the editor.
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Audit a single function once and print the result.
    Audit {
        /// File containing the Solidity function.
        file: PathBuf,
    },

    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to `server.port`).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to `server.host`).
        #[arg(long)]
        host: Option<String>,
    },

    /// Verify the configured provider credentials and endpoint.
    Check,

    /// Generate shell completion scripts.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}
