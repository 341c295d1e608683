//! scour: content search from the command line.
//!
//! Builds and queries named content indexes, translating search arguments the same way the
//! GraphQL `search` field does.

mod cli;

use std::{io, process::ExitCode};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{
    CommandContext,
    args::{Cli, Commands},
    commands,
};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "SCOUR_LOG";

/// Runs the CLI and returns its exit code.
fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    let ctx = match &cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}

/// Installs the stderr log subscriber, filtered by `SCOUR_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
