//! # errstat - command-line entry point
//!
//! Loads configuration, initializes tracing, dispatches one subcommand and
//! prints its output.
//!
//! ## Error Handling
//!
//! Every step returns `anyhow::Result` with context; a failure halts with a
//! clear message and a non-zero exit code.

#![forbid(unsafe_code)]
#![forbid(clippy::unwrap_used)]
#![forbid(clippy::panic)]
#![deny(clippy::expect_used)]

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use errstat::cli::Cli;
use errstat::commands::execute_command;
use errstat::config::CliConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref(), Path::new("."))
        .context("Failed to load configuration")?;

    init_tracing(&config.log_level);
    debug!(?config, "Configuration loaded");

    let format = cli.format.unwrap_or(config.format);
    let output = execute_command(cli.command, format)?;
    println!("{output}");

    Ok(())
}

/// Initialize tracing subscriber, preferring `RUST_LOG` over the configured level.
fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
