//! CLI command definitions using clap.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use errstat_core::{ErrorCategory, ErrorCode};

use crate::config::OutputFormat;

/// errstat - inspect error codes and render statuses
#[derive(Parser, Debug)]
#[command(name = "errstat")]
#[command(version)]
#[command(about = "Inspect the errstat error code registry and render status values")]
pub struct Cli {
    /// Configuration file (TOML, or JSON by extension)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format, overriding the configured one
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every error code
    List {
        /// Only show codes in this category (logic, runtime, invalid_argument, ...)
        #[arg(long)]
        category: Option<ErrorCategory>,
    },

    /// Resolve one code by name or numeric value
    Lookup {
        /// Code name (e.g. FileNotFound) or value (e.g. 1202)
        #[arg(allow_negative_numbers = true)]
        query: String,
    },

    /// Build a status and print it
    Render {
        /// Code name
        #[arg(long)]
        code: ErrorCode,

        /// Reason text
        #[arg(short, long, default_value = "")]
        reason: String,
    },
}
