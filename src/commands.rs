//! CLI command handlers.
//!
//! Every handler is a pure function returning the text to print, so the
//! dispatcher in `main` stays the only place that writes to stdout.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use anyhow::{Context, Result};
use errstat_core::{Error, ErrorCategory, ErrorCode, Status};
use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::Commands;
use crate::config::OutputFormat;

/// One registry entry as printed by `list` and `lookup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeInfo {
    pub value: i32,
    pub name: &'static str,
    pub categories: Vec<ErrorCategory>,
}

impl From<ErrorCode> for CodeInfo {
    fn from(code: ErrorCode) -> Self {
        Self {
            value: code.value(),
            name: code.as_str(),
            categories: code.categories().iter().collect(),
        }
    }
}

impl CodeInfo {
    fn to_line(&self) -> String {
        let categories = if self.categories.is_empty() {
            "-".to_string()
        } else {
            self.categories.iter().join(", ")
        };
        format!("{:>6}  {:<22} {}", self.value, self.name, categories)
    }
}

/// Execute a CLI command.
///
/// This is the main command dispatcher that routes to the appropriate handler.
///
/// # Errors
///
/// Returns an error if a lookup fails or the output cannot be serialized.
pub fn execute_command(command: Commands, format: OutputFormat) -> Result<String> {
    match command {
        Commands::List { category } => cmd_list(category, format),
        Commands::Lookup { query } => cmd_lookup(&query, format),
        Commands::Render { code, reason } => cmd_render(code, &reason, format),
    }
}

/// List registry codes, optionally restricted to one category.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn cmd_list(category: Option<ErrorCategory>, format: OutputFormat) -> Result<String> {
    let entries: Vec<CodeInfo> = ErrorCode::ALL
        .iter()
        .copied()
        .filter(|code| category.is_none_or(|c| code.is_a(c)))
        .map(CodeInfo::from)
        .collect();

    info!(count = entries.len(), "Listing error codes");

    match format {
        OutputFormat::Text => Ok(entries.iter().map(CodeInfo::to_line).join("\n")),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&entries).context("Failed to serialize code list")
        }
    }
}

/// Resolve a code by numeric value or name.
///
/// # Errors
///
/// Returns an error if no code matches `query`.
pub fn cmd_lookup(query: &str, format: OutputFormat) -> Result<String> {
    let code = resolve_code(query)?;
    debug!(%code, "Resolved error code");

    let entry = CodeInfo::from(code);
    match format {
        OutputFormat::Text => Ok(entry.to_line()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&entry).context("Failed to serialize code")
        }
    }
}

/// Build a status from `code` and `reason` and render it.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn cmd_render(code: ErrorCode, reason: &str, format: OutputFormat) -> Result<String> {
    let status = Status::new(code, reason);

    match format {
        OutputFormat::Text => Ok(status.to_string()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&status).context("Failed to serialize status")
        }
    }
}

/// Parse `query` as a numeric value first, then as a name.
///
/// # Errors
///
/// Returns [`Error::InvalidCodeValue`] or [`Error::UnknownCode`].
pub fn resolve_code(query: &str) -> std::result::Result<ErrorCode, Error> {
    let query = query.trim();
    match query.parse::<i32>() {
        Ok(value) => ErrorCode::from_value(value).ok_or(Error::invalid_code_value(value)),
        Err(_) => query.parse(),
    }
}
