#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # errstat
//!
//! Command-line front end for the errstat status library.
//!
//! This library re-exports `errstat_core` and exposes the CLI pieces so they
//! can be tested without spawning the binary.

pub use errstat_core;

pub mod cli;
pub mod commands;
pub mod config;
