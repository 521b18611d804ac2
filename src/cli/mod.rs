//! CLI module for opmanifest
//!
//! Provides command-line interface for:
//! - client extract: write the operation manifest for a client project

mod args;
mod commands;
mod config;
mod errors;

pub use args::{ClientCommand, Cli, Command, ExtractArgs};
pub use commands::{extract, run, run_command};
pub use config::{Config, DEFAULT_CONFIG_FILE};
pub use errors::{CliError, CliErrorCode, CliResult};
