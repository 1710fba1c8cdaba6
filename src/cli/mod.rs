//! CLI module for suggestd
//!
//! Provides command-line interface for:
//! - serve: Load the dataset, start the reload loop and the HTTP server
//! - check: Validate a dataset file and report its size

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{check, run, run_command, serve, ServiceConfig};
pub use errors::{CliError, CliResult};
