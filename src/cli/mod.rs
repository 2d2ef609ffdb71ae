//! CLI module
//!
//! Provides command-line interface for:
//! - init: Create the database and table
//! - serve: Run the REST API
//! - import: Load a spreadsheet export into the table

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{import, init, run, run_command, run_command_to, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response_to;
