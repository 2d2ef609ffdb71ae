//! CLI argument definitions using clap
//!
//! Commands:
//! - ecoact init [--config <path>]
//! - ecoact serve [--config <path>] [--port <port>]
//! - ecoact import [--config <path>] <file>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ecoact - emission-factor records over HTTP, with a spreadsheet importer
#[derive(Parser, Debug)]
#[command(name = "ecoact")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database and the element table
    Init {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Serve the element REST API
    Serve {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port override
        #[arg(long)]
        port: Option<u16>,
    },

    /// Load a spreadsheet export (.csv, .json array or .jsonl rows) into the table
    Import {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Dataset file
        file: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["ecoact", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert!(config.is_none());
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_import_requires_file() {
        assert!(Cli::try_parse_from(["ecoact", "import"]).is_err());

        let cli = Cli::try_parse_from(["ecoact", "import", "--config", "c.json", "rows.jsonl"])
            .unwrap();
        match cli.command {
            Command::Import { config, file } => {
                assert_eq!(config, Some(PathBuf::from("c.json")));
                assert_eq!(file, PathBuf::from("rows.jsonl"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
