//! CLI command implementations
//!
//! Each command loads configuration, opens the record store, and does one
//! thing. The store handle is created here and passed down; nothing else
//! opens the database.
//!
//! `init` and `import` print exactly one JSON envelope on stdout; their log
//! lines go to stderr.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::http_server::HttpServer;
use crate::importer::BulkImporter;
use crate::observability::Logger;
use crate::storage::RecordStore;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::write_response_to;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    run_command_to(cmd, &mut io::stdout())
}

/// Run a command, writing its response envelope to `out`
pub fn run_command_to<W: Write>(cmd: Command, out: &mut W) -> CliResult<()> {
    match cmd {
        Command::Init { config } => {
            Logger::reserve_stdout();
            write_response_to(out, init(config.as_deref())?)
        }
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Import { config, file } => {
            Logger::reserve_stdout();
            write_response_to(out, import(config.as_deref(), &file)?)
        }
    }
}

fn load_config(config_path: Option<&Path>) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.severity()?);
    Ok(config)
}

fn open_store(config: &Config) -> CliResult<RecordStore> {
    let store = RecordStore::open(config.database_path())?;
    Logger::info("STORE_OPENED", &[("path", config.database_path.as_str())]);
    Ok(store)
}

/// Create the database file and the element table if absent
pub fn init(config_path: Option<&Path>) -> CliResult<Value> {
    let config = load_config(config_path)?;
    let store = open_store(&config)?;

    Ok(json!({
        "initialized": true,
        "database_path": config.database_path,
        "elements": store.count()?,
    }))
}

/// Serve the REST API until interrupted
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
        config.validate()?;
    }

    let store = Arc::new(open_store(&config)?);
    let server = HttpServer::with_config(store, config.http.clone());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Run the bulk importer over a dataset file
pub fn import(config_path: Option<&Path>, file: &Path) -> CliResult<Value> {
    let config = load_config(config_path)?;
    let store = open_store(&config)?;

    let report = BulkImporter::new(&store).import_file(file)?;

    Ok(serde_json::to_value(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_store_creates_database_file() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            database_path: dir.path().join("ecoact.db").display().to_string(),
            ..Default::default()
        };

        let store = open_store(&config).unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(dir.path().join("ecoact.db").exists());
    }

    #[test]
    fn test_import_command_inserts_rows() {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("ecoact.db");
        let config_path = dir.path().join("ecoact.json");
        let dataset = dir.path().join("rows.jsonl");

        std::fs::write(
            &config_path,
            json!({"database_path": db.display().to_string()}).to_string(),
        )
        .unwrap();
        std::fs::write(&dataset, "{\"CO2f\": 1.5}\n{\"Source\": \"ADEME\"}\n").unwrap();

        let report = import(Some(config_path.as_path()), &dataset).unwrap();
        assert_eq!(report["inserted"], 2);

        let store = RecordStore::open(&db).unwrap();
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_import_output_is_single_envelope() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("ecoact.json");
        let dataset = dir.path().join("rows.jsonl");

        std::fs::write(
            &config_path,
            json!({"database_path": dir.path().join("ecoact.db").display().to_string()})
                .to_string(),
        )
        .unwrap();
        std::fs::write(&dataset, "{\"CO2f\": 1.5}\n{\"CO2f\": 2.5}\n").unwrap();

        let mut out = Vec::new();
        let command = Command::Import {
            config: Some(config_path),
            file: dataset,
        };
        run_command_to(command, &mut out).unwrap();

        assert!(Logger::stdout_reserved());
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1);

        let envelope: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(envelope["status"], "ok");
        assert_eq!(envelope["data"]["rows_read"], 2);
        assert_eq!(envelope["data"]["first_id"], 1);
    }
}
