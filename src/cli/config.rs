//! Configuration file and environment overrides
//!
//! ```json
//! {
//!   "database_path": "./ecoact.db",
//!   "host": "0.0.0.0",
//!   "port": 5000,
//!   "cors_origins": [],
//!   "log_level": "info"
//! }
//! ```
//!
//! Every key is optional. Without `--config`, `./ecoact.json` is read when it
//! exists. `ECOACT_DATABASE_PATH`, `ECOACT_HOST` and
//! `ECOACT_PORT` override the file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::observability::Severity;

use super::errors::{CliError, CliResult};

pub const DEFAULT_CONFIG_PATH: &str = "./ecoact.json";

pub const ENV_DATABASE_PATH: &str = "ECOACT_DATABASE_PATH";
pub const ENV_HOST: &str = "ECOACT_HOST";
pub const ENV_PORT: &str = "ECOACT_PORT";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file (default "./ecoact.db")
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// HTTP bind address and CORS settings
    #[serde(flatten)]
    pub http: HttpServerConfig,

    /// Lowest log severity emitted (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_database_path() -> String {
    "./ecoact.db".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            http: HttpServerConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from an optional file, then apply process
    /// environment overrides and validate.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration file without overrides
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Apply overrides from a variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DATABASE_PATH) {
            self.database_path = path;
        }
        if let Some(host) = lookup(ENV_HOST) {
            self.http.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.http.port = port.trim().parse().map_err(|_| {
                CliError::config_error(format!("Invalid {}: '{}'", ENV_PORT, port))
            })?;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.database_path.trim().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }
        if self.http.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }
        self.severity()?;
        Ok(())
    }

    /// Parsed log level
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e| CliError::config_error(format!("Invalid log_level: {}", e)))
    }

    /// Get database path as Path
    pub fn database_path(&self) -> &Path {
        Path::new(&self.database_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.http.port, 5000);
        assert_eq!(config.database_path, "./ecoact.db");
    }

    #[test]
    fn test_flat_http_keys() {
        let config: Config =
            serde_json::from_str(r#"{"port": 8080, "cors_origins": ["http://a"], "log_level": "warn"}"#)
                .unwrap();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.cors_origins, vec!["http://a".to_string()]);
        assert_eq!(config.severity().unwrap(), Severity::Warn);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [(ENV_DATABASE_PATH, "/tmp/x.db"), (ENV_PORT, "7000")]
            .into_iter()
            .collect();
        let mut config = Config::default();
        config
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.database_path, "/tmp/x.db");
        assert_eq!(config.http.port, 7000);
        assert_eq!(config.http.host, "0.0.0.0");
    }

    #[test]
    fn test_bad_port_override() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|k| (k == ENV_PORT).then(|| "eighty".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_PORT));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.http.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = Config::from_file(Path::new("/nonexistent/ecoact.json")).unwrap_err();
        assert!(err.message().contains("Failed to read config"));
    }
}
