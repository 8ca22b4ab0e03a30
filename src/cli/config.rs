//! Configuration file
//!
//! ```json
//! {
//!   "database_path": "./library.db",
//!   "log_level": "info",
//!   "host": "0.0.0.0",
//!   "port": 5080,
//!   "cors_origins": []
//! }
//! ```
//!
//! Every field is optional. `"database_path": null` selects the in-memory
//! store. A relative database path is resolved against the directory that
//! holds the config file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::observability::Severity;
use crate::storage::{CatalogStore, MemoryStore, SqliteStore};

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file; `None` keeps everything in memory
    #[serde(default = "default_database_path")]
    pub database_path: Option<String>,

    /// Minimum log severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Listener and CORS settings
    #[serde(flatten)]
    pub http: HttpServerConfig,
}

fn default_database_path() -> Option<String> {
    Some("./library.db".to_string())
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            log_level: default_log_level(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Write the default configuration to `path`.
    ///
    /// Fails if the file already exists.
    pub fn write_default(path: &Path) -> CliResult<Self> {
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| {
                CliError::config_error(format!("Failed to create config {}: {}", path.display(), e))
            })?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;

        Ok(config)
    }

    /// Validate field values
    pub fn validate(&self) -> CliResult<()> {
        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }

        if self.http.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        let invalid = self.http.invalid_origins();
        if !invalid.is_empty() {
            return Err(CliError::config_error(format!(
                "cors_origins must be http(s)://host[:port] entries; invalid: {}",
                invalid.join(", ")
            )));
        }

        if let Some(path) = &self.database_path {
            if path.trim().is_empty() {
                return Err(CliError::config_error(
                    "database_path must not be empty (use null for in-memory)",
                ));
            }
        }

        self.severity()?;

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid log_level: {}", e)))
    }

    /// Database file location, resolved against the config file's directory
    pub fn database_file(&self, config_path: &Path) -> Option<PathBuf> {
        let raw = Path::new(self.database_path.as_ref()?);
        if raw.is_absolute() {
            return Some(raw.to_path_buf());
        }

        let base = config_path.parent().unwrap_or_else(|| Path::new("."));
        Some(base.join(raw))
    }

    /// Open the configured store, applying schema and seed rows
    pub fn open_store(&self, config_path: &Path) -> CliResult<Arc<dyn CatalogStore>> {
        match self.database_file(config_path) {
            Some(file) => Ok(Arc::new(SqliteStore::open(&file)?)),
            None => Ok(Arc::new(MemoryStore::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_null_database_path_means_memory() {
        let config: Config = serde_json::from_str(r#"{"database_path": null}"#).unwrap();
        assert!(config.database_path.is_none());
        assert!(config.database_file(Path::new("/etc/library.json")).is_none());
    }

    #[test]
    fn test_flattened_http_fields() {
        let config: Config =
            serde_json::from_str(r#"{"port": 9001, "cors_origins": ["http://a.test"]}"#).unwrap();
        assert_eq!(config.http.port, 9001);
        assert_eq!(config.http.cors_origins, vec!["http://a.test".to_string()]);
    }

    #[test]
    fn test_zero_port_rejected() {
        let config: Config = serde_json::from_str(r#"{"port": 0}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_cors_origin_rejected() {
        let config: Config = serde_json::from_str(
            r#"{"cors_origins": ["http://localhost:5173", "localhost:3000"]}"#,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.message().contains("localhost:3000"));
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let config: Config = serde_json::from_str(r#"{"log_level": "chatty"}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_relative_database_resolved_against_config_dir() {
        let config = Config::default();
        let file = config
            .database_file(Path::new("/srv/catalog/library.json"))
            .unwrap();
        assert_eq!(file, PathBuf::from("/srv/catalog/./library.db"));
    }

    #[test]
    fn test_write_default_refuses_overwrite() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("library.json");

        let written = Config::write_default(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), written);
        assert!(Config::write_default(&path).is_err());
    }
}
