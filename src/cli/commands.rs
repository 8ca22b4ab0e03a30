//! CLI command implementations
//!
//! `init` prepares a config file and database; `serve` boots the store and
//! the HTTP server.

use std::path::Path;
use std::sync::Arc;

use crate::http_server::HttpServer;
use crate::observability::{log_event, log_event_with_fields, Event, Logger};
use crate::storage::CatalogStore;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Load an existing config, or write the default one if none exists
fn load_or_create_config(config_path: &Path) -> CliResult<Config> {
    if config_path.exists() {
        return Config::load(config_path);
    }

    let config = Config::write_default(config_path)?;
    let path = config_path.display().to_string();
    log_event_with_fields(Event::ConfigWritten, &[("path", path.as_str())]);
    Ok(config)
}

/// Open the configured store and log what it holds
fn open_store(config: &Config, config_path: &Path) -> CliResult<Arc<dyn CatalogStore>> {
    let store = config.open_store(config_path)?;

    let backend = match config.database_file(config_path) {
        Some(file) => file.display().to_string(),
        None => "memory".to_string(),
    };
    log_event_with_fields(Event::StoreOpened, &[("backend", backend.as_str())]);

    let categories = store.list_categories()?.len().to_string();
    log_event_with_fields(Event::CategoriesSeeded, &[("count", categories.as_str())]);

    Ok(store)
}

/// Prepare a config file and a seeded database.
///
/// Idempotent: an existing config is reused and an existing database only
/// gains the schema objects and seed rows it is missing.
pub fn init(config_path: &Path) -> CliResult<()> {
    log_event(Event::BootStart);

    let config = load_or_create_config(config_path)?;
    Logger::set_min_severity(config.severity()?);

    if config.database_path.is_none() {
        return Err(CliError::config_error(
            "database_path is null; nothing to initialize for an in-memory store",
        ));
    }

    open_store(&config, config_path)?;
    Ok(())
}

/// Serve the catalog API until the process is stopped
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);

    let mut config = Config::load(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
        config.validate()?;
    }
    Logger::set_min_severity(config.severity()?);

    let path = config_path.display().to_string();
    log_event_with_fields(Event::ConfigLoaded, &[("path", path.as_str())]);

    let store = open_store(&config, config_path)?;
    let server = HttpServer::new(config.http.clone(), store);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.start()).map_err(|e| {
        let reason = e.to_string();
        log_event_with_fields(Event::BootFailed, &[("reason", reason.as_str())]);
        CliError::serve_failed(reason)
    })
}
