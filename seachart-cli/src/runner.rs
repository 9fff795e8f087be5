//! CLI runner for common setup and operations.
//!
//! Encapsulates configuration loading, logging initialization and the async
//! runtime so command handlers stay focused on their own work.

use tokio::runtime::Runtime;
use tracing::info;

use seachart::config::ConfigFile;
use seachart::logging::{init_logging, LoggingGuard};

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    pub fn new() -> Result<Self, CliError> {
        // Load config file (or use defaults if not present)
        let config = ConfigFile::load()?;

        let logging_guard = init_logging(&config.logging.directory, &config.logging.file)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("SeaChart v{}", seachart::VERSION);
        info!(
            log_file = %self.logging_guard.path().display(),
            "SeaChart CLI: {} command", command
        );
    }

    /// Build the multi-threaded runtime used by async commands.
    pub fn runtime(&self) -> Result<Runtime, CliError> {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(CliError::Runtime)
    }
}
