//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use seachart::boundary::BoundaryError;
use seachart::config::ConfigFileError;
use seachart::tile_store::TileStoreError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Tile pack could not be opened
    TilePack(TileStoreError),
    /// Requested tile is not in the pack
    TileMissing { zoom: u8, column: u32, row: u32 },
    /// Boundary file could not be loaded
    Boundary(BoundaryError),
    /// Failed to read an input file
    FileRead { path: String, error: std::io::Error },
    /// Failed to write an output file
    FileWrite { path: String, error: std::io::Error },
    /// Malformed track line
    Track { line: usize, message: String },
    /// Failed to start the async runtime
    Runtime(std::io::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::TilePack(TileStoreError::Corrupt { .. }) => {
                eprintln!();
                eprintln!("The file is not a readable tile pack. It may be truncated;");
                eprintln!("try downloading it again.");
            }
            CliError::Track { .. } => {
                eprintln!();
                eprintln!("Track lines are: secs,lat,lon,speed_kn,course_deg,accuracy_m");
                eprintln!("Empty speed or course fields mean unavailable.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::TilePack(e) => write!(f, "{}", e),
            CliError::TileMissing { zoom, column, row } => {
                write!(f, "No tile at zoom {} column {} row {}", zoom, column, row)
            }
            CliError::Boundary(e) => write!(f, "{}", e),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read file '{}': {}", path, error)
            }
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
            CliError::Track { line, message } => {
                write!(f, "Invalid track line {}: {}", line, message)
            }
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::TilePack(e) => Some(e),
            CliError::Boundary(e) => Some(e),
            CliError::FileRead { error, .. } => Some(error),
            CliError::FileWrite { error, .. } => Some(error),
            CliError::Runtime(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<TileStoreError> for CliError {
    fn from(e: TileStoreError) -> Self {
        CliError::TilePack(e)
    }
}

impl From<BoundaryError> for CliError {
    fn from(e: BoundaryError) -> Self {
        CliError::Boundary(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_missing_message() {
        let err = CliError::TileMissing {
            zoom: 10,
            column: 5,
            row: 3,
        };
        assert_eq!(err.to_string(), "No tile at zoom 10 column 5 row 3");
    }

    #[test]
    fn test_track_error_message() {
        let err = CliError::Track {
            line: 4,
            message: "expected 6 fields".into(),
        };
        assert_eq!(err.to_string(), "Invalid track line 4: expected 6 fields");
    }
}
