//! Configuration management CLI commands.
//!
//! Provides `config path`, `config show` and `config init` for locating,
//! viewing and creating `~/.seachart/config.ini`.

use clap::Subcommand;
use seachart::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Print the effective configuration (file values over defaults)
    Show,

    /// Write a default configuration file if none exists
    Init,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Init => run_init(),
    }
}

fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

fn run_show() -> Result<(), CliError> {
    let path = config_file_path();
    let config = ConfigFile::load_from(&path)?;

    if !path.exists() {
        println!("# {} does not exist; showing defaults", path.display());
    }
    print!("{}", config.to_ini_string());

    Ok(())
}

fn run_init() -> Result<(), CliError> {
    let path = config_file_path();
    if ConfigFile::ensure_exists_at(&path)? {
        println!("✓ Created {}", path.display());
    } else {
        println!("Configuration already exists: {}", path.display());
    }
    Ok(())
}
