//! SeaChart CLI - Command-line interface
//!
//! This binary exposes the SeaChart engine for working with offline tile
//! packs and boundary files, and for replaying recorded tracks through the
//! follow logic without a device.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::nearest::NearestArgs;
use commands::replay::ReplayArgs;
use commands::tile::TileArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "seachart")]
#[command(version = seachart::VERSION)]
#[command(about = "Offline marine chart tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one tile from a pack by north-origin (XYZ) address
    Tile {
        /// Tile pack file (.mbtiles)
        pack: PathBuf,

        /// Zoom level
        #[arg(long)]
        zoom: u8,

        /// Tile column
        #[arg(long)]
        col: u32,

        /// Tile row, counted from the north
        #[arg(long)]
        row: u32,

        /// Write the tile to this file instead of printing a summary
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show a tile pack's scheme, layout, zoom range and metadata
    Inspect {
        /// Tile pack file (.mbtiles)
        pack: PathBuf,
    },

    /// Distance from a position to the nearest boundary
    Nearest {
        /// Boundary GeoJSON file
        boundary: PathBuf,

        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Replay a recorded track (secs,lat,lon,speed_kn,course_deg,accuracy_m)
    Replay {
        /// Track CSV file
        track: PathBuf,

        /// Boundary GeoJSON file for distance readouts
        #[arg(long)]
        boundary: Option<PathBuf>,

        /// Tile pack to open during the replay
        #[arg(long)]
        pack: Option<PathBuf>,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let result: Result<(), CliError> = match cli.command {
        Commands::Tile {
            pack,
            zoom,
            col,
            row,
            output,
        } => commands::tile::run(TileArgs {
            pack,
            zoom,
            column: col,
            row,
            output,
        }),
        Commands::Inspect { pack } => commands::inspect::run(pack),
        Commands::Nearest { boundary, lat, lon } => {
            commands::nearest::run(NearestArgs { boundary, lat, lon })
        }
        Commands::Replay {
            track,
            boundary,
            pack,
        } => commands::replay::run(ReplayArgs {
            track,
            boundary,
            pack,
        }),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
