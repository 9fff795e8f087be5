//! Tile command - fetch a single tile from a pack.

use std::path::PathBuf;

use seachart::tile_store::{RasterFormat, TilePack, TileStore};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the tile command.
pub struct TileArgs {
    pub pack: PathBuf,
    pub zoom: u8,
    pub column: u32,
    /// North-origin (XYZ) row.
    pub row: u32,
    pub output: Option<PathBuf>,
}

/// Run the tile command.
pub fn run(args: TileArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("tile");
    let runtime = runner.runtime()?;

    let tile = runtime.block_on(async {
        let store = TileStore::open(TilePack::from_path(&args.pack)).await?;
        let tile = store.fetch(args.zoom, args.column, args.row).await;
        store.close();
        Ok::<_, CliError>(tile)
    })?;

    let data = tile.ok_or(CliError::TileMissing {
        zoom: args.zoom,
        column: args.column,
        row: args.row,
    })?;

    let format = RasterFormat::sniff(&data)
        .map(|f| f.mime_type())
        .unwrap_or("unknown");

    match args.output {
        Some(path) => {
            std::fs::write(&path, &data).map_err(|e| CliError::FileWrite {
                path: path.display().to_string(),
                error: e,
            })?;
            println!(
                "✓ Saved {} ({} bytes, {})",
                path.display(),
                data.len(),
                format
            );
        }
        None => {
            println!(
                "Tile {}/{}/{}: {} bytes, {}",
                args.zoom,
                args.column,
                args.row,
                data.len(),
                format
            );
        }
    }

    Ok(())
}
