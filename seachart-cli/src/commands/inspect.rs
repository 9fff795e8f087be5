//! Inspect command - show what a tile pack declares and contains.

use std::path::PathBuf;

use seachart::tile_store::{TilePack, TileStore};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the inspect command.
pub fn run(pack: PathBuf) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("inspect");
    let runtime = runner.runtime()?;

    let pack = TilePack::from_path(&pack);
    let store = runtime.block_on(TileStore::open(pack.clone()))?;
    let info = store.info();

    println!("Tile Pack: {}", pack.id);
    println!("  File:    {}", pack.path.display());
    println!("  Name:    {}", info.name.as_deref().unwrap_or("(not set)"));
    println!("  Format:  {}", info.format.as_deref().unwrap_or("(not set)"));
    println!("  Scheme:  {}", info.scheme);
    println!("  Layout:  {}", info.layout);
    match info.zoom_range {
        Some((min, max)) => println!("  Zoom:    {}-{}", min, max),
        None => println!("  Zoom:    (no tiles)"),
    }
    match info.bounds {
        Some(bounds) => println!(
            "  Bounds:  {:.4},{:.4} to {:.4},{:.4}",
            bounds.south_west.latitude,
            bounds.south_west.longitude,
            bounds.north_east.latitude,
            bounds.north_east.longitude
        ),
        None => println!("  Bounds:  (not set)"),
    }

    store.close();
    Ok(())
}
