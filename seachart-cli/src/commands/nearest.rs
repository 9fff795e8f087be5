//! Nearest command - distance from a position to the closest boundary.

use std::path::PathBuf;

use seachart::boundary::BoundaryLocator;
use seachart::coord::GeoPoint;
use seachart::render::{format_coordinate, format_distance};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the nearest command.
pub struct NearestArgs {
    pub boundary: PathBuf,
    pub lat: f64,
    pub lon: f64,
}

/// Run the nearest command.
pub fn run(args: NearestArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("nearest");

    if !(-90.0..=90.0).contains(&args.lat) || !(-180.0..=180.0).contains(&args.lon) {
        return Err(CliError::Config(format!(
            "Position {}, {} is out of range",
            args.lat, args.lon
        )));
    }

    let locator = BoundaryLocator::load(&args.boundary)?;
    let position = GeoPoint::new(args.lat, args.lon);

    println!("Position: {}", format_coordinate(position));
    println!("Boundaries loaded: {}", locator.len());

    match locator.nearest(position) {
        Some(nearest) => {
            println!(
                "Nearest:  {} (polyline {})",
                format_distance(Some(nearest.distance_m)),
                nearest.polyline_index
            );
            println!("  at {}", format_coordinate(nearest.point));
        }
        None => println!("Nearest:  {}", format_distance(None)),
    }

    Ok(())
}
