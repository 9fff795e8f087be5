//! seachart - Offline marine chart engine
//!
//! This library holds the on-device map engine of a small-boat chart viewer:
//! offline raster tiles served from packaged SQLite files, GPS-driven camera
//! following that never fights the user, nearest-boundary distance, and a
//! reconciled set of fading map annotations.
//!
//! # High-Level API
//!
//! The [`render`] module ties the components together behind one event loop:
//!
//! ```ignore
//! use seachart::boundary::BoundaryLocator;
//! use seachart::render::{CoordinatorConfig, HeadlessMap, MapEvent, RenderCoordinator};
//! use seachart::time::EventTime;
//!
//! let boundary = BoundaryLocator::load("boundaries.geojson")?;
//! let mut coordinator =
//!     RenderCoordinator::new(HeadlessMap::default(), boundary, CoordinatorConfig::default());
//! coordinator.handle(MapEvent::Fix(fix), EventTime::now()).await;
//! ```

pub mod annotation;
pub mod boundary;
pub mod config;
pub mod coord;
pub mod follow;
pub mod logging;
pub mod render;
pub mod tile_store;
pub mod time;

/// Version of the seachart library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
