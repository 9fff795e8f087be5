//! Offline raster tiles from packaged SQLite containers.
//!
//! A pack is an MBTiles-style database with either a direct `tiles` table
//! carrying the blob, or an addressing table joined through `tile_id` to an
//! `images` table. Row numbering may be TMS (south origin, the default) or
//! XYZ (north origin, declared as `scheme = xyz` in `metadata`).
//!
//! Declared schemes are often wrong, so every fetch tries the declared row
//! and then its complement `(2^zoom - 1) - row`, returning the first payload
//! that carries a PNG or JPEG signature.
//!
//! # Example
//!
//! ```ignore
//! use seachart::tile_store::{TilePack, TileStore};
//!
//! let store = TileStore::open(TilePack::from_path("/charts/bay.mbtiles")).await?;
//! if let Some(png) = store.fetch(10, 5, 3).await {
//!     // hand bytes to the map widget
//! }
//! ```

mod error;
mod inspect;
mod overlay;
mod pack;
mod store;
mod validate;
mod worker;

pub use error::TileStoreError;
pub use overlay::TileOverlay;
pub use pack::{PackBounds, PackInfo, TileLayout, TilePack, PACK_EXTENSION};
pub use store::TileStore;
pub use validate::{is_valid_raster, RasterFormat};
