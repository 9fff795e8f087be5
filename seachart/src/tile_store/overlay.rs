//! Tile overlay registration handed to the host map.

use std::sync::Arc;

use bytes::Bytes;

use super::store::TileStore;

/// A raster layer backed by one [`TileStore`], limited to its zoom range.
#[derive(Debug, Clone)]
pub struct TileOverlay {
    pub pack_id: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
    store: Arc<TileStore>,
}

impl TileOverlay {
    /// Build an overlay spanning the store's known zoom range.
    pub fn new(store: Arc<TileStore>) -> Self {
        let (min_zoom, max_zoom) = store.info().overlay_zoom_bounds();
        Self {
            pack_id: store.pack().id.clone(),
            min_zoom,
            max_zoom,
            store,
        }
    }

    pub fn covers_zoom(&self, zoom: u8) -> bool {
        (self.min_zoom..=self.max_zoom).contains(&zoom)
    }

    /// Byte-fetch callback for the host: XYZ address in, raster bytes out.
    ///
    /// Zoom levels outside the overlay bounds resolve to `None` without a read.
    pub async fn load_tile(&self, zoom: u8, column: u32, row: u32) -> Option<Bytes> {
        if !self.covers_zoom(zoom) {
            return None;
        }
        self.store.fetch(zoom, column, row).await
    }

    pub fn store(&self) -> &Arc<TileStore> {
        &self.store
    }
}
