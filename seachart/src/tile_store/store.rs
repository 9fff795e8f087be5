//! Async handle over one open tile pack.

use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use tokio::sync::{mpsc, oneshot};
use tracing::info;

use super::error::TileStoreError;
use super::pack::{PackInfo, TilePack};
use super::worker::{self, ReadRequest};
use crate::coord::TileAddress;

/// Serves validated raster tiles out of one pack.
///
/// Reads are funneled through a single reader thread in FIFO order, so
/// `fetch` never blocks the calling task. Once closed, every fetch resolves
/// to `None` immediately.
pub struct TileStore {
    pack: TilePack,
    info: PackInfo,
    requests: mpsc::UnboundedSender<ReadRequest>,
    closed: AtomicBool,
}

impl TileStore {
    /// Open a pack, detecting its row scheme and table layout.
    ///
    /// # Errors
    ///
    /// `NotFound` when the file is missing, `Corrupt` when it cannot be read
    /// as a tile container.
    pub async fn open(pack: TilePack) -> Result<Self, TileStoreError> {
        let (requests, ready) = worker::spawn(&pack.id, pack.path.clone())?;

        let info = match ready.await {
            Ok(result) => result,
            Err(_) => Err(TileStoreError::Worker {
                path: pack.path.clone(),
                source: std::io::Error::other("tile reader exited during open"),
            }),
        };

        let info = info?;

        info!(
            pack = %pack.id,
            scheme = %info.scheme,
            layout = %info.layout,
            zoom = ?info.zoom_range,
            "Tile pack opened"
        );

        Ok(Self {
            pack,
            info,
            requests,
            closed: AtomicBool::new(false),
        })
    }

    pub fn pack(&self) -> &TilePack {
        &self.pack
    }

    pub fn info(&self) -> &PackInfo {
        &self.info
    }

    /// Fetch the tile at a north-origin (XYZ) address, as map widgets request it.
    ///
    /// Returns `None` when the pack has no valid raster for the tile.
    pub async fn fetch(&self, zoom: u8, column: u32, row: u32) -> Option<Bytes> {
        self.fetch_address(TileAddress::xyz(zoom, column, row)).await
    }

    /// Fetch a tile addressed in either scheme.
    pub async fn fetch_address(&self, address: TileAddress) -> Option<Bytes> {
        if self.is_closed() {
            return None;
        }
        let (reply, response) = oneshot::channel();
        self.requests
            .send(ReadRequest::Fetch { address, reply })
            .ok()?;
        response.await.ok().flatten()
    }

    /// Stop the reader. In-flight reads finish; later fetches return `None`.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            let _ = self.requests.send(ReadRequest::Close);
            info!(pack = %self.pack.id, "Tile pack closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl Drop for TileStore {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for TileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileStore")
            .field("pack", &self.pack)
            .field("info", &self.info)
            .field("closed", &self.is_closed())
            .finish()
    }
}
