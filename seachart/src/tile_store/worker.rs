//! Dedicated reader thread for one tile pack.
//!
//! The SQLite connection lives on its own OS thread and is never touched by
//! async code. Requests arrive over an unbounded channel and are served in
//! arrival order, one at a time.

use std::path::PathBuf;
use std::thread;

use bytes::Bytes;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace};

use super::error::TileStoreError;
use super::inspect::{inspect, open_connection};
use super::pack::PackInfo;
use super::validate::is_valid_raster;
use crate::coord::TileAddress;

/// Work item for the reader thread.
pub(super) enum ReadRequest {
    /// Read one tile; `None` is sent back when neither row holds a raster.
    Fetch {
        address: TileAddress,
        reply: oneshot::Sender<Option<Bytes>>,
    },
    /// Stop serving and release the connection.
    Close,
}

/// Spawn the reader thread for the container at `path`.
///
/// The thread opens and inspects the container before it starts serving; the
/// outcome is delivered through the returned receiver.
pub(super) fn spawn(
    name: &str,
    path: PathBuf,
) -> Result<
    (
        mpsc::UnboundedSender<ReadRequest>,
        oneshot::Receiver<Result<PackInfo, TileStoreError>>,
    ),
    TileStoreError,
> {
    let (request_tx, request_rx) = mpsc::unbounded_channel();
    let (ready_tx, ready_rx) = oneshot::channel();

    let thread_path = path.clone();
    thread::Builder::new()
        .name(format!("tile-reader-{name}"))
        .spawn(move || run(thread_path, request_rx, ready_tx))
        .map_err(|source| TileStoreError::Worker { path, source })?;

    Ok((request_tx, ready_rx))
}

/// Thread body: open, report, then serve until closed.
fn run(
    path: PathBuf,
    mut requests: mpsc::UnboundedReceiver<ReadRequest>,
    ready: oneshot::Sender<Result<PackInfo, TileStoreError>>,
) {
    let opened = open_connection(&path).and_then(|conn| {
        let info = inspect(&conn, &path)?;
        Ok((conn, info))
    });

    let (conn, info) = match opened {
        Ok((conn, info)) => {
            let _ = ready.send(Ok(info.clone()));
            (conn, info)
        }
        Err(e) => {
            let _ = ready.send(Err(e));
            return;
        }
    };

    let sql = info.layout.lookup_sql();

    while let Some(request) = requests.blocking_recv() {
        match request {
            ReadRequest::Fetch { address, reply } => {
                let tile = read_tile(&conn, &sql, &info, address);
                // Receiver may have given up; nothing to do about it.
                let _ = reply.send(tile);
            }
            ReadRequest::Close => break,
        }
    }

    debug!(path = %path.display(), "Tile reader stopped");
}

/// Rows to try for `address`: the declared-scheme row first, then its complement.
pub(super) fn candidate_rows(address: TileAddress, info: &PackInfo) -> Vec<u32> {
    let declared = address.in_scheme(info.scheme);
    let complement = declared.flipped_row();
    if complement == declared.row {
        vec![declared.row]
    } else {
        vec![declared.row, complement]
    }
}

fn read_tile(conn: &Connection, sql: &str, info: &PackInfo, address: TileAddress) -> Option<Bytes> {
    for row in candidate_rows(address, info) {
        match query_blob(conn, sql, address.zoom, address.column, row) {
            Ok(Some(data)) if is_valid_raster(&data) => return Some(Bytes::from(data)),
            Ok(Some(data)) => {
                trace!(tile = %address, row, len = data.len(), "Skipping non-raster payload");
            }
            Ok(None) => trace!(tile = %address, row, "No row"),
            Err(e) => debug!(tile = %address, row, error = %e, "Tile query failed"),
        }
    }
    None
}

fn query_blob(
    conn: &Connection,
    sql: &str,
    zoom: u8,
    column: u32,
    row: u32,
) -> rusqlite::Result<Option<Vec<u8>>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let value = stmt
        .query_row(params![zoom, column, row], |r| {
            Ok(match r.get_ref(0)? {
                ValueRef::Blob(b) | ValueRef::Text(b) => Some(b.to_vec()),
                _ => None,
            })
        })
        .optional()?;
    Ok(value.flatten())
}
