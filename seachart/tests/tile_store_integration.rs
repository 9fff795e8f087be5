//! Integration tests for tile pack access.
//!
//! These tests build real SQLite containers in temporary directories and
//! verify the read path end to end:
//! - Declared scheme row first, complementary row as fallback
//! - Magic-byte validation of payloads
//! - Direct and indirect table layouts
//! - Open failures and close behavior
//!
//! Run with: `cargo test --test tile_store_integration`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::{params, Connection};
use tempfile::TempDir;

use seachart::coord::TileScheme;
use seachart::tile_store::{TileLayout, TileOverlay, TilePack, TileStore, TileStoreError};

// ============================================================================
// Test Helpers
// ============================================================================

const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// A fake PNG whose body identifies it.
fn png(tag: &str) -> Vec<u8> {
    let mut bytes = PNG_HEADER.to_vec();
    bytes.extend_from_slice(tag.as_bytes());
    bytes
}

fn jpeg(tag: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.extend_from_slice(tag.as_bytes());
    bytes
}

/// Build a direct-layout pack with optional `scheme` metadata.
fn direct_pack(
    dir: &TempDir,
    name: &str,
    scheme: Option<&str>,
    tiles: &[(u8, u32, u32, Vec<u8>)],
) -> PathBuf {
    let path = dir.path().join(format!("{name}.mbtiles"));
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE metadata (name TEXT, value TEXT);
         CREATE TABLE tiles (zoom_level INTEGER, tile_column INTEGER,
             tile_row INTEGER, tile_data BLOB);",
    )
    .unwrap();
    if let Some(scheme) = scheme {
        conn.execute(
            "INSERT INTO metadata (name, value) VALUES ('scheme', ?1)",
            params![scheme],
        )
        .unwrap();
    }
    for (z, x, y, data) in tiles {
        conn.execute(
            "INSERT INTO tiles VALUES (?1, ?2, ?3, ?4)",
            params![z, x, y, data],
        )
        .unwrap();
    }
    path
}

/// Build an indirect-layout pack (`map` + `images`), TMS numbering.
fn indirect_pack(dir: &TempDir, name: &str, tiles: &[(u8, u32, u32, Vec<u8>)]) -> PathBuf {
    let path = dir.path().join(format!("{name}.mbtiles"));
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE map (zoom_level INTEGER, tile_column INTEGER,
             tile_row INTEGER, tile_id TEXT);
         CREATE TABLE images (tile_id TEXT, tile_data BLOB);",
    )
    .unwrap();
    for (i, (z, x, y, data)) in tiles.iter().enumerate() {
        let id = format!("img{i}");
        conn.execute("INSERT INTO map VALUES (?1, ?2, ?3, ?4)", params![z, x, y, id])
            .unwrap();
        conn.execute("INSERT INTO images VALUES (?1, ?2)", params![id, data])
            .unwrap();
    }
    path
}

async fn open(path: &Path) -> TileStore {
    TileStore::open(TilePack::from_path(path)).await.unwrap()
}

// ============================================================================
// Scheme handling
// ============================================================================

#[tokio::test]
async fn test_xyz_pack_end_to_end() {
    let dir = TempDir::new().unwrap();
    let bytes = png("x-5-3");
    let path = direct_pack(&dir, "X", Some("xyz"), &[(10, 5, 3, bytes.clone())]);

    let store = open(&path).await;
    assert_eq!(store.pack().id, "X");
    assert_eq!(store.info().scheme, TileScheme::Xyz);

    assert_eq!(store.fetch(10, 5, 3).await.as_deref(), Some(bytes.as_slice()));
    assert_eq!(store.fetch(10, 5, 999).await, None);
}

#[tokio::test]
async fn test_tms_pack_reads_flipped_row() {
    let dir = TempDir::new().unwrap();
    let bytes = png("tms");
    // (2^10 - 1) - 3 = 1020
    let path = direct_pack(&dir, "tms", None, &[(10, 5, 1020, bytes.clone())]);

    let store = open(&path).await;
    assert_eq!(store.info().scheme, TileScheme::Tms);
    assert_eq!(store.fetch(10, 5, 3).await.as_deref(), Some(bytes.as_slice()));
}

#[tokio::test]
async fn test_non_xyz_scheme_value_means_tms() {
    let dir = TempDir::new().unwrap();
    let path = direct_pack(&dir, "odd", Some("google"), &[(4, 2, 12, png("g"))]);

    let store = open(&path).await;
    assert_eq!(store.info().scheme, TileScheme::Tms);
    // XYZ row 3 at zoom 4 is TMS row 12
    assert!(store.fetch(4, 2, 3).await.is_some());
}

#[tokio::test]
async fn test_mislabelled_xyz_pack_falls_back_to_complement() {
    let dir = TempDir::new().unwrap();
    let bytes = png("really-tms");
    // Claims xyz but rows are actually TMS
    let path = direct_pack(&dir, "liar", Some("xyz"), &[(10, 5, 1020, bytes.clone())]);

    let store = open(&path).await;
    assert_eq!(store.fetch(10, 5, 3).await.as_deref(), Some(bytes.as_slice()));
}

#[tokio::test]
async fn test_unlabelled_xyz_pack_falls_back_to_complement() {
    let dir = TempDir::new().unwrap();
    let bytes = png("really-xyz");
    let path = direct_pack(&dir, "silent", None, &[(10, 5, 3, bytes.clone())]);

    let store = open(&path).await;
    assert_eq!(store.fetch(10, 5, 3).await.as_deref(), Some(bytes.as_slice()));
}

#[tokio::test]
async fn test_declared_row_preferred_when_both_present() {
    let dir = TempDir::new().unwrap();
    let declared = png("declared");
    let path = direct_pack(
        &dir,
        "both",
        Some("xyz"),
        &[(10, 5, 3, declared.clone()), (10, 5, 1020, png("complement"))],
    );

    let store = open(&path).await;
    assert_eq!(store.fetch(10, 5, 3).await.as_deref(), Some(declared.as_slice()));
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_invalid_declared_row_falls_back_to_valid_complement() {
    let dir = TempDir::new().unwrap();
    let good = png("good");
    let path = direct_pack(
        &dir,
        "mixed",
        Some("xyz"),
        &[
            (10, 5, 3, b"<html>404 Not Found</html>".to_vec()),
            (10, 5, 1020, good.clone()),
        ],
    );

    let store = open(&path).await;
    assert_eq!(store.fetch(10, 5, 3).await.as_deref(), Some(good.as_slice()));
}

#[tokio::test]
async fn test_non_raster_payload_never_returned() {
    let dir = TempDir::new().unwrap();
    let path = direct_pack(
        &dir,
        "junk",
        Some("xyz"),
        &[
            (10, 5, 3, b"<html>error</html>".to_vec()),
            (10, 5, 1020, vec![0x1f, 0x8b, 0x08, 0x00]),
            (10, 6, 3, Vec::new()),
        ],
    );

    let store = open(&path).await;
    assert_eq!(store.fetch(10, 5, 3).await, None);
    assert_eq!(store.fetch(10, 6, 3).await, None);
}

#[tokio::test]
async fn test_jpeg_tiles_accepted() {
    let dir = TempDir::new().unwrap();
    let bytes = jpeg("photo");
    let path = direct_pack(&dir, "jpeg", Some("xyz"), &[(8, 1, 1, bytes.clone())]);

    let store = open(&path).await;
    assert_eq!(store.fetch(8, 1, 1).await.as_deref(), Some(bytes.as_slice()));
}

// ============================================================================
// Layouts
// ============================================================================

#[tokio::test]
async fn test_indirect_layout() {
    let dir = TempDir::new().unwrap();
    let bytes = png("joined");
    let path = indirect_pack(&dir, "joined", &[(10, 5, 1020, bytes.clone())]);

    let store = open(&path).await;
    assert_eq!(store.info().layout, TileLayout::Indirect { index_table: "map" });
    assert_eq!(store.fetch(10, 5, 3).await.as_deref(), Some(bytes.as_slice()));
    assert_eq!(store.fetch(10, 5, 4).await, None);
}

#[tokio::test]
async fn test_zoom_range_from_table_scan() {
    let dir = TempDir::new().unwrap();
    let path = direct_pack(
        &dir,
        "range",
        None,
        &[(7, 0, 0, png("a")), (12, 0, 0, png("b"))],
    );

    let store = open(&path).await;
    assert_eq!(store.info().zoom_range, Some((7, 12)));
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn test_missing_pack_is_not_found() {
    let dir = TempDir::new().unwrap();
    let result = TileStore::open(TilePack::from_path(dir.path().join("gone.mbtiles"))).await;
    assert!(matches!(result, Err(TileStoreError::NotFound { .. })));
}

#[tokio::test]
async fn test_corrupt_pack() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("corrupt.mbtiles");
    std::fs::write(&path, vec![0x42; 4096]).unwrap();

    let result = TileStore::open(TilePack::from_path(&path)).await;
    assert!(matches!(result, Err(TileStoreError::Corrupt { .. })));
}

#[tokio::test]
async fn test_closed_store_fails_fast() {
    let dir = TempDir::new().unwrap();
    let path = direct_pack(&dir, "closing", Some("xyz"), &[(1, 0, 0, png("z"))]);

    let store = open(&path).await;
    assert!(store.fetch(1, 0, 0).await.is_some());

    store.close();
    assert!(store.is_closed());
    assert_eq!(store.fetch(1, 0, 0).await, None);
}

#[tokio::test]
async fn test_concurrent_fetches_all_served() {
    let dir = TempDir::new().unwrap();
    let tiles: Vec<(u8, u32, u32, Vec<u8>)> = (0..16u32)
        .map(|x| (4, x, 0, png(&format!("tile-{x}"))))
        .collect();
    let path = direct_pack(&dir, "busy", Some("xyz"), &tiles);

    let store = Arc::new(open(&path).await);
    let handles: Vec<_> = (0..16u32)
        .map(|x| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { (x, store.fetch(4, x, 0).await) })
        })
        .collect();

    for handle in handles {
        let (x, tile) = handle.await.unwrap();
        assert_eq!(tile, Some(png(&format!("tile-{x}")).into()));
    }
}

#[tokio::test]
async fn test_overlay_respects_zoom_bounds() {
    let dir = TempDir::new().unwrap();
    let path = direct_pack(
        &dir,
        "bounded",
        Some("xyz"),
        &[(8, 0, 0, png("lo")), (10, 0, 0, png("hi"))],
    );

    let overlay = TileOverlay::new(Arc::new(open(&path).await));
    assert_eq!((overlay.min_zoom, overlay.max_zoom), (8, 10));
    assert!(overlay.load_tile(8, 0, 0).await.is_some());
    assert!(overlay.load_tile(10, 0, 0).await.is_some());
    assert!(overlay.load_tile(11, 0, 0).await.is_none());
}
