//! One-time container inspection performed when a pack is opened.
//!
//! Scheme and table layout are decided here and never re-examined on the
//! read path.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{Connection, OpenFlags, OptionalExtension};
use tracing::debug;

use super::error::TileStoreError;
use super::pack::{PackBounds, PackInfo, TileLayout};
use crate::coord::{TileScheme, MAX_ZOOM};

/// Tables that may carry the addressing columns, in preference order.
const ADDRESS_TABLES: [&str; 2] = ["tiles", "map"];

/// Table holding blobs for the indirect layout.
const IMAGES_TABLE: &str = "images";

/// Open the container read-only.
pub(super) fn open_connection(path: &Path) -> Result<Connection, TileStoreError> {
    if !path.is_file() {
        return Err(TileStoreError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| TileStoreError::corrupt(path, e))?;

    // SQLite opens lazily; the first real read is what rejects non-databases.
    conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
        row.get::<_, i64>(0)
    })
    .map_err(|e| TileStoreError::corrupt(path, e))?;

    Ok(conn)
}

/// Inspect metadata and layout of an open container.
pub(super) fn inspect(conn: &Connection, path: &Path) -> Result<PackInfo, TileStoreError> {
    let layout = detect_layout(conn)
        .map_err(|e| TileStoreError::corrupt(path, e))?
        .ok_or_else(|| TileStoreError::corrupt(path, "no tiles table"))?;

    let metadata = read_metadata(conn);
    let scheme = TileScheme::from_metadata(metadata.get("scheme").map(String::as_str));

    let zoom_range = zoom_range_from_metadata(&metadata)
        .or_else(|| zoom_range_from_table(conn, &layout));

    Ok(PackInfo {
        scheme,
        layout,
        zoom_range,
        name: metadata.get("name").cloned(),
        format: metadata.get("format").cloned(),
        bounds: metadata.get("bounds").and_then(|b| PackBounds::parse(b)),
    })
}

/// Columns of `table`, empty when the table does not exist.
fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns)
}

fn has_column(columns: &[String], name: &str) -> bool {
    columns.iter().any(|c| c.eq_ignore_ascii_case(name))
}

fn has_address_columns(columns: &[String]) -> bool {
    ["zoom_level", "tile_column", "tile_row"]
        .iter()
        .all(|c| has_column(columns, c))
}

fn detect_layout(conn: &Connection) -> rusqlite::Result<Option<TileLayout>> {
    let images = table_columns(conn, IMAGES_TABLE)?;
    let images_have_data = has_column(&images, "tile_id") && has_column(&images, "tile_data");

    for table in ADDRESS_TABLES {
        let columns = table_columns(conn, table)?;
        if !has_address_columns(&columns) {
            continue;
        }
        if has_column(&columns, "tile_data") {
            return Ok(Some(TileLayout::Direct { table }));
        }
        if has_column(&columns, "tile_id") && images_have_data {
            return Ok(Some(TileLayout::Indirect { index_table: table }));
        }
    }
    Ok(None)
}

/// Key/value pairs from the optional `metadata` table.
fn read_metadata(conn: &Connection) -> HashMap<String, String> {
    let result = (|| -> rusqlite::Result<HashMap<String, String>> {
        let columns = table_columns(conn, "metadata")?;
        if !has_column(&columns, "name") || !has_column(&columns, "value") {
            return Ok(HashMap::new());
        }
        let mut stmt = conn.prepare("SELECT name, value FROM metadata")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?.trim().to_ascii_lowercase(),
                row.get::<_, String>(1)?,
            ))
        })?;
        rows.collect()
    })();

    match result {
        Ok(map) => map,
        Err(e) => {
            debug!(error = %e, "Ignoring unreadable metadata table");
            HashMap::new()
        }
    }
}

fn parse_zoom(value: &str) -> Option<u8> {
    value.trim().parse::<u8>().ok().filter(|z| *z <= MAX_ZOOM)
}

fn zoom_range_from_metadata(metadata: &HashMap<String, String>) -> Option<(u8, u8)> {
    let min = parse_zoom(metadata.get("minzoom")?)?;
    let max = parse_zoom(metadata.get("maxzoom")?)?;
    (min <= max).then_some((min, max))
}

fn zoom_range_from_table(conn: &Connection, layout: &TileLayout) -> Option<(u8, u8)> {
    let table = layout.address_table();
    let sql = format!("SELECT MIN(zoom_level), MAX(zoom_level) FROM {table}");
    let range = conn
        .query_row(&sql, [], |row| {
            Ok((row.get::<_, Option<i64>>(0)?, row.get::<_, Option<i64>>(1)?))
        })
        .optional()
        .ok()
        .flatten()?;

    match range {
        (Some(min), Some(max)) => {
            let clamp = |z: i64| z.clamp(0, MAX_ZOOM as i64) as u8;
            Some((clamp(min), clamp(max)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create(dir: &TempDir, name: &str, sql: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(sql).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = open_connection(&dir.path().join("absent.mbtiles"));
        assert!(matches!(result, Err(TileStoreError::NotFound { .. })));
    }

    #[test]
    fn test_garbage_file_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.mbtiles");
        std::fs::write(&path, b"this is definitely not a database file at all").unwrap();
        let result = open_connection(&path);
        assert!(matches!(result, Err(TileStoreError::Corrupt { .. })));
    }

    #[test]
    fn test_direct_layout_with_xyz_metadata() {
        let dir = TempDir::new().unwrap();
        let path = create(
            &dir,
            "direct.mbtiles",
            "CREATE TABLE metadata (name TEXT, value TEXT);
             INSERT INTO metadata VALUES ('scheme', 'xyz'), ('name', 'Harbor'),
                 ('format', 'png'), ('minzoom', '8'), ('maxzoom', '14');
             CREATE TABLE tiles (zoom_level INTEGER, tile_column INTEGER,
                 tile_row INTEGER, tile_data BLOB);",
        );
        let conn = open_connection(&path).unwrap();
        let info = inspect(&conn, &path).unwrap();

        assert_eq!(info.scheme, TileScheme::Xyz);
        assert_eq!(info.layout, TileLayout::Direct { table: "tiles" });
        assert_eq!(info.zoom_range, Some((8, 14)));
        assert_eq!(info.name.as_deref(), Some("Harbor"));
        assert_eq!(info.format.as_deref(), Some("png"));
    }

    #[test]
    fn test_indirect_layout_defaults_to_tms() {
        let dir = TempDir::new().unwrap();
        let path = create(
            &dir,
            "indirect.mbtiles",
            "CREATE TABLE map (zoom_level INTEGER, tile_column INTEGER,
                 tile_row INTEGER, tile_id TEXT);
             CREATE TABLE images (tile_id TEXT, tile_data BLOB);
             INSERT INTO map VALUES (3, 1, 2, 'a'), (6, 1, 2, 'b');",
        );
        let conn = open_connection(&path).unwrap();
        let info = inspect(&conn, &path).unwrap();

        assert_eq!(info.scheme, TileScheme::Tms);
        assert_eq!(info.layout, TileLayout::Indirect { index_table: "map" });
        assert_eq!(info.zoom_range, Some((3, 6)));
    }

    #[test]
    fn test_database_without_tiles_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = create(&dir, "empty.mbtiles", "CREATE TABLE other (x INTEGER);");
        let conn = open_connection(&path).unwrap();
        assert!(matches!(
            inspect(&conn, &path),
            Err(TileStoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_empty_tiles_table_has_no_zoom_range() {
        let dir = TempDir::new().unwrap();
        let path = create(
            &dir,
            "blank.mbtiles",
            "CREATE TABLE tiles (zoom_level INTEGER, tile_column INTEGER,
                 tile_row INTEGER, tile_data BLOB);",
        );
        let conn = open_connection(&path).unwrap();
        let info = inspect(&conn, &path).unwrap();
        assert_eq!(info.zoom_range, None);
    }

    #[test]
    fn test_inverted_metadata_zoom_falls_back_to_scan() {
        let mut metadata = HashMap::new();
        metadata.insert("minzoom".to_string(), "12".to_string());
        metadata.insert("maxzoom".to_string(), "4".to_string());
        assert_eq!(zoom_range_from_metadata(&metadata), None);
    }
}
