//! Tile pack descriptors.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::coord::{GeoPoint, TileScheme, MAX_ZOOM, MIN_ZOOM};

/// A packaged chart on local storage.
///
/// Immutable once opened; one [`TileStore`](super::TileStore) serves each pack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TilePack {
    /// Stable identifier, unique within the installed inventory.
    pub id: String,
    /// Backing container file.
    pub path: PathBuf,
}

impl TilePack {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }

    /// Build a pack whose identifier is the file stem of `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self::new(id, path)
    }

    /// Installed packs: every `*.mbtiles` file directly inside `dir`, sorted by id.
    ///
    /// A missing directory means nothing is installed.
    pub fn scan_directory(dir: impl AsRef<Path>) -> io::Result<Vec<TilePack>> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut packs = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_pack = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(PACK_EXTENSION));
            if is_pack && path.is_file() {
                packs.push(TilePack::from_path(path));
            }
        }
        packs.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(packs)
    }
}

/// File extension of installed packs.
pub const PACK_EXTENSION: &str = "mbtiles";

/// Where the raster blob lives relative to the addressing columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileLayout {
    /// `zoom_level`, `tile_column`, `tile_row` and `tile_data` in one table.
    Direct { table: &'static str },
    /// Addressing table carries a `tile_id` joined to `images.tile_data`.
    Indirect { index_table: &'static str },
}

impl TileLayout {
    /// Query returning the blob for `(?1 zoom, ?2 column, ?3 row)`.
    pub(super) fn lookup_sql(&self) -> String {
        match self {
            TileLayout::Direct { table } => format!(
                "SELECT tile_data FROM {table} \
                 WHERE zoom_level = ?1 AND tile_column = ?2 AND tile_row = ?3 LIMIT 1"
            ),
            TileLayout::Indirect { index_table } => format!(
                "SELECT images.tile_data FROM {index_table} \
                 JOIN images ON images.tile_id = {index_table}.tile_id \
                 WHERE {index_table}.zoom_level = ?1 \
                 AND {index_table}.tile_column = ?2 \
                 AND {index_table}.tile_row = ?3 LIMIT 1"
            ),
        }
    }

    /// Table that holds the addressing columns.
    pub fn address_table(&self) -> &'static str {
        match self {
            TileLayout::Direct { table } => table,
            TileLayout::Indirect { index_table } => index_table,
        }
    }
}

impl fmt::Display for TileLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileLayout::Direct { table } => write!(f, "direct ({table}.tile_data)"),
            TileLayout::Indirect { index_table } => {
                write!(f, "indirect ({index_table}.tile_id -> images.tile_data)")
            }
        }
    }
}

/// Geographic extent declared in pack metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl PackBounds {
    /// Parse the MBTiles `bounds` value: `left,bottom,right,top`.
    pub fn parse(value: &str) -> Option<Self> {
        let parts: Vec<f64> = value
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .ok()?;
        if parts.len() != 4 {
            return None;
        }
        Some(Self {
            south_west: GeoPoint::new(parts[1], parts[0]),
            north_east: GeoPoint::new(parts[3], parts[2]),
        })
    }
}

/// Everything learned about a pack while opening it.
#[derive(Debug, Clone, PartialEq)]
pub struct PackInfo {
    /// Declared row numbering (TMS when undeclared).
    pub scheme: TileScheme,
    /// Table layout, decided once at open.
    pub layout: TileLayout,
    /// Lowest and highest zoom present, if the pack has any tiles.
    pub zoom_range: Option<(u8, u8)>,
    /// Human-readable name from metadata.
    pub name: Option<String>,
    /// Declared tile format (`png`, `jpg`, ...).
    pub format: Option<String>,
    /// Declared extent.
    pub bounds: Option<PackBounds>,
}

impl PackInfo {
    /// Zoom bounds for overlay registration, covering everything when unknown.
    pub fn overlay_zoom_bounds(&self) -> (u8, u8) {
        self.zoom_range.unwrap_or((MIN_ZOOM, MAX_ZOOM))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_from_path_uses_stem() {
        let pack = TilePack::from_path("/charts/chesapeake-north.mbtiles");
        assert_eq!(pack.id, "chesapeake-north");
        assert_eq!(pack.path, PathBuf::from("/charts/chesapeake-north.mbtiles"));
    }

    #[test]
    fn test_scan_directory_finds_packs() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("b-harbor.mbtiles"), b"").unwrap();
        std::fs::write(dir.path().join("a-bay.MBTILES"), b"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();
        std::fs::create_dir(dir.path().join("dir.mbtiles")).unwrap();

        let packs = TilePack::scan_directory(dir.path()).unwrap();
        let ids: Vec<&str> = packs.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a-bay", "b-harbor"]);
    }

    #[test]
    fn test_scan_missing_directory_is_empty() {
        let packs = TilePack::scan_directory("/nonexistent/charts").unwrap();
        assert!(packs.is_empty());
    }

    #[test]
    fn test_direct_lookup_sql() {
        let sql = TileLayout::Direct { table: "tiles" }.lookup_sql();
        assert!(sql.starts_with("SELECT tile_data FROM tiles"));
        assert!(sql.contains("tile_row = ?3"));
    }

    #[test]
    fn test_indirect_lookup_sql_joins_images() {
        let sql = TileLayout::Indirect { index_table: "map" }.lookup_sql();
        assert!(sql.contains("JOIN images ON images.tile_id = map.tile_id"));
        assert!(sql.contains("map.zoom_level = ?1"));
    }

    #[test]
    fn test_bounds_parse() {
        let bounds = PackBounds::parse("-76.5, 36.8, -75.9, 39.6").unwrap();
        assert_eq!(bounds.south_west, GeoPoint::new(36.8, -76.5));
        assert_eq!(bounds.north_east, GeoPoint::new(39.6, -75.9));
    }

    #[test]
    fn test_bounds_parse_rejects_garbage() {
        assert!(PackBounds::parse("").is_none());
        assert!(PackBounds::parse("1,2,3").is_none());
        assert!(PackBounds::parse("a,b,c,d").is_none());
    }

    #[test]
    fn test_overlay_bounds_default_to_full_range() {
        let info = PackInfo {
            scheme: TileScheme::Tms,
            layout: TileLayout::Direct { table: "tiles" },
            zoom_range: None,
            name: None,
            format: None,
            bounds: None,
        };
        assert_eq!(info.overlay_zoom_bounds(), (MIN_ZOOM, MAX_ZOOM));
    }
}
