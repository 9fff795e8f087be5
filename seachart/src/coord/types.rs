//! Coordinate type definitions

use std::fmt;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Zoom levels addressable in a tile pack
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 24;

/// A geographic position in degrees (WGS-84).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// A position in projected Web Mercator space, in meters.
///
/// `x` grows east, `y` grows north. Used for cheap planar geometry where
/// true geodesic math is not required.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

impl MapPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared planar distance to another point.
    #[inline]
    pub fn distance_squared(&self, other: &MapPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Tile row numbering convention.
///
/// Both conventions agree on columns; they disagree on which edge of the
/// world row 0 sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileScheme {
    /// Row 0 at the south edge (MBTiles default).
    #[default]
    Tms,
    /// Row 0 at the north edge (slippy-map / Google convention).
    Xyz,
}

impl TileScheme {
    /// Interpret a pack's declared `scheme` metadata value.
    ///
    /// Only `xyz` (case-insensitive) selects north-origin numbering; anything
    /// else, including a missing value, falls back to TMS.
    pub fn from_metadata(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "xyz" => TileScheme::Xyz,
            _ => TileScheme::Tms,
        }
    }

    /// The other convention.
    #[inline]
    pub fn complement(self) -> Self {
        match self {
            TileScheme::Tms => TileScheme::Xyz,
            TileScheme::Xyz => TileScheme::Tms,
        }
    }
}

impl fmt::Display for TileScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileScheme::Tms => write!(f, "tms"),
            TileScheme::Xyz => write!(f, "xyz"),
        }
    }
}

/// Address of one tile in a slippy-map pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileAddress {
    /// Zoom level
    pub zoom: u8,
    /// X coordinate (east-west), 0 at west
    pub column: u32,
    /// Y coordinate, origin depends on `scheme`
    pub row: u32,
    /// Convention `row` is expressed in
    pub scheme: TileScheme,
}

impl TileAddress {
    pub const fn new(zoom: u8, column: u32, row: u32, scheme: TileScheme) -> Self {
        Self {
            zoom,
            column,
            row,
            scheme,
        }
    }

    /// Address in north-origin numbering, as requested by map widgets.
    pub const fn xyz(zoom: u8, column: u32, row: u32) -> Self {
        Self::new(zoom, column, row, TileScheme::Xyz)
    }

    /// Highest row index at this zoom level (`2^zoom - 1`).
    #[inline]
    pub fn max_index(&self) -> u32 {
        max_tile_index(self.zoom)
    }

    /// Row numbered from the opposite edge: `(2^zoom - 1) - row`.
    ///
    /// Rows outside the pyramid have no complement and are returned unchanged,
    /// so a lookup with them simply misses.
    #[inline]
    pub fn flipped_row(&self) -> u32 {
        self.max_index().checked_sub(self.row).unwrap_or(self.row)
    }

    /// The same tile expressed in the other numbering convention.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self::new(
            self.zoom,
            self.column,
            self.flipped_row(),
            self.scheme.complement(),
        )
    }

    /// The same tile expressed in `scheme`.
    #[inline]
    pub fn in_scheme(&self, scheme: TileScheme) -> Self {
        if self.scheme == scheme {
            *self
        } else {
            self.flipped()
        }
    }
}

impl fmt::Display for TileAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{} ({})",
            self.zoom, self.column, self.row, self.scheme
        )
    }
}

/// `2^zoom - 1`, saturating for zoom levels too deep for `u32`.
#[inline]
pub fn max_tile_index(zoom: u8) -> u32 {
    if zoom >= 32 {
        u32::MAX
    } else {
        ((1u64 << zoom) - 1) as u32
    }
}

/// Camera placement on the chart.
///
/// Heading is fixed at north-up and therefore not represented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Map center
    pub center: GeoPoint,
    /// Continuous zoom level (0 = whole world in one 256-point tile)
    pub zoom: f64,
}

impl CameraState {
    pub const fn new(center: GeoPoint, zoom: f64) -> Self {
        Self { center, zoom }
    }
}
