//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude)
//! and Web Mercator map space, slippy-map tile addressing and the small set
//! of navigation helpers (great-circle distance, heading arithmetic) used by
//! the follow and boundary modules.

mod types;

pub use types::{
    max_tile_index, CameraState, GeoPoint, MapPoint, TileAddress, TileScheme, MAX_LAT, MAX_LON,
    MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM,
};

use std::f64::consts::PI;

/// WGS-84 semi-major axis, the Web Mercator sphere radius.
pub const MERCATOR_RADIUS_M: f64 = 6_378_137.0;

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Meters in one nautical mile.
pub const METERS_PER_NM: f64 = 1852.0;

/// Knots per meter/second.
pub const KNOTS_PER_MPS: f64 = 1.943_844_5;

/// Width of one tile in screen points at integral zoom levels.
pub const TILE_SIZE_POINTS: f64 = 256.0;

const DEG_TO_RAD: f64 = PI / 180.0;
const RAD_TO_DEG: f64 = 180.0 / PI;

/// Projects a geographic position into Web Mercator meters.
///
/// Latitude is clamped to the Mercator limits so polar input stays finite.
#[inline]
pub fn project(point: GeoPoint) -> MapPoint {
    let lat = point.latitude.clamp(MIN_LAT, MAX_LAT) * DEG_TO_RAD;
    let lon = point.longitude * DEG_TO_RAD;
    MapPoint::new(
        MERCATOR_RADIUS_M * lon,
        MERCATOR_RADIUS_M * (PI / 4.0 + lat / 2.0).tan().ln(),
    )
}

/// Inverse of [`project`].
#[inline]
pub fn unproject(point: MapPoint) -> GeoPoint {
    let lon = point.x / MERCATOR_RADIUS_M * RAD_TO_DEG;
    let lat = (2.0 * (point.y / MERCATOR_RADIUS_M).exp().atan() - PI / 2.0) * RAD_TO_DEG;
    GeoPoint::new(lat, lon)
}

/// Great-circle distance between two positions in meters (haversine).
pub fn geodesic_distance_m(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.latitude * DEG_TO_RAD;
    let lat2 = to.latitude * DEG_TO_RAD;
    let delta_lat = (to.latitude - from.latitude) * DEG_TO_RAD;
    let delta_lon = (to.longitude - from.longitude) * DEG_TO_RAD;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}

/// Ground distance covered by one screen point at `zoom` and `latitude`.
pub fn meters_per_point(latitude: f64, zoom: f64) -> f64 {
    let world_points = TILE_SIZE_POINTS * 2.0_f64.powf(zoom);
    let equator_m = 2.0 * PI * MERCATOR_RADIUS_M;
    equator_m / world_points * (latitude.clamp(MIN_LAT, MAX_LAT) * DEG_TO_RAD).cos()
}

/// Normalize a heading to the range [0, 360) degrees.
pub fn normalize_heading(heading: f64) -> f64 {
    let h = heading % 360.0;
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

/// Signed shortest rotation from `from` to `to`, in (-180, 180] degrees.
///
/// Positive values turn clockwise (to the right).
pub fn shortest_angle_delta(from: f64, to: f64) -> f64 {
    let mut diff = (to - from) % 360.0;
    if diff > 180.0 {
        diff -= 360.0;
    } else if diff <= -180.0 {
        diff += 360.0;
    }
    diff
}

/// Wrap a longitude into [-180, 180).
pub fn wrap_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0) % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0 - 180.0
    } else {
        wrapped - 180.0
    }
}

#[cfg(test)]
mod tests;
