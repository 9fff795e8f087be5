//! Tests for coordinate conversion

use super::*;
use proptest::prelude::*;

#[test]
fn test_flipped_row() {
    let tile = TileAddress::xyz(10, 5, 3);
    assert_eq!(tile.flipped_row(), 1020);
    assert_eq!(tile.flipped(), TileAddress::new(10, 5, 1020, TileScheme::Tms));
    assert_eq!(tile.in_scheme(TileScheme::Xyz), tile);
    assert_eq!(tile.in_scheme(TileScheme::Tms).row, 1020);
}

#[test]
fn test_flipped_row_out_of_range_is_unchanged() {
    let tile = TileAddress::xyz(2, 0, 9);
    assert_eq!(tile.flipped_row(), 9);
}

#[test]
fn test_zoom_zero_has_single_row() {
    let tile = TileAddress::xyz(0, 0, 0);
    assert_eq!(tile.max_index(), 0);
    assert_eq!(tile.flipped_row(), 0);
}

#[test]
fn test_scheme_from_metadata() {
    assert_eq!(TileScheme::from_metadata(Some("xyz")), TileScheme::Xyz);
    assert_eq!(TileScheme::from_metadata(Some(" XYZ ")), TileScheme::Xyz);
    assert_eq!(TileScheme::from_metadata(Some("tms")), TileScheme::Tms);
    assert_eq!(TileScheme::from_metadata(Some("google")), TileScheme::Tms);
    assert_eq!(TileScheme::from_metadata(None), TileScheme::Tms);
}

#[test]
fn test_project_unproject_roundtrip() {
    let point = GeoPoint::new(47.6062, -122.3321);
    let back = unproject(project(point));
    assert!((back.latitude - point.latitude).abs() < 1e-9);
    assert!((back.longitude - point.longitude).abs() < 1e-9);
}

#[test]
fn test_project_origin() {
    let origin = project(GeoPoint::new(0.0, 0.0));
    assert!(origin.x.abs() < 1e-6);
    assert!(origin.y.abs() < 1e-6);
}

#[test]
fn test_geodesic_distance_one_degree() {
    let d = geodesic_distance_m(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
    assert!((d - 111_195.08).abs() < 1.0, "got {}", d);

    let d = geodesic_distance_m(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
    assert!((d - 111_195.08).abs() < 1.0, "got {}", d);
}

#[test]
fn test_geodesic_distance_zero() {
    let p = GeoPoint::new(36.8, -76.3);
    assert_eq!(geodesic_distance_m(p, p), 0.0);
}

#[test]
fn test_meters_per_point() {
    let at_equator = meters_per_point(0.0, 0.0);
    assert!((at_equator - 156_543.03).abs() < 0.01);

    let at_zoom_one = meters_per_point(0.0, 1.0);
    assert!((at_zoom_one - at_equator / 2.0).abs() < 1e-6);

    let at_sixty = meters_per_point(60.0, 0.0);
    assert!((at_sixty - at_equator / 2.0).abs() < 0.01);
}

#[test]
fn test_normalize_heading() {
    assert_eq!(normalize_heading(0.0), 0.0);
    assert_eq!(normalize_heading(360.0), 0.0);
    assert_eq!(normalize_heading(-90.0), 270.0);
    assert_eq!(normalize_heading(450.0), 90.0);
}

#[test]
fn test_shortest_angle_delta_wraps() {
    assert_eq!(shortest_angle_delta(350.0, 10.0), 20.0);
    assert_eq!(shortest_angle_delta(10.0, 350.0), -20.0);
    assert_eq!(shortest_angle_delta(90.0, 270.0), 180.0);
    assert_eq!(shortest_angle_delta(270.0, 90.0), 180.0);
}

#[test]
fn test_wrap_longitude() {
    assert_eq!(wrap_longitude(0.0), 0.0);
    assert_eq!(wrap_longitude(190.0), -170.0);
    assert_eq!(wrap_longitude(-190.0), 170.0);
}

proptest! {
    /// Property: the shortest delta is always within (-180, 180] and lands on the target.
    #[test]
    fn prop_shortest_delta_bounded(from in -720.0f64..720.0, to in -720.0f64..720.0) {
        let delta = shortest_angle_delta(from, to);
        prop_assert!(delta > -180.0 - 1e-9 && delta <= 180.0 + 1e-9);
        let landed = normalize_heading(from + delta);
        let target = normalize_heading(to);
        let err = shortest_angle_delta(landed, target).abs();
        prop_assert!(err < 1e-6);
    }

    /// Property: flipping a row twice returns the original address.
    #[test]
    fn prop_flip_is_involution(zoom in 0u8..=20, seed in 0u32..u32::MAX) {
        let row = seed % (max_tile_index(zoom) + 1).max(1);
        let tile = TileAddress::xyz(zoom, 0, row);
        prop_assert_eq!(tile.flipped().flipped(), tile);
    }
}
