//! Text fields published to the UI layer.

use crate::coord::{GeoPoint, METERS_PER_NM};

/// Placeholder for values that are not known.
pub const UNKNOWN: &str = "--";

/// Distances under a tenth of a mile are shown in meters.
const METERS_CUTOFF: f64 = 0.1 * METERS_PER_NM;

/// `"185 m"` below 0.1 nm, `"1.25 nm"` above.
pub fn format_distance(meters: Option<f64>) -> String {
    match meters {
        Some(m) if m < METERS_CUTOFF => format!("{:.0} m", m),
        Some(m) => format!("{:.2} nm", m / METERS_PER_NM),
        None => UNKNOWN.to_string(),
    }
}

/// `"6.4 kn"`.
pub fn format_speed(knots: Option<f64>) -> String {
    match knots {
        Some(kn) => format!("{:.1} kn", kn),
        None => UNKNOWN.to_string(),
    }
}

/// `"087°"`.
pub fn format_course(degrees: Option<f64>) -> String {
    match degrees {
        Some(deg) => format!("{:03.0}°", deg.round() % 360.0),
        None => UNKNOWN.to_string(),
    }
}

/// Degrees and decimal minutes: `"36°57.000'N 076°19.800'W"`.
pub fn format_coordinate(point: GeoPoint) -> String {
    format!(
        "{} {}",
        dm(point.latitude, 2, ['N', 'S']),
        dm(point.longitude, 3, ['E', 'W'])
    )
}

fn dm(value: f64, width: usize, hemispheres: [char; 2]) -> String {
    let hemisphere = if value < 0.0 {
        hemispheres[1]
    } else {
        hemispheres[0]
    };
    // Round at minute precision first so 59.9996' carries into the degree
    let total_thousandths = (value.abs() * 60_000.0).round() as u64;
    let degrees = total_thousandths / 60_000;
    let minutes = (total_thousandths % 60_000) as f64 / 1000.0;
    format!("{degrees:0width$}°{minutes:06.3}'{hemisphere}")
}

/// `"12.3 m/pt"`.
pub fn format_meters_per_point(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.1} km/pt", meters / 1000.0)
    } else {
        format!("{:.1} m/pt", meters)
    }
}
