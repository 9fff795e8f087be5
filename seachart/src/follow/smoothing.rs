//! Speed-banded exponential smoothing of position and course.

use std::time::Duration;

use crate::coord::{normalize_heading, shortest_angle_delta, wrap_longitude, GeoPoint};

/// Course filter coefficient.
pub const COURSE_ALPHA: f64 = 0.25;

/// Vessel speed class; selects filter strength and camera pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedBand {
    /// Below 2 kn: drifting or at anchor.
    Drifting,
    /// 2 to 10 kn.
    Slow,
    /// 10 to 20 kn.
    Cruising,
    /// 20 kn and above.
    Fast,
}

impl SpeedBand {
    /// Band for a speed over ground; unknown speed counts as drifting.
    pub fn from_knots(speed: Option<f64>) -> Self {
        match speed.unwrap_or(0.0) {
            s if s < 2.0 => SpeedBand::Drifting,
            s if s < 10.0 => SpeedBand::Slow,
            s if s < 20.0 => SpeedBand::Cruising,
            _ => SpeedBand::Fast,
        }
    }

    /// Position filter coefficient; smaller smooths harder.
    pub fn alpha(&self) -> f64 {
        match self {
            SpeedBand::Drifting => 0.08,
            SpeedBand::Slow => 0.15,
            SpeedBand::Cruising => 0.25,
            SpeedBand::Fast => 0.35,
        }
    }

    /// Minimum time between follow camera moves.
    pub fn min_interval(&self) -> Duration {
        match self {
            SpeedBand::Drifting => Duration::from_secs(2),
            SpeedBand::Slow => Duration::from_secs(1),
            SpeedBand::Cruising => Duration::from_millis(500),
            SpeedBand::Fast => Duration::from_millis(250),
        }
    }

    /// Minimum target displacement that justifies a camera move.
    pub fn deadband_m(&self) -> f64 {
        match self {
            SpeedBand::Drifting => 15.0,
            SpeedBand::Slow => 8.0,
            SpeedBand::Cruising => 5.0,
            SpeedBand::Fast => 3.0,
        }
    }
}

/// Low-pass filter over latitude and longitude.
///
/// Longitude is blended along the shortest arc so a track across the
/// antimeridian does not swing through zero.
#[derive(Debug, Clone, Default)]
pub struct PositionFilter {
    value: Option<GeoPoint>,
}

impl PositionFilter {
    /// Blend `raw` into the filter; the first sample seeds it.
    pub fn update(&mut self, raw: GeoPoint, alpha: f64) -> GeoPoint {
        let next = match self.value {
            None => raw,
            Some(prev) => {
                let lat = prev.latitude + alpha * (raw.latitude - prev.latitude);
                let dlon = shortest_angle_delta(prev.longitude, raw.longitude);
                let lon = wrap_longitude(prev.longitude + alpha * dlon);
                GeoPoint::new(lat, lon)
            }
        };
        self.value = Some(next);
        next
    }

    pub fn value(&self) -> Option<GeoPoint> {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = None;
    }
}

/// Low-pass filter over course, active only above a minimum speed.
#[derive(Debug, Clone)]
pub struct CourseFilter {
    value: Option<f64>,
    min_speed_knots: f64,
}

impl CourseFilter {
    pub fn new(min_speed_knots: f64) -> Self {
        Self {
            value: None,
            min_speed_knots,
        }
    }

    /// Blend a course reading; returns the filtered course or `None` when
    /// the vessel is too slow for course to be meaningful.
    ///
    /// Dropping below the minimum speed clears the accumulator.
    pub fn update(&mut self, course: Option<f64>, speed_knots: Option<f64>) -> Option<f64> {
        let moving = speed_knots.is_some_and(|s| s >= self.min_speed_knots);
        if !moving {
            self.value = None;
            return None;
        }
        let Some(raw) = course else {
            return self.value;
        };

        let next = match self.value {
            None => normalize_heading(raw),
            Some(prev) => normalize_heading(prev + COURSE_ALPHA * shortest_angle_delta(prev, raw)),
        };
        self.value = Some(next);
        self.value
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = None;
    }
}
