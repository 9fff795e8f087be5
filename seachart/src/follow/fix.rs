//! GPS fixes and fix-quality screening.

use std::fmt;
use std::time::{Duration, Instant};

use crate::coord::{GeoPoint, MAX_LON, MIN_LON};

/// One position report from the GPS receiver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsFix {
    pub coordinate: GeoPoint,
    /// Speed over ground; `None` when the receiver does not report it.
    pub speed_knots: Option<f64>,
    /// Course over ground in degrees true; `None` when unavailable.
    pub course_deg: Option<f64>,
    /// Radius of 68% confidence in meters. Negative means invalid.
    pub horizontal_accuracy_m: f64,
    /// When the receiver produced the fix.
    pub timestamp: Instant,
}

impl GpsFix {
    /// Speed with invalid (negative or non-finite) readings treated as absent.
    pub fn speed(&self) -> Option<f64> {
        self.speed_knots.filter(|s| s.is_finite() && *s >= 0.0)
    }

    /// Course with invalid readings treated as absent.
    pub fn course(&self) -> Option<f64> {
        self.course_deg.filter(|c| c.is_finite() && *c >= 0.0)
    }

    /// Screen the fix against `limits` as of `now`.
    pub fn check(&self, now: Instant, limits: &FixLimits) -> Result<(), FixRejection> {
        let GeoPoint {
            latitude,
            longitude,
        } = self.coordinate;
        if !latitude.is_finite()
            || !longitude.is_finite()
            || !(-90.0..=90.0).contains(&latitude)
            || !(MIN_LON..=MAX_LON).contains(&longitude)
        {
            return Err(FixRejection::InvalidCoordinate);
        }

        let accuracy = self.horizontal_accuracy_m;
        if !accuracy.is_finite() || accuracy < 0.0 || accuracy > limits.max_accuracy_m {
            return Err(FixRejection::PoorAccuracy(accuracy));
        }

        let age = now.saturating_duration_since(self.timestamp);
        if age > limits.max_age {
            return Err(FixRejection::Stale(age));
        }

        Ok(())
    }
}

/// Thresholds a fix must meet to drive the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixLimits {
    /// Maximum horizontal accuracy radius (default: 50 m).
    pub max_accuracy_m: f64,
    /// Maximum age at processing time (default: 5 s).
    pub max_age: Duration,
}

impl Default for FixLimits {
    fn default() -> Self {
        Self {
            max_accuracy_m: 50.0,
            max_age: Duration::from_secs(5),
        }
    }
}

/// Why a fix was kept out of smoothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixRejection {
    InvalidCoordinate,
    PoorAccuracy(f64),
    Stale(Duration),
}

impl fmt::Display for FixRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixRejection::InvalidCoordinate => write!(f, "invalid coordinate"),
            FixRejection::PoorAccuracy(m) => write!(f, "accuracy {:.0} m too poor", m),
            FixRejection::Stale(age) => write!(f, "fix {:.1}s old", age.as_secs_f64()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(accuracy: f64, timestamp: Instant) -> GpsFix {
        GpsFix {
            coordinate: GeoPoint::new(37.0, -76.0),
            speed_knots: Some(5.0),
            course_deg: Some(90.0),
            horizontal_accuracy_m: accuracy,
            timestamp,
        }
    }

    #[test]
    fn test_good_fix_accepted() {
        let now = Instant::now();
        assert!(fix(8.0, now).check(now, &FixLimits::default()).is_ok());
    }

    #[test]
    fn test_poor_accuracy_rejected() {
        let now = Instant::now();
        let limits = FixLimits::default();
        assert_eq!(
            fix(65.0, now).check(now, &limits),
            Err(FixRejection::PoorAccuracy(65.0))
        );
        assert_eq!(
            fix(-1.0, now).check(now, &limits),
            Err(FixRejection::PoorAccuracy(-1.0))
        );
    }

    #[test]
    fn test_stale_fix_rejected() {
        let then = Instant::now();
        let now = then + Duration::from_secs(6);
        assert!(matches!(
            fix(5.0, then).check(now, &FixLimits::default()),
            Err(FixRejection::Stale(_))
        ));
    }

    #[test]
    fn test_fix_from_future_is_fresh() {
        let now = Instant::now();
        let ahead = now + Duration::from_millis(200);
        assert!(fix(5.0, ahead).check(now, &FixLimits::default()).is_ok());
    }

    #[test]
    fn test_invalid_speed_and_course_hidden() {
        let mut f = fix(5.0, Instant::now());
        f.speed_knots = Some(-1.0);
        f.course_deg = Some(-1.0);
        assert_eq!(f.speed(), None);
        assert_eq!(f.course(), None);
    }

    #[test]
    fn test_nan_coordinate_rejected() {
        let now = Instant::now();
        let mut f = fix(5.0, now);
        f.coordinate = GeoPoint::new(f64::NAN, 0.0);
        assert_eq!(
            f.check(now, &FixLimits::default()),
            Err(FixRejection::InvalidCoordinate)
        );
    }

    #[test]
    fn test_out_of_range_longitude_rejected() {
        let now = Instant::now();
        let mut f = fix(5.0, now);
        f.coordinate = GeoPoint::new(37.0, -181.0);
        assert_eq!(
            f.check(now, &FixLimits::default()),
            Err(FixRejection::InvalidCoordinate)
        );

        f.coordinate = GeoPoint::new(37.0, 180.0);
        assert!(f.check(now, &FixLimits::default()).is_ok());
    }
}
