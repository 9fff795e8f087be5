//! Age-based pin coloring.

use std::fmt;
use std::time::Duration;

/// Width of one fade step.
pub const FADE_BUCKET: Duration = Duration::from_secs(600);

/// Number of fade steps; the last one is terminal.
pub const FADE_BUCKETS: u64 = 6;

/// Tint of a freshly updated pin.
pub const FRESH_TINT: Rgb = Rgb::new(255, 59, 48);

/// Tint of a pin at or beyond the last fade step.
pub const STALE_TINT: Rgb = Rgb::new(142, 142, 147);

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend toward `other`; `t` is clamped to [0, 1].
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fade step for a pin of the given age, in `0..FADE_BUCKETS`.
pub fn fade_bucket(age: Duration) -> u64 {
    (age.as_secs() / FADE_BUCKET.as_secs()).min(FADE_BUCKETS - 1)
}

/// Tint for a pin of the given age.
pub fn pin_tint(age: Duration) -> Rgb {
    let t = fade_bucket(age) as f64 / (FADE_BUCKETS - 1) as f64;
    FRESH_TINT.lerp(STALE_TINT, t)
}
