//! Time-related utility functions.
//!
//! The engine reasons about two clocks: a monotonic [`Instant`] for
//! suppression windows and camera pacing, and wall-clock [`DateTime<Utc>`]
//! for annotation ages reported by remote collaborators. [`EventTime`] carries
//! both so every event is judged against one consistent "now".

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// A paired monotonic and wall-clock reading taken at one moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventTime {
    /// Monotonic time, used for windows and intervals.
    pub monotonic: Instant,
    /// Wall-clock time, used for ages of remotely-stamped data.
    pub wall: DateTime<Utc>,
}

impl EventTime {
    /// Read both clocks now.
    pub fn now() -> Self {
        Self {
            monotonic: Instant::now(),
            wall: Utc::now(),
        }
    }

    /// Construct from explicit readings (replays and tests).
    pub fn new(monotonic: Instant, wall: DateTime<Utc>) -> Self {
        Self { monotonic, wall }
    }

    /// Advance both clocks by the same amount, or `None` if either overflows.
    pub fn checked_advanced_by(&self, delta: Duration) -> Option<Self> {
        let wall_delta = chrono::Duration::from_std(delta).ok()?;
        Some(Self {
            monotonic: self.monotonic.checked_add(delta)?,
            wall: self.wall.checked_add_signed(wall_delta)?,
        })
    }

    /// Advance both clocks by the same amount.
    pub fn advanced_by(&self, delta: Duration) -> Self {
        let wall_delta = chrono::Duration::from_std(delta).unwrap_or(chrono::Duration::zero());
        Self {
            monotonic: self.monotonic + delta,
            wall: self.wall + wall_delta,
        }
    }
}

/// Age of a wall-clock timestamp relative to `now`.
///
/// Timestamps from the future (clock skew between devices) count as age zero.
pub fn wall_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    now.signed_duration_since(timestamp)
        .to_std()
        .unwrap_or(Duration::ZERO)
}
