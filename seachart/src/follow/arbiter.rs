//! Attribution of viewport changes to the user or to the program.
//!
//! The host map reports region changes without saying who caused them. Two
//! signals settle it:
//!
//! 1. Whether any gesture is in flight right now. This is authoritative: a
//!    region change during a gesture is always the user's.
//! 2. A short window opened by every programmatic camera move. Region
//!    changes inside it, with no gesture active, are the program's. This only
//!    covers animated moves whose completion callback arrives late.
//!
//! Anything else is attributed to the user, since disengaging follow by
//! mistake costs one tap while keeping it engaged fights the user.

use std::time::{Duration, Instant};

use tracing::trace;

/// Default validity of a programmatic-move tag.
pub const DEFAULT_PROGRAMMATIC_WINDOW: Duration = Duration::from_millis(750);

/// Phase reported by the host's aggregate gesture observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

impl GesturePhase {
    /// True while the gesture is still in flight.
    pub fn is_active(&self) -> bool {
        matches!(self, GesturePhase::Began | GesturePhase::Changed)
    }
}

/// Who moved the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionChangeSource {
    User,
    Program,
}

/// Classifies region changes using gesture state and programmatic tags.
#[derive(Debug, Clone)]
pub struct GestureArbiter {
    window: Duration,
    programmatic_until: Option<Instant>,
    gesture_active: bool,
}

impl Default for GestureArbiter {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAMMATIC_WINDOW)
    }
}

impl GestureArbiter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            programmatic_until: None,
            gesture_active: false,
        }
    }

    /// Tag a camera mutation the program is about to make.
    pub fn mark_programmatic(&mut self, now: Instant) {
        self.programmatic_until = Some(now + self.window);
    }

    /// Record a raw gesture event. Every gesture event is user input.
    pub fn on_gesture(&mut self, phase: GesturePhase) {
        self.gesture_active = phase.is_active();
        trace!(?phase, "Gesture");
    }

    pub fn is_gesture_active(&self) -> bool {
        self.gesture_active
    }

    /// Attribute a region-change callback received at `now`.
    pub fn classify_region_change(&self, now: Instant) -> RegionChangeSource {
        if self.gesture_active {
            return RegionChangeSource::User;
        }
        match self.programmatic_until {
            Some(until) if now <= until => RegionChangeSource::Program,
            _ => RegionChangeSource::User,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_change_is_user() {
        let arbiter = GestureArbiter::default();
        assert_eq!(
            arbiter.classify_region_change(Instant::now()),
            RegionChangeSource::User
        );
    }

    #[test]
    fn test_tagged_change_is_program() {
        let mut arbiter = GestureArbiter::default();
        let now = Instant::now();
        arbiter.mark_programmatic(now);
        assert_eq!(
            arbiter.classify_region_change(now + Duration::from_millis(300)),
            RegionChangeSource::Program
        );
    }

    #[test]
    fn test_tag_expires() {
        let mut arbiter = GestureArbiter::default();
        let now = Instant::now();
        arbiter.mark_programmatic(now);
        assert_eq!(
            arbiter.classify_region_change(now + Duration::from_millis(751)),
            RegionChangeSource::User
        );
    }

    #[test]
    fn test_active_gesture_overrides_tag() {
        let mut arbiter = GestureArbiter::default();
        let now = Instant::now();
        arbiter.mark_programmatic(now);
        arbiter.on_gesture(GesturePhase::Began);
        assert_eq!(arbiter.classify_region_change(now), RegionChangeSource::User);

        arbiter.on_gesture(GesturePhase::Ended);
        assert!(!arbiter.is_gesture_active());
        assert_eq!(
            arbiter.classify_region_change(now),
            RegionChangeSource::Program
        );
    }

    #[test]
    fn test_cancelled_gesture_is_inactive() {
        let mut arbiter = GestureArbiter::default();
        arbiter.on_gesture(GesturePhase::Changed);
        assert!(arbiter.is_gesture_active());
        arbiter.on_gesture(GesturePhase::Cancelled);
        assert!(!arbiter.is_gesture_active());
    }
}
