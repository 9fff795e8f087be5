//! Camera-follow state machine.
//!
//! # State Machine
//!
//! ```text
//! Off --[request_on(), no suppression, no gesture]--> On
//! On  --[request_off() | user input]--> Off
//! ```
//!
//! User input (a gesture event or a region change attributed to the user)
//! also opens a suppression window measured from the latest input; while it
//! is open `request_on` is refused and fixes do not move the camera.
//!
//! Nothing in here re-enters `On` on its own. GPS fixes only ever move the
//! camera while already following.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::fix::{FixLimits, FixRejection, GpsFix};
use super::smoothing::{CourseFilter, PositionFilter, SpeedBand};
use crate::coord::{geodesic_distance_m, GeoPoint};

/// Whether the camera tracks the vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowState {
    #[default]
    Off,
    On,
}

/// Configuration for the follow controller.
#[derive(Debug, Clone)]
pub struct FollowConfig {
    /// Time after user input during which follow cannot engage (default: 2s).
    pub suppression: Duration,
    /// Fix quality thresholds.
    pub fix_limits: FixLimits,
    /// Speed below which course is not smoothed or shown (default: 1.5 kn).
    pub course_min_speed_knots: f64,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            suppression: Duration::from_secs(2),
            fix_limits: FixLimits::default(),
            course_min_speed_knots: 1.5,
        }
    }
}

/// Smoothed position and course the camera should track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowTarget {
    pub center: GeoPoint,
    pub course_deg: Option<f64>,
}

/// Why an accepted fix did not move the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldReason {
    NotFollowing,
    Suppressed,
    GestureActive,
    TooSoon,
    WithinDeadband,
}

/// Outcome of feeding one fix to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixOutcome {
    /// Fix failed quality screening; smoothing state is unchanged.
    Rejected(FixRejection),
    /// Fix was smoothed but the camera stays put.
    Held {
        target: FollowTarget,
        reason: HoldReason,
    },
    /// Camera should move to `target`.
    Apply(FollowTarget),
}

/// Owns follow state, smoothing filters and camera pacing.
#[derive(Debug)]
pub struct FollowController {
    config: FollowConfig,
    state: FollowState,
    suppress_until: Option<Instant>,
    position: PositionFilter,
    course: CourseFilter,
    last_fix: Option<GpsFix>,
    last_applied: Option<GeoPoint>,
    last_camera_move: Option<Instant>,
}

impl FollowController {
    pub fn new(config: FollowConfig) -> Self {
        let course = CourseFilter::new(config.course_min_speed_knots);
        Self {
            config,
            state: FollowState::Off,
            suppress_until: None,
            position: PositionFilter::default(),
            course,
            last_fix: None,
            last_applied: None,
            last_camera_move: None,
        }
    }

    pub fn state(&self) -> FollowState {
        self.state
    }

    pub fn is_following(&self) -> bool {
        self.state == FollowState::On
    }

    pub fn is_suppressed(&self, now: Instant) -> bool {
        self.suppress_until.is_some_and(|until| now < until)
    }

    /// Latest fix that passed quality screening.
    pub fn last_fix(&self) -> Option<&GpsFix> {
        self.last_fix.as_ref()
    }

    /// Current smoothed target, if any fix has been accepted since the last reset.
    pub fn target(&self) -> Option<FollowTarget> {
        self.position.value().map(|center| FollowTarget {
            center,
            course_deg: self.course.value(),
        })
    }

    /// Ask to start following. Returns whether follow is now engaged.
    ///
    /// Refused while a suppression window is open or a gesture is in flight.
    pub fn request_on(&mut self, now: Instant, gesture_active: bool) -> bool {
        if self.state == FollowState::On {
            return true;
        }
        if gesture_active {
            debug!("Follow refused: gesture in flight");
            return false;
        }
        if self.is_suppressed(now) {
            debug!("Follow refused: suppression window open");
            return false;
        }
        self.state = FollowState::On;
        info!("Follow engaged");
        true
    }

    /// Stop following and clear smoothing state.
    pub fn request_off(&mut self) {
        if self.state == FollowState::On {
            info!("Follow disengaged");
        }
        self.enter_off();
    }

    /// User touched the map: disengage and (re)open the suppression window.
    ///
    /// Called for every gesture event, including the one that ends it, so the
    /// window runs from gesture end. Returns true if follow was engaged.
    pub fn on_user_input(&mut self, now: Instant) -> bool {
        let was_following = self.state == FollowState::On;
        if was_following {
            info!("Follow disengaged by user input");
        }
        self.enter_off();
        self.suppress_until = Some(now + self.config.suppression);
        was_following
    }

    /// Record a camera move made on the controller's behalf or by a one-shot intent.
    pub fn record_camera_move(&mut self, center: GeoPoint, now: Instant) {
        self.last_applied = Some(center);
        self.last_camera_move = Some(now);
    }

    /// Feed one GPS fix.
    pub fn on_fix(&mut self, fix: &GpsFix, now: Instant, gesture_active: bool) -> FixOutcome {
        if let Err(rejection) = fix.check(now, &self.config.fix_limits) {
            debug!(%rejection, "Fix rejected");
            return FixOutcome::Rejected(rejection);
        }
        self.last_fix = Some(*fix);

        let speed = fix.speed();
        let band = SpeedBand::from_knots(speed);
        let center = self.position.update(fix.coordinate, band.alpha());
        let course_deg = self.course.update(fix.course(), speed);
        let target = FollowTarget { center, course_deg };

        if let Some(reason) = self.hold_reason(band, center, now, gesture_active) {
            return FixOutcome::Held { target, reason };
        }

        self.record_camera_move(center, now);
        FixOutcome::Apply(target)
    }

    fn hold_reason(
        &self,
        band: SpeedBand,
        center: GeoPoint,
        now: Instant,
        gesture_active: bool,
    ) -> Option<HoldReason> {
        if self.state != FollowState::On {
            return Some(HoldReason::NotFollowing);
        }
        if self.is_suppressed(now) {
            return Some(HoldReason::Suppressed);
        }
        if gesture_active {
            return Some(HoldReason::GestureActive);
        }
        if let Some(last) = self.last_camera_move {
            if now.saturating_duration_since(last) <= band.min_interval() {
                return Some(HoldReason::TooSoon);
            }
        }
        if let Some(applied) = self.last_applied {
            if geodesic_distance_m(applied, center) <= band.deadband_m() {
                return Some(HoldReason::WithinDeadband);
            }
        }
        None
    }

    fn enter_off(&mut self) {
        self.state = FollowState::Off;
        self.position.reset();
        self.course.reset();
        self.last_applied = None;
    }
}

impl Default for FollowController {
    fn default() -> Self {
        Self::new(FollowConfig::default())
    }
}
