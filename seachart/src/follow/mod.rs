//! GPS-driven camera following.
//!
//! [`FollowController`] turns a noisy fix stream into a smoothed camera
//! target and decides when the camera may move. [`GestureArbiter`] tells it
//! whether the user is touching the map. Both are plain single-threaded
//! state machines; callers pass in the current time explicitly.

mod arbiter;
mod controller;
mod fix;
mod smoothing;

pub use arbiter::{GestureArbiter, GesturePhase, RegionChangeSource, DEFAULT_PROGRAMMATIC_WINDOW};
pub use controller::{
    FixOutcome, FollowConfig, FollowController, FollowState, FollowTarget, HoldReason,
};
pub use fix::{FixLimits, FixRejection, GpsFix};
pub use smoothing::{CourseFilter, PositionFilter, SpeedBand, COURSE_ALPHA};

#[cfg(test)]
mod tests;
