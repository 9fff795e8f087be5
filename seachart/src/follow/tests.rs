//! Tests for the follow controller

use std::time::{Duration, Instant};

use super::*;
use crate::coord::{geodesic_distance_m, GeoPoint};

fn fix_at(coordinate: GeoPoint, speed: f64, course: f64, now: Instant) -> GpsFix {
    GpsFix {
        coordinate,
        speed_knots: Some(speed),
        course_deg: Some(course),
        horizontal_accuracy_m: 5.0,
        timestamp: now,
    }
}

/// Offset a point north by `meters`.
fn north_of(point: GeoPoint, meters: f64) -> GeoPoint {
    GeoPoint::new(point.latitude + meters / 111_195.0, point.longitude)
}

const HARBOR: GeoPoint = GeoPoint::new(36.95, -76.33);

#[test]
fn test_request_on_refused_during_gesture() {
    let mut controller = FollowController::default();
    assert!(!controller.request_on(Instant::now(), true));
    assert_eq!(controller.state(), FollowState::Off);
}

#[test]
fn test_request_on_idle_succeeds() {
    let mut controller = FollowController::default();
    assert!(controller.request_on(Instant::now(), false));
    assert!(controller.is_following());
}

#[test]
fn test_user_input_forces_off_and_suppresses() {
    let mut controller = FollowController::default();
    let t0 = Instant::now();
    controller.request_on(t0, false);

    assert!(controller.on_user_input(t0));
    assert_eq!(controller.state(), FollowState::Off);

    assert!(!controller.request_on(t0 + Duration::from_millis(1500), false));
    assert!(controller.request_on(t0 + Duration::from_millis(2001), false));
}

#[test]
fn test_suppression_runs_from_gesture_end() {
    let mut controller = FollowController::default();
    let began = Instant::now();
    controller.on_user_input(began);
    // Gesture lasts 5 seconds
    let ended = began + Duration::from_secs(5);
    controller.on_user_input(ended);

    assert!(!controller.request_on(ended + Duration::from_secs(1), false));
    assert!(controller.request_on(ended + Duration::from_secs(3), false));
}

#[test]
fn test_user_input_while_off_reports_no_change() {
    let mut controller = FollowController::default();
    assert!(!controller.on_user_input(Instant::now()));
}

#[test]
fn test_fixes_never_engage_follow() {
    let mut controller = FollowController::default();
    let mut now = Instant::now();
    for i in 0..20 {
        let outcome = controller.on_fix(
            &fix_at(north_of(HARBOR, i as f64 * 50.0), 12.0, 0.0, now),
            now,
            false,
        );
        assert!(matches!(
            outcome,
            FixOutcome::Held {
                reason: HoldReason::NotFollowing,
                ..
            }
        ));
        now += Duration::from_secs(1);
    }
    assert_eq!(controller.state(), FollowState::Off);
}

#[test]
fn test_first_fix_after_engaging_applies() {
    let mut controller = FollowController::default();
    let now = Instant::now();
    controller.request_on(now, false);
    let outcome = controller.on_fix(&fix_at(HARBOR, 5.0, 90.0, now), now, false);
    assert!(matches!(outcome, FixOutcome::Apply(t) if t.center == HARBOR));
}

#[test]
fn test_stationary_vessel_deadband() {
    let mut controller = FollowController::default();
    let mut now = Instant::now();
    controller.request_on(now, false);
    controller.on_fix(&fix_at(HARBOR, 0.0, 0.0, now), now, false);

    // GPS jitter up to 14 m around a stationary boat, well spaced in time
    for offset in [14.0, -14.0, 10.0, -12.0, 14.0, 8.0, -14.0] {
        now += Duration::from_secs(3);
        let outcome = controller.on_fix(
            &fix_at(north_of(HARBOR, offset), 0.0, 0.0, now),
            now,
            false,
        );
        assert!(
            matches!(
                outcome,
                FixOutcome::Held {
                    reason: HoldReason::WithinDeadband,
                    ..
                }
            ),
            "offset {offset} moved the camera: {outcome:?}"
        );
    }
}

#[test]
fn test_min_interval_paces_camera() {
    let mut controller = FollowController::default();
    let now = Instant::now();
    controller.request_on(now, false);
    controller.on_fix(&fix_at(HARBOR, 5.0, 0.0, now), now, false);

    let soon = now + Duration::from_millis(500);
    let outcome = controller.on_fix(&fix_at(north_of(HARBOR, 500.0), 5.0, 0.0, soon), soon, false);
    assert!(matches!(
        outcome,
        FixOutcome::Held {
            reason: HoldReason::TooSoon,
            ..
        }
    ));

    let later = now + Duration::from_millis(1500);
    let fix = fix_at(north_of(HARBOR, 500.0), 5.0, 0.0, later);
    let outcome = controller.on_fix(&fix, later, false);
    assert!(matches!(outcome, FixOutcome::Apply(_)));
}

#[test]
fn test_active_gesture_holds_camera() {
    let mut controller = FollowController::default();
    let now = Instant::now();
    controller.request_on(now, false);
    let outcome = controller.on_fix(&fix_at(HARBOR, 5.0, 0.0, now), now, true);
    assert!(matches!(
        outcome,
        FixOutcome::Held {
            reason: HoldReason::GestureActive,
            ..
        }
    ));
}

#[test]
fn test_course_absent_when_slow() {
    let mut controller = FollowController::default();
    let now = Instant::now();
    let outcome = controller.on_fix(&fix_at(HARBOR, 1.2, 270.0, now), now, false);
    let FixOutcome::Held { target, .. } = outcome else {
        panic!("unexpected outcome {outcome:?}");
    };
    assert_eq!(target.course_deg, None);

    let outcome = controller.on_fix(&fix_at(HARBOR, 6.0, 270.0, now), now, false);
    let FixOutcome::Held { target, .. } = outcome else {
        panic!("unexpected outcome {outcome:?}");
    };
    assert_eq!(target.course_deg, Some(270.0));
}

#[test]
fn test_rejected_fix_leaves_target_unchanged() {
    let mut controller = FollowController::default();
    let now = Instant::now();
    controller.on_fix(&fix_at(HARBOR, 5.0, 0.0, now), now, false);
    let before = controller.target();

    let mut poor = fix_at(north_of(HARBOR, 1000.0), 5.0, 0.0, now);
    poor.horizontal_accuracy_m = 120.0;
    assert!(matches!(
        controller.on_fix(&poor, now, false),
        FixOutcome::Rejected(FixRejection::PoorAccuracy(_))
    ));

    let stale = fix_at(north_of(HARBOR, 1000.0), 5.0, 0.0, now);
    let outcome = controller.on_fix(&stale, now + Duration::from_secs(6), false);
    assert!(matches!(outcome, FixOutcome::Rejected(FixRejection::Stale(_))));

    assert_eq!(controller.target(), before);
    assert_eq!(controller.last_fix().map(|f| f.coordinate), Some(HARBOR));
}

#[test]
fn test_request_off_resets_smoothing() {
    let mut controller = FollowController::default();
    let now = Instant::now();
    controller.request_on(now, false);
    controller.on_fix(&fix_at(HARBOR, 5.0, 45.0, now), now, false);
    assert!(controller.target().is_some());

    controller.request_off();
    assert_eq!(controller.target(), None);

    // Fresh accumulator seeds from the next fix rather than blending
    let away = north_of(HARBOR, 2000.0);
    controller.on_fix(&fix_at(away, 5.0, 45.0, now), now, false);
    let target = controller.target().unwrap();
    assert!(geodesic_distance_m(target.center, away) < 1e-6);
}
