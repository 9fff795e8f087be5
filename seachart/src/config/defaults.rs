//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use super::file::config_directory;
use super::settings::*;
use crate::logging::DEFAULT_LOG_FILE;

/// Default chart overlay opacity.
pub const DEFAULT_OVERLAY_OPACITY: f64 = 1.0;

/// Default suppression window after user input (2 seconds).
pub const DEFAULT_SUPPRESSION_MS: u64 = 2_000;

/// Default programmatic move tag validity (750 ms).
pub const DEFAULT_PROGRAMMATIC_WINDOW_MS: u64 = 750;

/// Default worst accepted horizontal accuracy (50 m).
pub const DEFAULT_MAX_ACCURACY_M: f64 = 50.0;

/// Default oldest accepted fix (5 seconds).
pub const DEFAULT_MAX_FIX_AGE_SECS: u64 = 5;

/// Default deepest button zoom.
pub const DEFAULT_MAX_ZOOM: u8 = 18;

/// Default minimum speed for course display (1.5 kn).
pub const DEFAULT_COURSE_MIN_SPEED_KN: f64 = 1.5;

/// Default pin fade refresh period (60 seconds).
pub const DEFAULT_RECOLOR_INTERVAL_SECS: u64 = 60;

impl Default for ConfigFile {
    fn default() -> Self {
        let base = config_directory();
        Self {
            tiles: TilesSettings {
                directory: base.join("charts"),
                overlay_opacity: DEFAULT_OVERLAY_OPACITY,
            },
            boundary: BoundarySettings { file: None },
            follow: FollowSettings {
                suppression_ms: DEFAULT_SUPPRESSION_MS,
                programmatic_window_ms: DEFAULT_PROGRAMMATIC_WINDOW_MS,
                max_accuracy_m: DEFAULT_MAX_ACCURACY_M,
                max_fix_age_secs: DEFAULT_MAX_FIX_AGE_SECS,
                max_zoom: DEFAULT_MAX_ZOOM,
                course_min_speed_kn: DEFAULT_COURSE_MIN_SPEED_KN,
            },
            annotations: AnnotationSettings {
                recolor_interval_secs: DEFAULT_RECOLOR_INTERVAL_SECS,
            },
            logging: LoggingSettings {
                directory: base.join("logs"),
                file: DEFAULT_LOG_FILE.to_string(),
            },
        }
    }
}
