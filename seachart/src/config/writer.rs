//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let boundary_file = config
        .boundary
        .file
        .as_ref()
        .map(|p| path_to_string(p))
        .unwrap_or_default();

    format!(
        r#"[tiles]
; Directory scanned for installed chart packs (*.mbtiles)
directory = {}
; Chart overlay opacity, 0.0 (hidden) to 1.0 (opaque)
overlay_opacity = {}

[boundary]
; GeoJSON file with boundary lines used for distance-to-boundary
; Leave empty to disable
file = {}

[follow]
; After the user pans or pinches, follow cannot re-engage for this long (ms)
suppression_ms = {}
; Region changes this soon after a programmatic camera move are not
; treated as user input (ms)
programmatic_window_ms = {}
; Fixes with a worse horizontal accuracy are ignored for following (meters)
max_accuracy_m = {}
; Fixes older than this are ignored for following (seconds)
max_fix_age_secs = {}
; Deepest zoom level reachable with the zoom buttons (0-24)
max_zoom = {}
; Course is hidden below this speed over ground (knots)
course_min_speed_kn = {}

[annotations]
; How often group pins are re-faded by age (seconds)
recolor_interval_secs = {}

[logging]
; Directory for the session log
directory = {}
; Log file name (cleared on each start)
file = {}
"#,
        path_to_string(&config.tiles.directory),
        config.tiles.overlay_opacity,
        boundary_file,
        config.follow.suppression_ms,
        config.follow.programmatic_window_ms,
        config.follow.max_accuracy_m,
        config.follow.max_fix_age_secs,
        config.follow.max_zoom,
        config.follow.course_min_speed_kn,
        config.annotations.recolor_interval_secs,
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

/// Render a path, abbreviating the home directory as `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
