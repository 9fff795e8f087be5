//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::Ini;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::coord::MAX_ZOOM;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [tiles] section
    if let Some(section) = ini.section(Some("tiles")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.tiles.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("overlay_opacity") {
            let opacity: f64 = parse_value("tiles", "overlay_opacity", v, OPACITY_REASON)?;
            if !(0.0..=1.0).contains(&opacity) {
                return Err(invalid("tiles", "overlay_opacity", v, OPACITY_REASON));
            }
            config.tiles.overlay_opacity = opacity;
        }
    }

    // [boundary] section
    if let Some(section) = ini.section(Some("boundary")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            config.boundary.file = (!v.is_empty()).then(|| expand_tilde(v));
        }
    }

    // [follow] section
    if let Some(section) = ini.section(Some("follow")) {
        if let Some(v) = section.get("suppression_ms") {
            config.follow.suppression_ms = parse_value(
                "follow",
                "suppression_ms",
                v,
                "must be a non-negative integer (milliseconds)",
            )?;
        }
        if let Some(v) = section.get("programmatic_window_ms") {
            config.follow.programmatic_window_ms = parse_value(
                "follow",
                "programmatic_window_ms",
                v,
                "must be a non-negative integer (milliseconds)",
            )?;
        }
        if let Some(v) = section.get("max_accuracy_m") {
            let reason = "must be a positive number (meters)";
            let accuracy: f64 = parse_value("follow", "max_accuracy_m", v, reason)?;
            if !accuracy.is_finite() || accuracy <= 0.0 {
                return Err(invalid("follow", "max_accuracy_m", v, reason));
            }
            config.follow.max_accuracy_m = accuracy;
        }
        if let Some(v) = section.get("max_fix_age_secs") {
            config.follow.max_fix_age_secs = parse_value(
                "follow",
                "max_fix_age_secs",
                v,
                "must be a non-negative integer (seconds)",
            )?;
        }
        if let Some(v) = section.get("max_zoom") {
            let reason = "must be an integer between 0 and 24";
            let zoom: u8 = parse_value("follow", "max_zoom", v, reason)?;
            if zoom > MAX_ZOOM {
                return Err(invalid("follow", "max_zoom", v, reason));
            }
            config.follow.max_zoom = zoom;
        }
        if let Some(v) = section.get("course_min_speed_kn") {
            let reason = "must be a non-negative number (knots)";
            let speed: f64 = parse_value("follow", "course_min_speed_kn", v, reason)?;
            if !speed.is_finite() || speed < 0.0 {
                return Err(invalid("follow", "course_min_speed_kn", v, reason));
            }
            config.follow.course_min_speed_kn = speed;
        }
    }

    // [annotations] section
    if let Some(section) = ini.section(Some("annotations")) {
        if let Some(v) = section.get("recolor_interval_secs") {
            let reason = "must be a positive integer (seconds)";
            let secs: u64 = parse_value("annotations", "recolor_interval_secs", v, reason)?;
            if secs == 0 {
                return Err(invalid("annotations", "recolor_interval_secs", v, reason));
            }
            config.annotations.recolor_interval_secs = secs;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    Ok(config)
}

const OPACITY_REASON: &str = "must be a number between 0.0 and 1.0";

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_value<T: FromStr>(
    section: &str,
    key: &str,
    value: &str,
    reason: &str,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, reason))
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
