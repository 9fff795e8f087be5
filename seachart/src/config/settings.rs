//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Installed tile packs
    pub tiles: TilesSettings,
    /// Boundary geometry
    pub boundary: BoundarySettings,
    /// Camera follow tuning
    pub follow: FollowSettings,
    /// Annotation refresh
    pub annotations: AnnotationSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Tile pack configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TilesSettings {
    /// Directory scanned for `.mbtiles` packs
    pub directory: PathBuf,
    /// Chart overlay opacity in [0, 1]
    pub overlay_opacity: f64,
}

/// Boundary geometry configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySettings {
    /// GeoJSON file with boundary lines; none disables boundary distance
    pub file: Option<PathBuf>,
}

/// Follow controller configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowSettings {
    /// Suppression window after user input, milliseconds
    pub suppression_ms: u64,
    /// Validity of a programmatic camera move tag, milliseconds
    pub programmatic_window_ms: u64,
    /// Worst accepted horizontal accuracy, meters
    pub max_accuracy_m: f64,
    /// Oldest accepted fix, seconds
    pub max_fix_age_secs: u64,
    /// Deepest zoom reachable with the zoom buttons
    pub max_zoom: u8,
    /// Speed below which course is hidden, knots
    pub course_min_speed_kn: f64,
}

/// Annotation configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationSettings {
    /// Period of the pin fade refresh, seconds
    pub recolor_interval_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log directory
    pub directory: PathBuf,
    /// Log file name
    pub file: String,
}
