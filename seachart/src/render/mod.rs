//! Render coordination: the single event loop that drives the chart.
//!
//! GPS fixes, gestures, region-change callbacks, button intents and
//! upstream data changes all arrive as [`MapEvent`]s. The
//! [`RenderCoordinator`] feeds them through the follow, boundary and
//! annotation components and pushes the results to a [`HostMap`].

mod coordinator;
mod events;
mod format;
mod headless;
mod host;

pub use coordinator::{
    CoordinatorConfig, RenderCoordinator, UiSnapshot, DEFAULT_MAX_ZOOM, DEFAULT_RECOLOR_INTERVAL,
};
pub use events::{ButtonIntent, MapEvent};
pub use format::{
    format_coordinate, format_course, format_distance, format_meters_per_point, format_speed,
    UNKNOWN,
};
pub use headless::{HeadlessMap, HostOp};
pub use host::HostMap;
