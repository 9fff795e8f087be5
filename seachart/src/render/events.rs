//! Events delivered to the render coordinator.

use crate::annotation::{GroupPin, Waypoint};
use crate::follow::{GesturePhase, GpsFix};
use crate::tile_store::TilePack;

/// A button tapped in the chart chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonIntent {
    /// One-shot move to the current fix; disengages follow.
    Recenter,
    /// Engage follow if off, disengage if on.
    ToggleFollow,
    ZoomIn,
    ZoomOut,
}

/// Everything that can happen to the chart, in arrival order.
#[derive(Debug, Clone)]
pub enum MapEvent {
    Fix(GpsFix),
    /// Aggregate gesture state from the host widget.
    Gesture(GesturePhase),
    /// The host reports that the visible region changed.
    RegionChanged,
    Intent(ButtonIntent),
    /// Full replacement of the local waypoint list.
    Waypoints(Vec<Waypoint>),
    /// Full snapshot of the group pin feed.
    GroupPins(Vec<GroupPin>),
    /// Installed tile pack inventory.
    TilePacks(Vec<TilePack>),
    /// Chart overlay opacity in [0, 1].
    ChartOpacity(f64),
    /// Re-apply pin fading.
    RecolorTick,
}
