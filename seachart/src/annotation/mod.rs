//! Chart annotations: waypoints, group pins and the cursor.
//!
//! Desired annotation sets come from upstream collaborators; the
//! [`AnnotationTable`] diffs them against what is already on the map and
//! reports which records to add, update in place, or remove. Group pins fade
//! from red to gray in ten-minute steps as they age.

mod table;
mod tint;
mod types;

pub use table::{AnnotationRecord, AnnotationTable, ReconcileDiff};
pub use tint::{fade_bucket, pin_tint, Rgb, FADE_BUCKET, FADE_BUCKETS, FRESH_TINT, STALE_TINT};
pub use types::{Annotation, AnnotationId, AnnotationKey, AnnotationKind, GroupPin, Waypoint};
