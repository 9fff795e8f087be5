//! Contract consumed from the host map widget.

use crate::annotation::{AnnotationId, AnnotationRecord};
use crate::coord::CameraState;
use crate::tile_store::TileOverlay;

/// Operations the coordinator needs from the platform map widget.
///
/// Implementations only forward to the widget; all policy lives in the
/// coordinator. Camera heading is always north-up.
pub trait HostMap {
    /// Current camera placement.
    fn camera(&self) -> CameraState;

    /// Move the camera. The widget will later report a region change.
    fn set_camera(&mut self, camera: CameraState);

    /// Add a raster overlay with the given opacity.
    fn register_overlay(&mut self, overlay: TileOverlay, opacity: f64);

    /// Remove the overlay registered for `pack_id`.
    fn remove_overlay(&mut self, pack_id: &str);

    fn set_overlay_opacity(&mut self, pack_id: &str, opacity: f64);

    /// Materialize a new annotation view.
    fn add_annotation(&mut self, record: &AnnotationRecord);

    /// Mutate an existing annotation view in place.
    fn update_annotation(&mut self, record: &AnnotationRecord);

    fn remove_annotation(&mut self, id: AnnotationId);

    /// Toggle emphasis on one boundary polyline.
    fn set_boundary_highlight(&mut self, polyline: usize, highlighted: bool);
}
