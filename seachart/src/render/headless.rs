//! In-memory host map used for replays and tests.

use std::collections::{BTreeMap, BTreeSet};

use crate::annotation::{AnnotationId, AnnotationRecord};
use crate::coord::{CameraState, GeoPoint};
use crate::tile_store::TileOverlay;

use super::host::HostMap;

/// One call made against the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostOp {
    SetCamera(CameraState),
    RegisterOverlay { pack_id: String, opacity: f64 },
    RemoveOverlay(String),
    SetOverlayOpacity { pack_id: String, opacity: f64 },
    AddAnnotation(AnnotationId),
    UpdateAnnotation(AnnotationId),
    RemoveAnnotation(AnnotationId),
    Highlight { polyline: usize, highlighted: bool },
}

/// A [`HostMap`] that keeps its state in memory and logs every call.
#[derive(Debug)]
pub struct HeadlessMap {
    camera: CameraState,
    overlays: BTreeMap<String, (TileOverlay, f64)>,
    annotations: BTreeMap<AnnotationId, AnnotationRecord>,
    highlighted: BTreeSet<usize>,
    pending_region_changes: usize,
    ops: Vec<HostOp>,
}

impl HeadlessMap {
    pub fn new(camera: CameraState) -> Self {
        Self {
            camera,
            overlays: BTreeMap::new(),
            annotations: BTreeMap::new(),
            highlighted: BTreeSet::new(),
            pending_region_changes: 0,
            ops: Vec::new(),
        }
    }

    /// Every call made so far, oldest first.
    pub fn ops(&self) -> &[HostOp] {
        &self.ops
    }

    /// Drain the call log.
    pub fn take_ops(&mut self) -> Vec<HostOp> {
        std::mem::take(&mut self.ops)
    }

    /// Region-change callbacks a real widget would have fired since the last
    /// call; resets the count.
    pub fn take_region_changes(&mut self) -> usize {
        std::mem::take(&mut self.pending_region_changes)
    }

    pub fn overlay(&self, pack_id: &str) -> Option<&TileOverlay> {
        self.overlays.get(pack_id).map(|(overlay, _)| overlay)
    }

    pub fn overlay_opacity(&self, pack_id: &str) -> Option<f64> {
        self.overlays.get(pack_id).map(|(_, opacity)| *opacity)
    }

    pub fn overlay_ids(&self) -> Vec<String> {
        self.overlays.keys().cloned().collect()
    }

    pub fn annotation(&self, id: AnnotationId) -> Option<&AnnotationRecord> {
        self.annotations.get(&id)
    }

    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }

    pub fn highlighted(&self) -> Vec<usize> {
        self.highlighted.iter().copied().collect()
    }

    /// Simulate the user dragging the map to `center`.
    pub fn drag_to(&mut self, center: GeoPoint) {
        self.camera.center = center;
        self.pending_region_changes += 1;
    }
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self::new(CameraState::new(GeoPoint::new(0.0, 0.0), 2.0))
    }
}

impl HostMap for HeadlessMap {
    fn camera(&self) -> CameraState {
        self.camera
    }

    fn set_camera(&mut self, camera: CameraState) {
        self.camera = camera;
        self.pending_region_changes += 1;
        self.ops.push(HostOp::SetCamera(camera));
    }

    fn register_overlay(&mut self, overlay: TileOverlay, opacity: f64) {
        self.ops.push(HostOp::RegisterOverlay {
            pack_id: overlay.pack_id.clone(),
            opacity,
        });
        self.overlays
            .insert(overlay.pack_id.clone(), (overlay, opacity));
    }

    fn remove_overlay(&mut self, pack_id: &str) {
        self.overlays.remove(pack_id);
        self.ops.push(HostOp::RemoveOverlay(pack_id.to_string()));
    }

    fn set_overlay_opacity(&mut self, pack_id: &str, opacity: f64) {
        if let Some(entry) = self.overlays.get_mut(pack_id) {
            entry.1 = opacity;
        }
        self.ops.push(HostOp::SetOverlayOpacity {
            pack_id: pack_id.to_string(),
            opacity,
        });
    }

    fn add_annotation(&mut self, record: &AnnotationRecord) {
        self.annotations.insert(record.id, record.clone());
        self.ops.push(HostOp::AddAnnotation(record.id));
    }

    fn update_annotation(&mut self, record: &AnnotationRecord) {
        self.annotations.insert(record.id, record.clone());
        self.ops.push(HostOp::UpdateAnnotation(record.id));
    }

    fn remove_annotation(&mut self, id: AnnotationId) {
        self.annotations.remove(&id);
        self.ops.push(HostOp::RemoveAnnotation(id));
    }

    fn set_boundary_highlight(&mut self, polyline: usize, highlighted: bool) {
        if highlighted {
            self.highlighted.insert(polyline);
        } else {
            self.highlighted.remove(&polyline);
        }
        self.ops.push(HostOp::Highlight {
            polyline,
            highlighted,
        });
    }
}
