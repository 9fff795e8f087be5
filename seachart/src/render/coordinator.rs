//! Top-level glue between event sources, engine components and the host map.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::events::{ButtonIntent, MapEvent};
use super::format::{
    format_coordinate, format_course, format_distance, format_meters_per_point, format_speed,
    UNKNOWN,
};
use super::host::HostMap;
use crate::annotation::{
    Annotation, AnnotationKind, AnnotationTable, GroupPin, ReconcileDiff, Waypoint,
};
use crate::boundary::BoundaryLocator;
use crate::coord::{meters_per_point, GeoPoint, MAX_ZOOM};
use crate::follow::{
    FixOutcome, FixRejection, FollowConfig, FollowController, GestureArbiter, GesturePhase,
    GpsFix, RegionChangeSource, DEFAULT_PROGRAMMATIC_WINDOW,
};
use crate::tile_store::{TileOverlay, TilePack, TileStore};
use crate::time::EventTime;

/// Default interval between pin fade refreshes.
pub const DEFAULT_RECOLOR_INTERVAL: Duration = Duration::from_secs(60);

/// Default deepest zoom reachable with the zoom buttons.
pub const DEFAULT_MAX_ZOOM: f64 = 18.0;

/// Configuration for the render coordinator.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    pub follow: FollowConfig,
    /// Validity of a programmatic-move tag (default: 750ms).
    pub programmatic_window: Duration,
    /// Zoom-in limit for button intents (default: 18).
    pub max_zoom: f64,
    /// Pin fade refresh period (default: 60s).
    pub recolor_interval: Duration,
    /// Initial chart overlay opacity (default: 1.0).
    pub overlay_opacity: f64,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            follow: FollowConfig::default(),
            programmatic_window: DEFAULT_PROGRAMMATIC_WINDOW,
            max_zoom: DEFAULT_MAX_ZOOM,
            recolor_interval: DEFAULT_RECOLOR_INTERVAL,
            overlay_opacity: 1.0,
        }
    }
}

/// Text fields and flags shown by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiSnapshot {
    /// Authoritative follow flag.
    pub follow_enabled: bool,
    pub boundary_distance: String,
    pub speed: String,
    pub course: String,
    /// Position under the map center.
    pub cursor_coordinate: String,
    pub meters_per_point: String,
}

impl Default for UiSnapshot {
    fn default() -> Self {
        Self {
            follow_enabled: false,
            boundary_distance: UNKNOWN.to_string(),
            speed: UNKNOWN.to_string(),
            course: UNKNOWN.to_string(),
            cursor_coordinate: UNKNOWN.to_string(),
            meters_per_point: UNKNOWN.to_string(),
        }
    }
}

/// Routes events into the follow, boundary and annotation components and
/// applies their results to the host map.
///
/// All event handling happens on one task; nothing here is shared across
/// threads. Tile I/O runs on each pack's reader thread.
pub struct RenderCoordinator<H: HostMap> {
    host: H,
    config: CoordinatorConfig,
    follow: FollowController,
    arbiter: GestureArbiter,
    boundary: BoundaryLocator,
    annotations: AnnotationTable,
    stores: HashMap<String, Arc<TileStore>>,
    chart_opacity: f64,
    ui: UiSnapshot,
    ui_tx: watch::Sender<UiSnapshot>,
}

impl<H: HostMap> RenderCoordinator<H> {
    pub fn new(host: H, boundary: BoundaryLocator, config: CoordinatorConfig) -> Self {
        let (ui_tx, _) = watch::channel(UiSnapshot::default());
        Self {
            host,
            follow: FollowController::new(config.follow.clone()),
            arbiter: GestureArbiter::new(config.programmatic_window),
            boundary,
            annotations: AnnotationTable::new(),
            stores: HashMap::new(),
            chart_opacity: config.overlay_opacity.clamp(0.0, 1.0),
            ui: UiSnapshot::default(),
            ui_tx,
            config,
        }
    }

    /// Receive every published UI snapshot.
    pub fn subscribe(&self) -> watch::Receiver<UiSnapshot> {
        self.ui_tx.subscribe()
    }

    pub fn ui(&self) -> &UiSnapshot {
        &self.ui
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn follow(&self) -> &FollowController {
        &self.follow
    }

    pub fn annotations(&self) -> &AnnotationTable {
        &self.annotations
    }

    /// Ids of packs currently open and registered.
    pub fn open_packs(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.stores.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Process one event to completion.
    pub async fn handle(&mut self, event: MapEvent, now: EventTime) {
        match event {
            MapEvent::Fix(fix) => self.on_fix(fix, now.monotonic),
            MapEvent::Gesture(phase) => self.on_gesture(phase, now.monotonic),
            MapEvent::RegionChanged => self.on_region_changed(now),
            MapEvent::Intent(intent) => self.on_intent(intent, now.monotonic),
            MapEvent::Waypoints(waypoints) => self.set_waypoints(waypoints, now),
            MapEvent::GroupPins(pins) => self.set_group_pins(pins, now),
            MapEvent::TilePacks(packs) => self.sync_tile_packs(packs).await,
            MapEvent::ChartOpacity(opacity) => self.set_chart_opacity(opacity),
            MapEvent::RecolorTick => self.refresh_pin_tints(now),
        }
        self.publish();
    }

    /// Drive the coordinator from an event channel until shutdown or until
    /// every sender is gone. Open packs are closed on the way out.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<MapEvent>,
        shutdown: CancellationToken,
    ) -> Self {
        let mut recolor = tokio::time::interval(self.config.recolor_interval);
        recolor.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Skip the first immediate tick
        recolor.tick().await;

        info!("Render coordinator started");

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("Render coordinator shutting down");
                    break;
                }

                event = events.recv() => match event {
                    Some(event) => self.handle(event, EventTime::now()).await,
                    None => {
                        debug!("Event channel closed");
                        break;
                    }
                },

                _ = recolor.tick() => {
                    self.refresh_pin_tints(EventTime::now());
                    self.publish();
                }
            }
        }

        self.close_packs();
        self
    }

    /// Reconcile open packs with the installed inventory.
    ///
    /// New packs are opened and registered, removed ones are unregistered and
    /// closed, unchanged ones are left alone. A pack that fails to open is
    /// reported once and treated as absent.
    pub async fn sync_tile_packs(&mut self, packs: Vec<TilePack>) {
        let mut desired: Vec<TilePack> = packs;
        desired.sort_by(|a, b| a.id.cmp(&b.id));
        desired.dedup_by(|a, b| a.id == b.id);

        let stale: Vec<String> = self
            .stores
            .iter()
            .filter(|(id, store)| {
                !desired
                    .iter()
                    .any(|p| &p.id == *id && p.path == store.pack().path)
            })
            .map(|(id, _)| id.clone())
            .collect();

        for id in stale {
            if let Some(store) = self.stores.remove(&id) {
                self.host.remove_overlay(&id);
                store.close();
            }
        }

        for pack in desired {
            if self.stores.contains_key(&pack.id) {
                continue;
            }
            let id = pack.id.clone();
            match TileStore::open(pack).await {
                Ok(store) => {
                    let store = Arc::new(store);
                    self.host
                        .register_overlay(TileOverlay::new(Arc::clone(&store)), self.chart_opacity);
                    self.stores.insert(id, store);
                }
                Err(e) => warn!(pack = %id, error = %e, "Tile pack unavailable"),
            }
        }
    }

    /// Close every open pack and unregister its overlay.
    pub fn close_packs(&mut self) {
        for (id, store) in self.stores.drain() {
            self.host.remove_overlay(&id);
            store.close();
        }
    }

    fn on_fix(&mut self, fix: GpsFix, now: Instant) {
        let outcome = self
            .follow
            .on_fix(&fix, now, self.arbiter.is_gesture_active());

        match outcome {
            FixOutcome::Rejected(FixRejection::InvalidCoordinate) => return,
            FixOutcome::Rejected(_) => {}
            FixOutcome::Held { target, .. } => {
                self.ui.course = format_course(target.course_deg);
            }
            FixOutcome::Apply(target) => {
                self.ui.course = format_course(target.course_deg);
                self.set_camera(target.center, None, now);
            }
        }

        // Screened-out fixes still update the readouts
        self.ui.speed = format_speed(fix.speed());
        self.update_boundary(fix.coordinate);
    }

    fn on_gesture(&mut self, phase: GesturePhase, now: Instant) {
        self.arbiter.on_gesture(phase);
        self.follow.on_user_input(now);
    }

    fn on_region_changed(&mut self, now: EventTime) {
        if self.arbiter.classify_region_change(now.monotonic) == RegionChangeSource::User {
            self.follow.on_user_input(now.monotonic);
        }

        let camera = self.host.camera();
        let diff = self.annotations.reconcile(
            AnnotationKind::Cursor,
            [Annotation::Cursor {
                coordinate: camera.center,
            }],
            now.wall,
        );
        self.apply_diff(&diff);

        self.ui.cursor_coordinate = format_coordinate(camera.center);
        self.ui.meters_per_point =
            format_meters_per_point(meters_per_point(camera.center.latitude, camera.zoom));
    }

    fn on_intent(&mut self, intent: ButtonIntent, now: Instant) {
        match intent {
            ButtonIntent::ToggleFollow => {
                if self.follow.is_following() {
                    self.follow.request_off();
                } else if self
                    .follow
                    .request_on(now, self.arbiter.is_gesture_active())
                {
                    let center = self
                        .follow
                        .target()
                        .map(|t| t.center)
                        .or_else(|| self.follow.last_fix().map(|f| f.coordinate));
                    if let Some(center) = center {
                        self.one_shot_move(center, None, now);
                    }
                }
            }
            ButtonIntent::Recenter => {
                self.follow.request_off();
                if let Some(fix) = self.follow.last_fix().copied() {
                    self.one_shot_move(fix.coordinate, None, now);
                }
            }
            ButtonIntent::ZoomIn => self.step_zoom(1.0, now),
            ButtonIntent::ZoomOut => self.step_zoom(-1.0, now),
        }
    }

    fn step_zoom(&mut self, delta: f64, now: Instant) {
        let camera = self.host.camera();
        let max_zoom = self.config.max_zoom.clamp(0.0, MAX_ZOOM as f64);
        let zoom = (camera.zoom.round() + delta).clamp(0.0, max_zoom);
        if zoom != camera.zoom {
            self.one_shot_move(camera.center, Some(zoom), now);
        }
    }

    /// Camera move outside the follow loop; counts toward follow pacing.
    fn one_shot_move(&mut self, center: GeoPoint, zoom: Option<f64>, now: Instant) {
        self.set_camera(center, zoom, now);
        self.follow.record_camera_move(center, now);
    }

    fn set_camera(&mut self, center: GeoPoint, zoom: Option<f64>, now: Instant) {
        let mut camera = self.host.camera();
        camera.center = center;
        if let Some(zoom) = zoom {
            camera.zoom = zoom;
        }
        self.arbiter.mark_programmatic(now);
        self.host.set_camera(camera);
        debug!(center = %camera.center, zoom = camera.zoom, "Camera moved");
    }

    fn update_boundary(&mut self, position: GeoPoint) {
        let query = self.boundary.locate(position);
        if let Some(change) = query.highlight {
            if let Some(previous) = change.revert {
                self.host.set_boundary_highlight(previous, false);
            }
            self.host.set_boundary_highlight(change.highlight, true);
        }
        self.ui.boundary_distance = format_distance(query.nearest.map(|n| n.distance_m));
    }

    fn set_waypoints(&mut self, waypoints: Vec<Waypoint>, now: EventTime) {
        let diff = self.annotations.reconcile(
            AnnotationKind::Waypoint,
            waypoints.into_iter().map(Annotation::Waypoint),
            now.wall,
        );
        self.apply_diff(&diff);
    }

    fn set_group_pins(&mut self, pins: Vec<GroupPin>, now: EventTime) {
        let diff = self.annotations.reconcile(
            AnnotationKind::GroupPin,
            pins.into_iter().map(Annotation::GroupPin),
            now.wall,
        );
        self.apply_diff(&diff);
    }

    fn refresh_pin_tints(&mut self, now: EventTime) {
        for id in self.annotations.refresh_tints(now.wall) {
            if let Some(record) = self.annotations.get(id) {
                self.host.update_annotation(record);
            }
        }
    }

    fn apply_diff(&mut self, diff: &ReconcileDiff) {
        for id in &diff.removed {
            self.host.remove_annotation(*id);
        }
        for id in &diff.updated {
            if let Some(record) = self.annotations.get(*id) {
                self.host.update_annotation(record);
            }
        }
        for id in &diff.added {
            if let Some(record) = self.annotations.get(*id) {
                self.host.add_annotation(record);
            }
        }
    }

    fn set_chart_opacity(&mut self, opacity: f64) {
        self.chart_opacity = opacity.clamp(0.0, 1.0);
        for id in self.stores.keys() {
            self.host.set_overlay_opacity(id, self.chart_opacity);
        }
    }

    fn publish(&mut self) {
        self.ui.follow_enabled = self.follow.is_following();
        let snapshot = self.ui.clone();
        self.ui_tx.send_if_modified(|current| {
            if *current != snapshot {
                *current = snapshot;
                true
            } else {
                false
            }
        });
    }
}
