//! Annotation value types.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::coord::GeoPoint;

/// A user-placed waypoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub id: String,
    pub name: String,
    pub coordinate: GeoPoint,
}

/// A position shared by a group member.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupPin {
    /// Remote document id.
    pub id: String,
    pub coordinate: GeoPoint,
    pub owner_id: String,
    /// Live pins track a moving vessel and are refreshed by their owner.
    pub is_live: bool,
    pub created_at: DateTime<Utc>,
    pub last_update_at: Option<DateTime<Utc>>,
}

impl GroupPin {
    /// Timestamp the pin's fade is measured from.
    ///
    /// Live pins fade from their last update; everything else from creation.
    pub fn fade_anchor(&self) -> DateTime<Utc> {
        if self.is_live {
            self.last_update_at.unwrap_or(self.created_at)
        } else {
            self.created_at
        }
    }
}

/// Anything drawn on the chart above the tiles.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    Waypoint(Waypoint),
    GroupPin(GroupPin),
    /// Crosshair position under the map center.
    Cursor { coordinate: GeoPoint },
}

impl Annotation {
    pub fn key(&self) -> AnnotationKey {
        match self {
            Annotation::Waypoint(w) => AnnotationKey::Waypoint(w.id.clone()),
            Annotation::GroupPin(p) => AnnotationKey::GroupPin(p.id.clone()),
            Annotation::Cursor { .. } => AnnotationKey::Cursor,
        }
    }

    pub fn kind(&self) -> AnnotationKind {
        match self {
            Annotation::Waypoint(_) => AnnotationKind::Waypoint,
            Annotation::GroupPin(_) => AnnotationKind::GroupPin,
            Annotation::Cursor { .. } => AnnotationKind::Cursor,
        }
    }

    pub fn coordinate(&self) -> GeoPoint {
        match self {
            Annotation::Waypoint(w) => w.coordinate,
            Annotation::GroupPin(p) => p.coordinate,
            Annotation::Cursor { coordinate } => *coordinate,
        }
    }

    /// Text shown next to the marker.
    pub fn label(&self) -> Option<&str> {
        match self {
            Annotation::Waypoint(w) => Some(&w.name),
            Annotation::GroupPin(p) => Some(&p.owner_id),
            Annotation::Cursor { .. } => None,
        }
    }
}

/// Stable identity of an annotation across reconciliations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnnotationKey {
    Waypoint(String),
    GroupPin(String),
    Cursor,
}

impl AnnotationKey {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            AnnotationKey::Waypoint(_) => AnnotationKind::Waypoint,
            AnnotationKey::GroupPin(_) => AnnotationKind::GroupPin,
            AnnotationKey::Cursor => AnnotationKind::Cursor,
        }
    }
}

impl fmt::Display for AnnotationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationKey::Waypoint(id) => write!(f, "waypoint:{id}"),
            AnnotationKey::GroupPin(id) => write!(f, "pin:{id}"),
            AnnotationKey::Cursor => write!(f, "cursor"),
        }
    }
}

/// The three independently-sourced annotation sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    Waypoint,
    GroupPin,
    Cursor,
}

/// Handle of a materialized annotation, stable for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationId(pub u64);

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
