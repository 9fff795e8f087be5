//! Nearest-boundary queries over a fixed polyline set.

use std::path::Path;

use tracing::info;

use super::geojson::{parse_polylines, GeoJsonError};
use crate::coord::{geodesic_distance_m, project, unproject, GeoPoint, MapPoint};

/// Error type for loading boundary geometry.
#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    #[error("Failed to read boundary file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse boundary file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: GeoJsonError,
    },
}

/// The closest boundary point to a query position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestBoundary {
    /// Index of the winning polyline in load order.
    pub polyline_index: usize,
    /// Closest point on that polyline.
    pub point: GeoPoint,
    /// Great-circle distance from the query position to `point`.
    pub distance_m: f64,
}

/// Highlight update produced when the winning polyline changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightChange {
    /// Polyline to highlight.
    pub highlight: usize,
    /// Previously highlighted polyline to revert, if any.
    pub revert: Option<usize>,
}

/// Result of [`BoundaryLocator::locate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryQuery {
    /// `None` means unknown (no boundaries loaded).
    pub nearest: Option<NearestBoundary>,
    pub highlight: Option<HighlightChange>,
}

#[derive(Debug, Clone)]
struct Polyline {
    projected: Vec<MapPoint>,
}

/// Locates the nearest point across an immutable set of polylines.
///
/// Segment projection happens in Web Mercator space; only the final distance
/// is computed geodesically.
#[derive(Debug, Clone, Default)]
pub struct BoundaryLocator {
    polylines: Vec<Polyline>,
    highlighted: Option<usize>,
}

impl BoundaryLocator {
    /// Build from polylines in the order they should win ties.
    pub fn new(polylines: Vec<Vec<GeoPoint>>) -> Self {
        let polylines = polylines
            .into_iter()
            .filter(|line| !line.is_empty())
            .map(|line| Polyline {
                projected: line.into_iter().map(project).collect(),
            })
            .collect();
        Self {
            polylines,
            highlighted: None,
        }
    }

    /// Parse a GeoJSON document.
    pub fn from_geojson(text: &str) -> Result<Self, GeoJsonError> {
        Ok(Self::new(parse_polylines(text)?))
    }

    /// Load a GeoJSON boundary file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BoundaryError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| BoundaryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let locator = Self::from_geojson(&text).map_err(|source| BoundaryError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        info!(
            path = %path.display(),
            polylines = locator.len(),
            "Loaded boundary geometry"
        );
        Ok(locator)
    }

    pub fn len(&self) -> usize {
        self.polylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }

    /// Currently highlighted polyline.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Closest boundary point to `position`, or `None` when nothing is loaded.
    pub fn nearest(&self, position: GeoPoint) -> Option<NearestBoundary> {
        let target = project(position);
        let mut best: Option<(usize, MapPoint, f64)> = None;

        for (index, polyline) in self.polylines.iter().enumerate() {
            let (point, d2) = closest_on_polyline(&polyline.projected, target);
            // Strict comparison keeps the earliest polyline on ties.
            if best.map_or(true, |(_, _, best_d2)| d2 < best_d2) {
                best = Some((index, point, d2));
            }
        }

        best.map(|(polyline_index, point, _)| {
            let point = unproject(point);
            NearestBoundary {
                polyline_index,
                point,
                distance_m: geodesic_distance_m(position, point),
            }
        })
    }

    /// Nearest boundary plus the highlight change it implies.
    pub fn locate(&mut self, position: GeoPoint) -> BoundaryQuery {
        let nearest = self.nearest(position);
        let winner = nearest.map(|n| n.polyline_index);

        let highlight = match winner {
            Some(index) if self.highlighted != Some(index) => {
                let change = HighlightChange {
                    highlight: index,
                    revert: self.highlighted,
                };
                self.highlighted = Some(index);
                Some(change)
            }
            _ => None,
        };

        BoundaryQuery { nearest, highlight }
    }
}

/// Closest point on a polyline and its squared planar distance.
fn closest_on_polyline(points: &[MapPoint], target: MapPoint) -> (MapPoint, f64) {
    if points.len() == 1 {
        return (points[0], points[0].distance_squared(&target));
    }

    let mut best = (points[0], f64::INFINITY);
    for segment in points.windows(2) {
        let candidate = closest_on_segment(segment[0], segment[1], target);
        let d2 = candidate.distance_squared(&target);
        if d2 < best.1 {
            best = (candidate, d2);
        }
    }
    best
}

/// Orthogonal projection of `p` onto segment `a`-`b`, clamped to the endpoints.
fn closest_on_segment(a: MapPoint, b: MapPoint, p: MapPoint) -> MapPoint {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return a;
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
    MapPoint::new(a.x + t * dx, a.y + t * dy)
}
