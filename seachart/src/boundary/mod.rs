//! Navigational boundary geometry and nearest-boundary lookup.
//!
//! Boundaries are loaded once from a GeoJSON file and never change. Each
//! query returns the closest point across all polylines together with the
//! polyline that should be highlighted on the chart.

mod geojson;
mod locator;

pub use geojson::{parse_polylines, GeoJsonError};
pub use locator::{BoundaryError, BoundaryLocator, BoundaryQuery, HighlightChange, NearestBoundary};
