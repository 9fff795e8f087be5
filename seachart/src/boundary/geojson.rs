//! GeoJSON reader for boundary polylines.
//!
//! Accepts a `FeatureCollection`, a single `Feature`, or a bare geometry.
//! Line geometries become polylines as-is; polygon rings become closed
//! polylines. Points and anything unrecognised are skipped.

use serde::Deserialize;
use serde_json::Value;

use crate::coord::GeoPoint;

/// Error type for boundary file parsing.
#[derive(Debug, thiserror::Error)]
pub enum GeoJsonError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid {kind} geometry: {message}")]
    InvalidGeometry { kind: String, message: String },
}

#[derive(Debug, Deserialize)]
struct RawObject {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<RawFeature>,
    #[serde(default)]
    geometry: Option<RawGeometry>,
    #[serde(default)]
    coordinates: Value,
    #[serde(default)]
    geometries: Vec<RawGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    geometry: Option<RawGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
    #[serde(default)]
    geometries: Vec<RawGeometry>,
}

/// Parse polylines from GeoJSON text, in document order.
pub fn parse_polylines(text: &str) -> Result<Vec<Vec<GeoPoint>>, GeoJsonError> {
    let root: RawObject = serde_json::from_str(text)?;
    let mut polylines = Vec::new();

    match root.kind.as_str() {
        "FeatureCollection" => {
            for feature in &root.features {
                if let Some(geometry) = &feature.geometry {
                    collect(geometry, &mut polylines)?;
                }
            }
        }
        "Feature" => {
            if let Some(geometry) = &root.geometry {
                collect(geometry, &mut polylines)?;
            }
        }
        _ => {
            let geometry = RawGeometry {
                kind: root.kind,
                coordinates: root.coordinates,
                geometries: root.geometries,
            };
            collect(&geometry, &mut polylines)?;
        }
    }

    Ok(polylines)
}

fn collect(geometry: &RawGeometry, out: &mut Vec<Vec<GeoPoint>>) -> Result<(), GeoJsonError> {
    let invalid = |message: String| GeoJsonError::InvalidGeometry {
        kind: geometry.kind.clone(),
        message,
    };

    match geometry.kind.as_str() {
        "LineString" => {
            let line: Vec<Vec<f64>> = serde_json::from_value(geometry.coordinates.clone())?;
            push_line(&line, out).map_err(invalid)?;
        }
        "MultiLineString" | "Polygon" => {
            let lines: Vec<Vec<Vec<f64>>> =
                serde_json::from_value(geometry.coordinates.clone())?;
            for line in &lines {
                push_line(line, out).map_err(invalid)?;
            }
        }
        "MultiPolygon" => {
            let polygons: Vec<Vec<Vec<Vec<f64>>>> =
                serde_json::from_value(geometry.coordinates.clone())?;
            for ring in polygons.iter().flatten() {
                push_line(ring, out).map_err(invalid)?;
            }
        }
        "GeometryCollection" => {
            for child in &geometry.geometries {
                collect(child, out)?;
            }
        }
        other => tracing::debug!(kind = other, "Skipping non-line boundary geometry"),
    }
    Ok(())
}

fn push_line(positions: &[Vec<f64>], out: &mut Vec<Vec<GeoPoint>>) -> Result<(), String> {
    let mut line = Vec::with_capacity(positions.len());
    for position in positions {
        line.push(to_point(position)?);
    }
    if !line.is_empty() {
        out.push(line);
    }
    Ok(())
}

/// GeoJSON positions are `[longitude, latitude, (altitude)]`.
fn to_point(position: &[f64]) -> Result<GeoPoint, String> {
    let (lon, lat) = match position {
        [lon, lat, ..] => (*lon, *lat),
        _ => return Err(format!("position {:?} has fewer than two values", position)),
    };
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(format!("position ({}, {}) is out of range", lon, lat));
    }
    Ok(GeoPoint::new(lat, lon))
}
