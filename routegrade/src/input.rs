//! Route input files.

use anyhow::{anyhow, bail, Error as AnyError};
use serde::Deserialize;
use std::path::Path;
use terrain::{geo::geometry::Coord, C};

/// A route read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// `(lng, lat)` points, start to end.
    pub path: Vec<Coord<C>>,

    /// Elevation of each point, if every input position had one.
    pub elevations: Option<Vec<C>>,
}

/// A GeoJSON position: `[lng, lat]` or `[lng, lat, elevation]`.
type Position = Vec<C>;

#[derive(Deserialize)]
#[serde(untagged)]
enum RouteJson {
    Feature { geometry: Geometry },
    Geometry(Geometry),
    Positions(Vec<Position>),
}

#[derive(Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Vec<Position>,
}

pub fn read_route(path: &Path) -> Result<Route, AnyError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read {}: {e}", path.display()))?;
    parse_route(&json)
}

pub fn parse_route(json: &str) -> Result<Route, AnyError> {
    let positions = match serde_json::from_str(json)? {
        RouteJson::Feature { geometry } | RouteJson::Geometry(geometry) => {
            if geometry.kind != "LineString" {
                bail!("expected a LineString, got {}", geometry.kind);
            }
            geometry.coordinates
        }
        RouteJson::Positions(positions) => positions,
    };

    let mut path = Vec::with_capacity(positions.len());
    let mut elevations = Vec::with_capacity(positions.len());
    for (idx, position) in positions.iter().enumerate() {
        match position[..] {
            [x, y] => path.push(Coord { x, y }),
            [x, y, elevation] => {
                path.push(Coord { x, y });
                elevations.push(elevation);
            }
            _ => bail!("position {idx} has {} values", position.len()),
        }
    }

    let elevations = (!path.is_empty() && elevations.len() == path.len()).then_some(elevations);
    Ok(Route { path, elevations })
}

#[cfg(test)]
mod tests {
    use super::parse_route;

    #[test]
    fn test_parse_feature() {
        let route = parse_route(
            r#"{
                "type": "Feature",
                "properties": {"name": "Tuckerman"},
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-71.30, 44.27, 1800.0], [-71.29, 44.26, 1500.5]]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(route.path.len(), 2);
        assert_eq!((route.path[1].x, route.path[1].y), (-71.29, 44.26));
        assert_eq!(route.elevations, Some(vec![1800.0, 1500.5]));
    }

    #[test]
    fn test_parse_geometry_and_bare_positions() {
        let route =
            parse_route(r#"{"type": "LineString", "coordinates": [[0, 0], [0, 0.001]]}"#).unwrap();
        assert_eq!(route.path.len(), 2);
        assert_eq!(route.elevations, None);

        // Mixed 2D and 3D positions don't make a usable profile.
        let route = parse_route("[[0, 0, 10], [0, 0.001]]").unwrap();
        assert_eq!(route.elevations, None);

        let route = parse_route("[]").unwrap();
        assert!(route.path.is_empty());
        assert_eq!(route.elevations, None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_route(r#"{"type": "Point", "coordinates": [[0, 0]]}"#).is_err());
        assert!(parse_route("[[0]]").is_err());
        assert!(parse_route("{").is_err());
    }
}
