//! Great-circle distance on a spherical earth.
//!
//! Uses a 6371 km sphere rather than the IUGG mean radius used by
//! [geo]'s `HaversineDistance`; slope thresholds in `downhill` assume
//! this radius.

use crate::C;
use geo::geometry::Coord;
use itertools::Itertools;

/// Radius of the spherical earth model, in meters.
pub const EARTH_RADIUS_M: C = 6_371_000.0;

/// Returns the great-circle distance in meters between two `(lng,
/// lat)` coordinates.
pub fn haversine_distance(a: Coord<C>, b: Coord<C>) -> C {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (b.x - a.x).to_radians();
    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Returns the summed haversine length of `path` in meters.
pub fn path_length(path: &[Coord<C>]) -> C {
    path.iter()
        .copied()
        .tuple_windows()
        .map(|(a, b)| haversine_distance(a, b))
        .sum()
}
