//! Web-Mercator tile addressing.

use crate::C;
use std::f64::consts::PI;

/// Pixels along each edge of a tile.
pub const TILE_SIZE: u32 = 256;

/// Location of a single pixel in the slippy-map tile pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileAddress {
    pub zoom: u8,
    /// Tile column, west to east.
    pub x: u32,
    /// Tile row, north to south.
    pub y: u32,
    pub pixel_x: u16,
    pub pixel_y: u16,
}

impl TileAddress {
    /// Returns `(zoom, x, y)`, the address of the containing tile.
    pub fn tile_key(&self) -> (u8, u32, u32) {
        (self.zoom, self.x, self.y)
    }
}

/// Returns the address of the pixel containing `(lng, lat)` at
/// `zoom`.
///
/// Out-of-range input, including the poles where the projection is
/// singular, is clamped onto the nearest valid tile and pixel.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn locate(lng: C, lat: C, zoom: u8) -> TileAddress {
    let n = C::from(zoom).exp2();
    let max_tile = n - 1.0;

    let x_float = (lng + 180.0) / 360.0 * n;
    let y_float = {
        let lat_rad = lat.to_radians();
        (1.0 - (lat_rad.tan() + lat_rad.cos().recip()).ln() / PI) / 2.0 * n
    };

    let x = clamp_floor(x_float, max_tile);
    let y = clamp_floor(y_float, max_tile);
    let pixel_x = clamp_floor((x_float - x) * C::from(TILE_SIZE), C::from(TILE_SIZE - 1));
    let pixel_y = clamp_floor((y_float - y) * C::from(TILE_SIZE), C::from(TILE_SIZE - 1));

    TileAddress {
        zoom,
        x: x as u32,
        y: y as u32,
        pixel_x: pixel_x as u16,
        pixel_y: pixel_y as u16,
    }
}

/// Floors `val` into `[0, max]`. NaN maps to 0.
fn clamp_floor(val: C, max: C) -> C {
    val.floor().max(0.0).min(max)
}

#[cfg(test)]
mod tests {
    use super::{locate, TileAddress};

    #[test]
    fn test_locate_origin() {
        assert_eq!(
            locate(0.0, 0.0, 0),
            TileAddress {
                zoom: 0,
                x: 0,
                y: 0,
                pixel_x: 128,
                pixel_y: 128,
            }
        );
        let addr = locate(0.0, 0.0, 1);
        assert_eq!((addr.x, addr.y, addr.pixel_x, addr.pixel_y), (1, 1, 0, 0));
    }

    #[test]
    fn test_locate_mt_washington() {
        let addr = locate(-71.30325, 44.2705, 12);
        assert_eq!(addr.tile_key(), (12, 1236, 1485));
        assert_eq!((addr.pixel_x, addr.pixel_y), (186, 25));
    }

    #[test]
    fn test_locate_antimeridian_clamps() {
        let east = locate(180.0, 0.0, 2);
        assert_eq!((east.x, east.pixel_x), (3, 255));
        let west = locate(-180.0, 0.0, 2);
        assert_eq!((west.x, west.pixel_x), (0, 0));
    }

    #[test]
    fn test_locate_poles_stay_in_range() {
        let north = locate(0.0, 90.0, 3);
        assert_eq!((north.y, north.pixel_y), (0, 0));

        for lat in [-90.0, -89.999_999, 89.999_999, f64::NAN] {
            let addr = locate(0.0, lat, 3);
            assert!(addr.y <= 7, "lat {lat} gave row {}", addr.y);
            assert!(addr.pixel_y <= 255);
        }

        let nan = locate(f64::NAN, f64::NAN, 5);
        assert_eq!((nan.x, nan.y, nan.pixel_x, nan.pixel_y), (0, 0, 0, 0));
    }
}
