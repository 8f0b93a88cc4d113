//! Elevation lookup backed by Terrain-RGB raster tiles.

use crate::{sampler::ElevationSource, C};
use geo::geometry::Coord;
use rgbdem::{locate, Tile};
use std::sync::Arc;

/// Provides decoded tiles by slippy-map address.
///
/// Where tiles come from, and whether they are cached, is up to the
/// implementor.
pub trait TileLookup {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the tile at `(zoom, x, y)`.
    fn tile(&self, zoom: u8, x: u32, y: u32) -> Result<Arc<Tile>, Self::Error>;
}

/// An [`ElevationSource`] reading pixels from `tiles` at a fixed zoom
/// level.
pub struct Raster<'a, T> {
    tiles: &'a T,
    zoom: u8,
}

impl<'a, T> Raster<'a, T> {
    pub fn new(tiles: &'a T, zoom: u8) -> Self {
        Self { tiles, zoom }
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }
}

impl<T: TileLookup> ElevationSource for Raster<'_, T> {
    type Error = T::Error;

    fn elevation(&self, coord: Coord<C>) -> Result<C, Self::Error> {
        let addr = locate(coord.x, coord.y, self.zoom);
        let tile = self.tiles.tile(addr.zoom, addr.x, addr.y)?;
        Ok(tile.sample(&addr))
    }
}

#[cfg(test)]
mod tests {
    use super::{Raster, TileLookup};
    use crate::{sample, C};
    use approx::assert_relative_eq;
    use geo::coord;
    use rgbdem::{encode, locate, Tile};
    use std::{collections::HashMap, sync::Arc};
    use thiserror::Error;

    #[derive(Error, Debug)]
    #[error("missing tile {0:?}")]
    struct Missing((u8, u32, u32));

    struct FakeTiles(HashMap<(u8, u32, u32), Arc<Tile>>);

    impl TileLookup for FakeTiles {
        type Error = Missing;

        fn tile(&self, zoom: u8, x: u32, y: u32) -> Result<Arc<Tile>, Missing> {
            self.0
                .get(&(zoom, x, y))
                .cloned()
                .ok_or(Missing((zoom, x, y)))
        }
    }

    /// A tile where each pixel's elevation is `x + 1000 * y` meters.
    fn gradient_tile() -> Tile {
        let mut raw = Vec::with_capacity(256 * 256 * 3);
        for y in 0..256 {
            for x in 0..256 {
                let (r, g, b) = encode((x + 1000 * y) as C);
                raw.extend_from_slice(&[r, g, b]);
            }
        }
        Tile::from_raw(&raw, 3).unwrap()
    }

    #[test]
    fn test_raster_elevation() {
        let mt_washington = coord!(x: -71.30325, y: 44.2705);
        let addr = locate(mt_washington.x, mt_washington.y, 12);
        let tiles = FakeTiles(HashMap::from([(addr.tile_key(), Arc::new(gradient_tile()))]));
        let raster = Raster::new(&tiles, 12);

        let elevations = sample(&[mt_washington], &raster).unwrap();
        // Pixel (186, 25).
        assert_relative_eq!(elevations[0], 25_186.0, epsilon = 1e-6);
    }

    #[test]
    fn test_raster_missing_tile() {
        let tiles = FakeTiles(HashMap::new());
        let raster = Raster::new(&tiles, 3);
        let err = sample(&[coord!(x: 0.0, y: 0.0)], &raster).unwrap_err();
        assert_eq!(err.0, (3, 4, 4));
    }
}
