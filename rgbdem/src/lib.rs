//! Terrain-RGB elevation tiles.
//!
//! Elevation is packed into the three 8-bit color channels of a raster
//! tile as a 24-bit unsigned integer counting 0.1 m steps above
//! -10000 m. Tiles are addressed with the standard Web-Mercator
//! slippy-map pyramid, 256×256 pixels per tile.
//!
//! # References
//!
//! 1. [Mapbox Terrain-RGB](https://docs.mapbox.com/data/tilesets/reference/mapbox-terrain-rgb-v1/)
//! 1. [Slippy map tilenames](https://wiki.openstreetmap.org/wiki/Slippy_map_tilenames)

mod address;
mod error;

pub use crate::{
    address::{locate, TileAddress, TILE_SIZE},
    error::RgbDemError,
};

/// Base floating point type used for all coordinates and elevations.
pub type C = f64;

/// Elevation of an all-zero pixel.
const BASE_ELEVATION_M: C = -10_000.0;

/// Meters per unit of the packed 24-bit value.
const METERS_PER_UNIT: C = 0.1;

/// Largest value representable in three 8-bit channels.
const MAX_PACKED: u32 = 0x00FF_FFFF;

const PIXELS_PER_TILE: usize = (TILE_SIZE * TILE_SIZE) as usize;

/// Returns the elevation, in meters, encoded by an `(r, g, b)` pixel.
pub fn decode(r: u8, g: u8, b: u8) -> C {
    let packed = (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
    BASE_ELEVATION_M + C::from(packed) * METERS_PER_UNIT
}

/// Returns the `(r, g, b)` pixel closest to `elevation`.
///
/// Elevations outside of the representable range saturate.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn encode(elevation: C) -> (u8, u8, u8) {
    let units = ((elevation - BASE_ELEVATION_M) / METERS_PER_UNIT).round();
    let packed = units.max(0.0).min(C::from(MAX_PACKED)) as u32;
    (
        (packed >> 16) as u8,
        (packed >> 8) as u8,
        packed as u8,
    )
}

/// A decoded Terrain-RGB tile.
pub struct Tile {
    /// Elevation samples.
    samples: SampleStore,
}

enum SampleStore {
    Tombstone,
    InMem(Box<[C]>),
}

impl SampleStore {
    fn get_unchecked(&self, index: usize) -> C {
        match self {
            Self::Tombstone => 0.0,
            Self::InMem(samples) => samples[index],
        }
    }

    fn min(&self) -> C {
        match self {
            Self::Tombstone => 0.0,
            Self::InMem(samples) => samples.iter().copied().fold(C::INFINITY, C::min),
        }
    }

    fn max(&self) -> C {
        match self {
            Self::Tombstone => 0.0,
            Self::InMem(samples) => samples.iter().copied().fold(C::NEG_INFINITY, C::max),
        }
    }
}

impl Tile {
    /// Returns a Tile decoded from an interleaved, row-major pixel
    /// buffer with `channels` bytes per pixel.
    ///
    /// Channels beyond the first three (e.g. alpha) are ignored.
    pub fn from_raw(raw: &[u8], channels: usize) -> Result<Self, RgbDemError> {
        if channels < 3 {
            return Err(RgbDemError::Channels(channels));
        }
        let expected_len = PIXELS_PER_TILE * channels;
        if raw.len() != expected_len {
            return Err(RgbDemError::RasterLen(raw.len(), expected_len));
        }
        let samples = raw
            .chunks_exact(channels)
            .map(|px| decode(px[0], px[1], px[2]))
            .collect::<Vec<C>>()
            .into_boxed_slice();
        Ok(Self {
            samples: SampleStore::InMem(samples),
        })
    }

    /// Returns a tile which reads 0 m everywhere.
    ///
    /// Used in lieu of tiles the caller could not find.
    pub fn tombstone() -> Self {
        Self {
            samples: SampleStore::Tombstone,
        }
    }

    /// Returns true if this tile has no backing data.
    pub fn is_tombstone(&self) -> bool {
        matches!(self.samples, SampleStore::Tombstone)
    }

    /// Returns the number of samples in this tile.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        PIXELS_PER_TILE
    }

    /// Returns the lowest elevation sample in this tile.
    pub fn min_elevation(&self) -> C {
        self.samples.min()
    }

    /// Returns the highest elevation sample in this tile.
    pub fn max_elevation(&self) -> C {
        self.samples.max()
    }

    /// Returns the sample at pixel `(x, y)`, where `(0, 0)` is the
    /// north-west corner.
    pub fn get(&self, x: u16, y: u16) -> Option<C> {
        if u32::from(x) < TILE_SIZE && u32::from(y) < TILE_SIZE {
            Some(self.get_unchecked(x, y))
        } else {
            None
        }
    }

    /// Returns the sample at pixel `(x, y)` without bounds checking
    /// against the tile dimensions.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is `TILE_SIZE` or more on a tile with
    /// data. Tombstones read 0 m for any pixel.
    pub fn get_unchecked(&self, x: u16, y: u16) -> C {
        let idx = usize::from(y) * TILE_SIZE as usize + usize::from(x);
        self.samples.get_unchecked(idx)
    }

    /// Returns the sample addressed by `addr`.
    ///
    /// Only the pixel part of the address is used; callers are
    /// expected to have picked the matching tile.
    pub fn sample(&self, addr: &TileAddress) -> C {
        self.get_unchecked(addr.pixel_x, addr.pixel_y)
    }
}
