//! Terrain-RGB PNG tile directory.

use dashmap::DashMap;
use image::{ImageError, ImageFormat};
use log::debug;
use std::{
    fs::File,
    io::{BufReader, ErrorKind},
    path::{Path, PathBuf},
    sync::Arc,
};
use terrain::{
    rgbdem::{RgbDemError, Tile},
    TileLookup,
};
use thiserror::Error;

/// `(zoom, x, y)`
type TileKey = (u8, u32, u32);

#[derive(Error, Debug)]
pub enum TileError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("no zoom {1} tiles in {0}")]
    Path(PathBuf, u8),

    #[error("{0}: {1}")]
    Image(PathBuf, #[source] ImageError),

    #[error("{0}: {1}")]
    RgbDem(PathBuf, #[source] RgbDemError),
}

pub struct Tiles {
    /// Directory containing `{z}/{x}/{y}.png` tiles.
    tile_dir: PathBuf,

    /// Tiles which have been loaded on demand.
    tiles: DashMap<TileKey, Arc<Tile>>,
}

impl Tiles {
    pub fn new(tile_dir: PathBuf, zoom: u8) -> Result<Self, TileError> {
        // Let's try to fail early by checking that tile_dir has the
        // zoom level we are going to read.
        if !tile_dir.join(zoom.to_string()).is_dir() {
            return Err(TileError::Path(tile_dir, zoom));
        }
        Ok(Self {
            tile_dir,
            tiles: DashMap::new(),
        })
    }

    /// Returns the tile at `(zoom, x, y)`.
    ///
    /// Each tile is read from disk at most once; concurrent callers
    /// asking for the same tile wait on the first load.
    pub fn get(&self, zoom: u8, x: u32, y: u32) -> Result<Arc<Tile>, TileError> {
        let key = (zoom, x, y);
        self.tiles
            .entry(key)
            .or_try_insert_with(|| match self.load_tile(key) {
                Ok(tile) => Ok(Arc::new(tile)),
                Err(TileError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                    Ok(Arc::new(Self::load_tombstone(key)))
                }
                Err(e) => Err(e),
            })
            .map(|r| r.clone())
    }

    /// Returns the number of tiles loaded so far.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }
}

impl TileLookup for Tiles {
    type Error = TileError;

    fn tile(&self, zoom: u8, x: u32, y: u32) -> Result<Arc<Tile>, TileError> {
        self.get(zoom, x, y)
    }
}

/// Private API.
impl Tiles {
    fn load_tile(&self, key: TileKey) -> Result<Tile, TileError> {
        let tile_path = tile_path(&self.tile_dir, key);
        debug!("loading {tile_path:?}");
        let file = BufReader::new(File::open(&tile_path)?);
        let rgb = image::load(file, ImageFormat::Png)
            .map_err(|e| TileError::Image(tile_path.clone(), e))?
            .to_rgb8();
        Tile::from_raw(rgb.as_raw(), 3).map_err(|e| TileError::RgbDem(tile_path, e))
    }

    fn load_tombstone(key: TileKey) -> Tile {
        debug!("loading tombstone in lieu of missing tile {key:?}");
        Tile::tombstone()
    }
}

/// Returns the expected path of the tile at `key`.
fn tile_path(tile_dir: &Path, (zoom, x, y): TileKey) -> PathBuf {
    [
        tile_dir,
        Path::new(&zoom.to_string()),
        Path::new(&x.to_string()),
        Path::new(&format!("{y}.png")),
    ]
    .iter()
    .collect()
}
