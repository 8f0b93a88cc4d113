use anyhow::{anyhow, Error as AnyError};
use clap::{Args, Parser, Subcommand};
use std::{path::PathBuf, str::FromStr};
use terrain::{geo::geometry::Coord, Sampling};

/// Score routes for downhill riding.
#[derive(Parser, Debug)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Args, Debug, Clone)]
pub struct RouteArgs {
    /// GeoJSON LineString, Feature, or bare array of `[lng, lat]` or
    /// `[lng, lat, elevation]` positions.
    pub path: PathBuf,

    /// Directory of Terrain-RGB PNG tiles laid out as `{z}/{x}/{y}.png`.
    ///
    /// Without it, elevation comes from 3D input positions.
    #[arg(short, long)]
    pub tile_dir: Option<PathBuf>,

    /// Tile zoom level to sample elevation at.
    #[arg(short, long, default_value_t = 12)]
    pub zoom: u8,

    /// Keep only every k-th point of the path.
    #[arg(long, conflicts_with = "step")]
    pub stride: Option<usize>,

    /// Resample the path to points this many meters apart.
    #[arg(long)]
    pub step: Option<f64>,
}

impl RouteArgs {
    pub fn sampling(&self) -> Sampling {
        match (self.stride, self.step) {
            (Some(k), _) => Sampling::Stride(k),
            (None, Some(step_m)) => Sampling::Resample { step_m },
            (None, None) => Sampling::All,
        }
    }
}

/// A "lon,lat" pair, in GeoJSON order.
#[derive(Clone, Copy, Debug)]
pub struct LonLat(pub Coord<f64>);

impl FromStr for LonLat {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let (lon_str, lat_str) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("not a valid lon,lat pair"))?;
        let lon = f64::from_str(lon_str.trim())?;
        let lat = f64::from_str(lat_str.trim())?;
        Ok(Self(Coord { x: lon, y: lat }))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print whole-route downhill statistics as JSON.
    Stats(RouteArgs),

    /// Print the elevation gain score as JSON.
    Score(RouteArgs),

    /// Print per-segment slope tiers as JSON.
    Segments(RouteArgs),

    /// Print the sampled profile as CSV.
    Csv(RouteArgs),

    /// Print the sampled profile as JSON.
    Json(RouteArgs),

    /// Plot the sampled profile to the terminal.
    Plot(RouteArgs),

    /// Print the tile and pixel containing a location.
    Locate {
        /// Location as "lon,lat".
        #[arg(long, allow_hyphen_values = true)]
        at: LonLat,

        #[arg(short, long, default_value_t = 12)]
        zoom: u8,
    },

    /// Print the elevation encoded by a Terrain-RGB pixel.
    Decode { r: u8, g: u8, b: u8 },
}
