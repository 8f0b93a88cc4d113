//! # Terrain
//!
//! `terrain` walks geographic paths, down-samples them, and looks up
//! elevation along the way.

mod error;
mod math;
mod profile;
mod raster;
mod sampler;

pub use crate::{
    error::TerrainError,
    math::{haversine_distance, path_length, EARTH_RADIUS_M},
    profile::{Profile, ProfileBuilder},
    raster::{Raster, TileLookup},
    sampler::{
        resample, sample, sample_async, stride, ElevationSource, Sampling, DEFAULT_STEP_M,
        DEFAULT_STRIDE, MIN_STEP_M,
    },
};
pub use geo;
pub use rgbdem::{self, C};
