use thiserror::Error;

#[derive(Error, Debug)]
pub enum RgbDemError {
    #[error("terrain-rgb needs at least 3 channels, got {0}")]
    Channels(usize),

    #[error("invalid raster len {0}, expected {1}")]
    RasterLen(usize, usize),
}
