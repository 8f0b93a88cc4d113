mod haversine;
mod linspace;

pub use haversine::{haversine_distance, path_length, EARTH_RADIUS_M};
pub(crate) use linspace::linspace;
