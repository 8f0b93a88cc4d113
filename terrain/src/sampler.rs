//! Down-sampling paths and looking up their elevation.

use crate::{
    math::{haversine_distance, linspace},
    C,
};
use futures::{stream, Future, StreamExt, TryStreamExt};
use geo::geometry::Coord;
use itertools::Itertools;
use std::convert::Infallible;

/// Default number of points between kept samples for
/// [`Sampling::Stride`].
pub const DEFAULT_STRIDE: usize = 10;

/// Default spacing, in meters, for [`Sampling::Resample`].
pub const DEFAULT_STEP_M: C = 15.0;

/// Smallest spacing, in meters, [`resample`] will interpolate at.
pub const MIN_STEP_M: C = 1.0;

/// Something which knows the elevation at a coordinate.
pub trait ElevationSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns elevation in meters at `coord`.
    fn elevation(&self, coord: Coord<C>) -> Result<C, Self::Error>;
}

impl<F> ElevationSource for F
where
    F: Fn(Coord<C>) -> C,
{
    type Error = Infallible;

    fn elevation(&self, coord: Coord<C>) -> Result<C, Self::Error> {
        Ok(self(coord))
    }
}

/// How to pick points from a path before looking up elevation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Sampling {
    /// Every point of the path.
    #[default]
    All,

    /// Every k-th point, starting with the first.
    Stride(usize),

    /// Points interpolated roughly `step_m` meters apart.
    Resample { step_m: C },
}

impl Sampling {
    /// [`Sampling::Stride`] with [`DEFAULT_STRIDE`].
    pub fn stride() -> Self {
        Self::Stride(DEFAULT_STRIDE)
    }

    /// [`Sampling::Resample`] with [`DEFAULT_STEP_M`].
    pub fn resample() -> Self {
        Self::Resample {
            step_m: DEFAULT_STEP_M,
        }
    }

    /// Returns the points of `path` selected by this policy.
    pub fn apply(&self, path: &[Coord<C>]) -> Vec<Coord<C>> {
        match *self {
            Self::All => path.to_vec(),
            Self::Stride(k) => stride(path, k).collect(),
            Self::Resample { step_m } => resample(path, step_m),
        }
    }
}

/// Returns an iterator over every `k`-th point in `path`, starting
/// with the first.
///
/// A `k` of 0 is treated as 1. Clone the iterator to walk it again.
pub fn stride(path: &[Coord<C>], k: usize) -> impl ExactSizeIterator<Item = Coord<C>> + Clone + '_ {
    path.iter().copied().step_by(k.max(1))
}

/// Returns `path` with points linearly interpolated so that
/// consecutive points are at most `step_m` meters apart.
///
/// Every input point is kept, except repeats that follow a
/// zero-length segment. The first and last points are always exactly
/// those of `path`. A `step_m` below [`MIN_STEP_M`], or non-finite,
/// returns `path` unchanged.
pub fn resample(path: &[Coord<C>], step_m: C) -> Vec<Coord<C>> {
    let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
        return Vec::new();
    };
    if path.len() < 2 || !(step_m >= MIN_STEP_M && step_m.is_finite()) {
        return path.to_vec();
    }

    let mut points = Vec::with_capacity(path.len());
    points.push(first);

    for (a, b) in path.iter().copied().tuple_windows() {
        let distance_m = haversine_distance(a, b);
        if !(distance_m > 0.0) {
            continue;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = (distance_m / step_m).ceil() as usize;
        points.extend(
            linspace(0.0, 1.0, steps + 1)
                .skip(1)
                .take(steps.saturating_sub(1))
                .map(|f| lerp(a, b, f)),
        );
        points.push(b);
    }

    if points.last() != Some(&last) {
        points.push(last);
    }

    points
}

/// Returns the elevation of each point, in order.
///
/// Stops at the first failed lookup.
pub fn sample<S>(points: &[Coord<C>], source: &S) -> Result<Vec<C>, S::Error>
where
    S: ElevationSource + ?Sized,
{
    points.iter().map(|&point| source.elevation(point)).collect()
}

/// Returns the elevation of each point, in order, running up to
/// `concurrency` lookups at a time.
///
/// Lookups may complete in any order; the output is always
/// index-aligned with `points`.
pub async fn sample_async<F, Fut, E>(
    points: &[Coord<C>],
    lookup: F,
    concurrency: usize,
) -> Result<Vec<C>, E>
where
    F: FnMut(Coord<C>) -> Fut,
    Fut: Future<Output = Result<C, E>>,
{
    stream::iter(points.iter().copied())
        .map(lookup)
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}

fn lerp(a: Coord<C>, b: Coord<C>, f: C) -> Coord<C> {
    Coord {
        x: a.x + (b.x - a.x) * f,
        y: a.y + (b.y - a.y) * f,
    }
}
