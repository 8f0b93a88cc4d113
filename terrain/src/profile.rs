use crate::{
    math::{haversine_distance, path_length},
    sampler::{sample, sample_async, stride, ElevationSource, Sampling},
    TerrainError, C,
};
use futures::Future;
use geo::geometry::Coord;
use log::debug;
use std::time::Instant;

/// Elevation sampled along a path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Profile {
    /// Total distance along `points` in meters.
    pub distance_m: C,

    /// Sampled locations, in path order.
    pub points: Vec<Coord<C>>,

    /// Elevation at each of `points`, in meters.
    pub elevations: Vec<C>,
}

impl Profile {
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder {
            path: None,
            sampling: Sampling::All,
        }
    }

    /// Returns a profile from already known elevations.
    ///
    /// `points` and `elevations` must be index-aligned.
    pub fn from_parts(points: Vec<Coord<C>>, elevations: Vec<C>) -> Result<Self, TerrainError> {
        if points.len() != elevations.len() {
            return Err(TerrainError::Mismatch(points.len(), elevations.len()));
        }
        Ok(Self {
            distance_m: path_length(&points),
            points,
            elevations,
        })
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the distance in meters from the first point to each
    /// point.
    pub fn distances_m(&self) -> Vec<C> {
        let mut total = 0.0;
        let mut prev = self.points.first().copied();
        self.points
            .iter()
            .map(|&point| {
                if let Some(prev) = prev.replace(point) {
                    total += haversine_distance(prev, point);
                }
                total
            })
            .collect()
    }

    /// Returns a profile keeping every `k`-th sample.
    #[must_use]
    pub fn stride(&self, k: usize) -> Self {
        let points: Vec<Coord<C>> = stride(&self.points, k).collect();
        let elevations = self.elevations.iter().copied().step_by(k.max(1)).collect();
        Self {
            distance_m: path_length(&points),
            points,
            elevations,
        }
    }
}

pub struct ProfileBuilder {
    /// Path to profile (required).
    path: Option<Vec<Coord<C>>>,

    /// Which points of `path` to look up (defaults to all).
    sampling: Sampling,
}

impl ProfileBuilder {
    /// Path to profile, `(lng, lat)` ordered start to end (required).
    #[must_use]
    pub fn path(mut self, path: impl Into<Vec<Coord<C>>>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Which points of the path to look up (defaults to all).
    #[must_use]
    pub fn sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn build<S>(&self, source: &S) -> Result<Profile, TerrainError>
    where
        S: ElevationSource + ?Sized,
    {
        let path = self.path.as_ref().ok_or(TerrainError::Builder("path"))?;

        let (points, path_runtime) = {
            let now = Instant::now();
            let points = self.sampling.apply(path);
            (points, now.elapsed())
        };

        let (elevations, terrain_runtime) = {
            let now = Instant::now();
            let elevations =
                sample(&points, source).map_err(|e| TerrainError::Lookup(Box::new(e)))?;
            (elevations, now.elapsed())
        };

        debug!(
            "profile; sampling: {:?}, path len: {}, len: {}, path_exec: {:?}, terrain_exec: {:?}",
            self.sampling,
            path.len(),
            points.len(),
            path_runtime,
            terrain_runtime
        );

        Ok(Profile {
            distance_m: path_length(&points),
            points,
            elevations,
        })
    }

    /// Like [`ProfileBuilder::build`], but with an asynchronous lookup
    /// running up to `concurrency` requests at once.
    pub async fn build_async<F, Fut, E>(
        &self,
        lookup: F,
        concurrency: usize,
    ) -> Result<Profile, TerrainError>
    where
        F: FnMut(Coord<C>) -> Fut,
        Fut: Future<Output = Result<C, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let path = self.path.as_ref().ok_or(TerrainError::Builder("path"))?;
        let points = self.sampling.apply(path);

        let now = Instant::now();
        let elevations = sample_async(&points, lookup, concurrency)
            .await
            .map_err(|e| TerrainError::Lookup(Box::new(e)))?;
        debug!(
            "async profile; len: {}, concurrency: {concurrency}, terrain_exec: {:?}",
            points.len(),
            now.elapsed()
        );

        Ok(Profile {
            distance_m: path_length(&points),
            points,
            elevations,
        })
    }
}
