use crate::{
    error::DownhillError,
    segments::{classify, Segment},
    stats::{analyze, score_elevation, GainScore, RouteStats},
};
use terrain::{geo::geometry::Coord, ElevationSource, Profile, Sampling, C};

/// Everything known about a candidate route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteReport {
    /// Sampled elevation along the route.
    pub profile: Profile,

    /// Whole-route downhill statistics.
    pub stats: RouteStats,

    /// Whole-route climbing score.
    pub gain: GainScore,

    /// Per-segment slope tiers, in route order.
    pub segments: Vec<Segment>,
}

impl RouteReport {
    pub fn builder() -> RouteReportBuilder {
        RouteReportBuilder {
            path: None,
            sampling: Sampling::All,
        }
    }
}

impl From<Profile> for RouteReport {
    fn from(profile: Profile) -> Self {
        let stats = analyze(&profile.elevations);
        let gain = score_elevation(&profile.elevations);
        let segments = classify(&profile.elevations, &profile.points);
        Self {
            profile,
            stats,
            gain,
            segments,
        }
    }
}

pub struct RouteReportBuilder {
    /// Route, `(lng, lat)` ordered start to end (required).
    path: Option<Vec<Coord<C>>>,

    /// Which points of `path` to look up (defaults to all).
    sampling: Sampling,
}

impl RouteReportBuilder {
    /// Route, `(lng, lat)` ordered start to end (required).
    #[must_use]
    pub fn path(mut self, path: impl Into<Vec<Coord<C>>>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Which points of the route to look up (defaults to all).
    #[must_use]
    pub fn sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn build<S>(&self, source: &S) -> Result<RouteReport, DownhillError>
    where
        S: ElevationSource + ?Sized,
    {
        let path = self.path.clone().ok_or(DownhillError::Builder("path"))?;
        let profile = Profile::builder()
            .path(path)
            .sampling(self.sampling)
            .build(source)?;
        Ok(RouteReport::from(profile))
    }
}
