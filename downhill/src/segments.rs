//! Per-segment slope classification, for coloring a route along its
//! length.

use itertools::Itertools;
use log::warn;
use serde::Serialize;
use std::fmt;
use terrain::{geo::geometry::Coord, haversine_distance, C};

/// Slopes with a magnitude below this are flat.
pub const SLOPE_EPSILON: C = 0.001;

/// Descents steeper than this are at least medium.
pub const EASY_DOWNHILL: C = -0.003;

/// Descents steeper than this are hard.
pub const STEEP_DOWNHILL: C = -0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentDifficulty {
    Easy,
    Medium,
    Hard,
    Uphill,
}

impl fmt::Display for SegmentDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Uphill => "uphill",
        };
        f.write_str(s)
    }
}

/// Two adjacent route points and how hard it is to ride between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Coord<C>,
    pub end: Coord<C>,

    /// Rise over run, dimensionless.
    pub slope: C,

    pub difficulty: SegmentDifficulty,
}

/// Returns the tier for a segment with the given rise over run.
pub fn slope_difficulty(slope: C) -> SegmentDifficulty {
    if slope.abs() < SLOPE_EPSILON {
        SegmentDifficulty::Easy
    } else if slope > SLOPE_EPSILON {
        SegmentDifficulty::Uphill
    } else if slope < STEEP_DOWNHILL {
        SegmentDifficulty::Hard
    } else if slope < EASY_DOWNHILL {
        SegmentDifficulty::Medium
    } else {
        SegmentDifficulty::Easy
    }
}

/// Classifies each consecutive pair of `coords` by its slope.
///
/// `elevations` must be index-aligned with `coords`; if their lengths
/// differ only the common prefix is used. Pairs with no horizontal
/// distance between them are skipped, so the output may be shorter
/// than `coords.len() - 1`.
pub fn classify(elevations: &[C], coords: &[Coord<C>]) -> Vec<Segment> {
    if elevations.len() != coords.len() {
        warn!(
            "classify; {} elevations for {} coords, using common prefix",
            elevations.len(),
            coords.len()
        );
    }

    elevations
        .iter()
        .copied()
        .zip(coords.iter().copied())
        .tuple_windows()
        .filter_map(|((prev_elev, start), (elev, end))| {
            let distance_m = haversine_distance(start, end);
            if distance_m == 0.0 {
                return None;
            }
            let slope = (elev - prev_elev) / distance_m;
            Some(Segment {
                start,
                end,
                slope,
                difficulty: slope_difficulty(slope),
            })
        })
        .collect()
}
