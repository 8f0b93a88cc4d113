//! Whole-route elevation statistics and difficulty tiers.

use itertools::Itertools;
use serde::Serialize;
use std::fmt;
use terrain::C;

/// Minimum total descent, in meters, for a route to count as downhill.
pub const MIN_DESCENT_M: C = 30.0;

/// Minimum fraction of descending segments for a route to count as
/// downhill.
pub const MIN_DOWNHILL_RATIO: C = 0.6;

/// Downhill routes are easy below this total descent (meters)...
pub const EASY_MAX_DESCENT_M: C = 150.0;
/// ...and this largest single-segment drop (meters).
pub const EASY_MAX_DROP_M: C = 20.0;

/// Downhill routes are medium below this total descent (meters)...
pub const MEDIUM_MAX_DESCENT_M: C = 350.0;
/// ...and this largest single-segment drop (meters).
pub const MEDIUM_MAX_DROP_M: C = 50.0;

/// [`score_elevation`] is easy below this total gain (meters).
pub const EASY_MAX_GAIN_M: C = 20.0;

/// [`score_elevation`] is medium below this total gain (meters).
pub const MEDIUM_MAX_GAIN_M: C = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        };
        f.write_str(s)
    }
}

/// Summary of an elevation profile.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStats {
    /// Sum of all climbs, in meters.
    pub total_ascent: C,

    /// Sum of all drops, in meters.
    pub total_descent: C,

    /// Fraction of segments which descend, in `[0, 1]`.
    pub downhill_ratio: C,

    /// Largest single-segment drop, in meters.
    pub max_drop: C,

    pub is_downhill: bool,

    /// Always [`Difficulty::Easy`] unless `is_downhill`.
    pub difficulty: Difficulty,
}

/// Returns statistics for the elevation profile `elevations`.
///
/// Profiles with fewer than two samples have no segments and yield
/// all-zero stats. NaN samples contribute nothing but still count as
/// a segment.
pub fn analyze(elevations: &[C]) -> RouteStats {
    if elevations.len() < 2 {
        return RouteStats::default();
    }

    let mut stats = RouteStats::default();
    let mut downhill_segments = 0_usize;

    for (curr, next) in elevations.iter().copied().tuple_windows() {
        let delta = next - curr;
        if delta > 0.0 {
            stats.total_ascent += delta;
        } else if delta < 0.0 {
            let drop = -delta;
            stats.total_descent += drop;
            downhill_segments += 1;
            if drop > stats.max_drop {
                stats.max_drop = drop;
            }
        }
    }

    let total_segments = elevations.len() - 1;
    #[allow(clippy::cast_precision_loss)]
    let downhill_ratio = downhill_segments as C / total_segments as C;
    stats.downhill_ratio = downhill_ratio;
    stats.is_downhill =
        stats.total_descent >= MIN_DESCENT_M && stats.downhill_ratio >= MIN_DOWNHILL_RATIO;
    stats.difficulty = if stats.is_downhill {
        downhill_difficulty(stats.total_descent, stats.max_drop)
    } else {
        Difficulty::Easy
    };

    stats
}

fn downhill_difficulty(total_descent: C, max_drop: C) -> Difficulty {
    if total_descent < EASY_MAX_DESCENT_M && max_drop < EASY_MAX_DROP_M {
        Difficulty::Easy
    } else if total_descent < MEDIUM_MAX_DESCENT_M && max_drop < MEDIUM_MAX_DROP_M {
        Difficulty::Medium
    } else {
        Difficulty::Hard
    }
}

/// Total climb and the tier it implies.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GainScore {
    /// Sum of all climbs, in meters.
    pub total_gain: C,
    pub difficulty: Difficulty,
}

/// Scores `elevations` by total elevation gain alone.
///
/// Unlike [`analyze`] there is no downhill gating; this is meant for
/// short samples where only the climb matters.
pub fn score_elevation(elevations: &[C]) -> GainScore {
    let total_gain: C = elevations
        .iter()
        .copied()
        .tuple_windows()
        .map(|(curr, next)| next - curr)
        .filter(|delta| *delta > 0.0)
        .fold(0.0, |total, delta| total + delta);

    let difficulty = if total_gain < EASY_MAX_GAIN_M {
        Difficulty::Easy
    } else if total_gain < MEDIUM_MAX_GAIN_M {
        Difficulty::Medium
    } else {
        Difficulty::Hard
    };

    GainScore {
        total_gain,
        difficulty,
    }
}

/// The two whole-route tiering policies.
///
/// They disagree on purpose and are kept apart: `Downhill` answers "is
/// this worth calling a downhill route, and how hard", `Gain` scores
/// raw climbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Policy {
    /// [`analyze`].
    #[default]
    Downhill,

    /// [`score_elevation`].
    Gain,
}

impl Policy {
    /// Returns the tier `elevations` falls into under this policy.
    pub fn difficulty(&self, elevations: &[C]) -> Difficulty {
        match self {
            Self::Downhill => analyze(elevations).difficulty,
            Self::Gain => score_elevation(elevations).difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{analyze, score_elevation, Difficulty, GainScore, Policy, RouteStats};
    use approx::assert_relative_eq;

    #[test]
    fn test_short_profiles_are_zero() {
        for elevations in [&[][..], &[1234.0][..]] {
            assert_eq!(analyze(elevations), RouteStats::default());
            let stats = analyze(elevations);
            assert!(!stats.is_downhill);
            assert_eq!(stats.difficulty, Difficulty::Easy);
        }
    }

    #[test]
    fn test_monotonic_descent() {
        let stats = analyze(&[100.0, 80.0, 60.0, 40.0]);
        assert_eq!(
            stats,
            RouteStats {
                total_ascent: 0.0,
                total_descent: 60.0,
                downhill_ratio: 1.0,
                max_drop: 20.0,
                is_downhill: true,
                // 20 m drop is not below the easy limit.
                difficulty: Difficulty::Medium,
            }
        );
    }

    #[test]
    fn test_flat() {
        let stats = analyze(&[100.0, 100.0, 100.0]);
        assert_eq!(stats, RouteStats::default());
    }

    #[test]
    fn test_tiers() {
        // 10 m steps, 140 m total.
        let easy: Vec<f64> = (0..15).map(|i| 1000.0 - 10.0 * f64::from(i)).collect();
        assert_eq!(analyze(&easy).difficulty, Difficulty::Easy);

        // Small steps but lots of descent.
        let long: Vec<f64> = (0..40).map(|i| 1000.0 - 10.0 * f64::from(i)).collect();
        assert_eq!(analyze(&long).difficulty, Difficulty::Hard);

        // One 60 m plunge.
        let cliff = [500.0, 495.0, 435.0, 430.0];
        let stats = analyze(&cliff);
        assert!(stats.is_downhill);
        assert_eq!(stats.max_drop, 60.0);
        assert_eq!(stats.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_not_downhill_is_easy() {
        // Plenty of descent, but mostly climbing segments.
        let stats = analyze(&[0.0, 10.0, 20.0, 30.0, 500.0, 0.0]);
        assert_relative_eq!(stats.downhill_ratio, 0.2);
        assert_eq!(stats.max_drop, 500.0);
        assert!(!stats.is_downhill);
        assert_eq!(stats.difficulty, Difficulty::Easy);

        // Mostly descending segments, but under 30 m in total.
        let stats = analyze(&[50.0, 45.0, 40.0, 35.0, 30.0, 25.0]);
        assert_relative_eq!(stats.total_descent, 25.0);
        assert!(!stats.is_downhill);
    }

    #[test]
    fn test_invariants() {
        let profiles: [&[f64]; 4] = [
            &[10.0, 12.5, 9.0, 9.0, 30.0, 1.0],
            &[-5.0, -40.0, 200.0],
            &[3.0, 3.0],
            &[8848.0, 0.0, 8848.0, 0.0],
        ];
        for elevations in profiles {
            let stats = analyze(elevations);
            assert!(stats.total_ascent >= 0.0);
            assert!(stats.total_descent >= 0.0);
            assert!((0.0..=1.0).contains(&stats.downhill_ratio));
            let net = elevations[elevations.len() - 1] - elevations[0];
            assert_relative_eq!(stats.total_ascent - stats.total_descent, net, epsilon = 1e-9);
            assert_eq!(stats, analyze(elevations));
        }
    }

    #[test]
    fn test_nan_falls_back_to_easy() {
        let stats = analyze(&[100.0, f64::NAN, 0.0]);
        assert_eq!(stats.total_descent, 0.0);
        assert!(!stats.is_downhill);
        assert_eq!(stats.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_score_elevation() {
        assert_eq!(score_elevation(&[]), GainScore::default());
        assert_eq!(score_elevation(&[0.0, 19.0, 5.0]).difficulty, Difficulty::Easy);
        let score = score_elevation(&[0.0, 19.0, 5.0, 10.0]);
        assert_relative_eq!(score.total_gain, 24.0);
        assert_eq!(score.difficulty, Difficulty::Medium);
        assert_eq!(score_elevation(&[0.0, 80.0]).difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_policies_disagree() {
        // A steep climb: not a downhill route, but hard climbing.
        let climb = [0.0, 50.0, 100.0];
        assert_eq!(Policy::Downhill.difficulty(&climb), Difficulty::Easy);
        assert_eq!(Policy::Gain.difficulty(&climb), Difficulty::Hard);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(analyze(&[100.0, 80.0, 60.0, 40.0])).unwrap();
        assert_eq!(json["totalDescent"], 60.0);
        assert_eq!(json["isDownhill"], true);
        assert_eq!(json["difficulty"], "medium");
    }
}
