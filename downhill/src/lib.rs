//! # Downhill
//!
//! `downhill` decides whether a route is worth calling a downhill
//! route and how hard it is, both as a whole and segment by segment.

mod error;
pub mod report;
pub mod segments;
pub mod stats;

pub use crate::{
    error::DownhillError,
    report::RouteReport,
    segments::{classify, Segment, SegmentDifficulty},
    stats::{analyze, score_elevation, Difficulty, GainScore, Policy, RouteStats},
};
pub use terrain;
