//! Hotspot similarity scoring for shared-commute matching.
//!
//! Scores how closely two users' hotspot sets travel together in space and
//! time: both sets flatten into time-sorted point streams, a two-pointer
//! sweep pairs points whose timestamps align within a threshold, and a pair
//! counts as matched when its haversine distance is small enough. The score
//! is matched pairs over compared pairs.
//!
//! Timestamps are required: hotspots mined under the geometry-only identity
//! policy carry none, their points are skipped, and two such sets score
//! 0.0. Mine with [`crate::NodeIdentity::GeometryAndTime`] when similarity
//! scoring is the goal.

use serde::{Deserialize, Serialize};

use crate::geo_utils::haversine_distance;
use crate::Hotspot;

/// Thresholds for similarity scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityConfig {
    /// Maximum timestamp difference for two points to be compared (seconds).
    /// Default: 300 (5 minutes)
    pub time_threshold_secs: i64,
    /// Maximum haversine distance for a compared pair to count as matched
    /// (meters). Default: 100.0
    pub distance_threshold_meters: f64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            time_threshold_secs: 300,
            distance_threshold_meters: 100.0,
        }
    }
}

/// Timestamped points of a hotspot set, sorted by time.
fn point_stream(hotspots: &[Hotspot]) -> Vec<(i64, f64, f64)> {
    let mut points: Vec<(i64, f64, f64)> = hotspots
        .iter()
        .flat_map(|h| h.polyline.iter())
        .filter_map(|node| node.timestamp.map(|at| (at, node.latitude, node.longitude)))
        .collect();
    points.sort_unstable_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| a.1.total_cmp(&b.1))
            .then_with(|| a.2.total_cmp(&b.2))
    });
    points
}

/// Similarity between two hotspot sets, in `[0.0, 1.0]`.
///
/// Returns 0.0 when either side has no timestamped points or no pair of
/// points aligns in time. Pure function, no I/O.
pub fn hotspot_similarity(a: &[Hotspot], b: &[Hotspot], config: &SimilarityConfig) -> f64 {
    let stream_a = point_stream(a);
    let stream_b = point_stream(b);
    if stream_a.is_empty() || stream_b.is_empty() {
        return 0.0;
    }

    let mut index_a = 0;
    let mut index_b = 0;
    let mut matched = 0u32;
    let mut compared = 0u32;

    while index_a < stream_a.len() && index_b < stream_b.len() {
        let (at_a, lat_a, lon_a) = stream_a[index_a];
        let (at_b, lat_b, lon_b) = stream_b[index_b];
        let time_diff = (at_a - at_b).abs();

        if time_diff <= config.time_threshold_secs {
            let distance = haversine_distance(lat_a, lon_a, lat_b, lon_b);
            if distance <= config.distance_threshold_meters {
                matched += 1;
            }
            compared += 1;
            index_a += 1;
            index_b += 1;
        } else if at_a < at_b {
            index_a += 1;
        } else {
            index_b += 1;
        }
    }

    if compared == 0 {
        return 0.0;
    }
    f64::from(matched) / f64::from(compared)
}
