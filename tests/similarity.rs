//! Tests for hotspot similarity scoring

use pathmine::{hotspot_similarity, Hotspot, PathNode, SimilarityConfig};

fn hotspot(coords: &[(f64, f64, Option<i64>)]) -> Hotspot {
    Hotspot {
        id: "hs_0".to_string(),
        polyline: coords
            .iter()
            .map(|&(latitude, longitude, timestamp)| PathNode {
                latitude,
                longitude,
                timestamp,
            })
            .collect(),
        support: 2,
        trajectory_ids: vec!["t1".to_string()],
    }
}

#[test]
fn identical_sets_score_one() {
    let set = vec![hotspot(&[
        (47.0, 8.0, Some(0)),
        (47.001, 8.001, Some(60)),
        (47.002, 8.002, Some(120)),
    ])];
    let score = hotspot_similarity(&set, &set, &SimilarityConfig::default());
    assert!((score - 1.0).abs() < f64::EPSILON);
}

#[test]
fn empty_side_scores_zero() {
    let set = vec![hotspot(&[(47.0, 8.0, Some(0)), (47.001, 8.001, Some(60))])];
    assert_eq!(hotspot_similarity(&set, &[], &SimilarityConfig::default()), 0.0);
    assert_eq!(hotspot_similarity(&[], &set, &SimilarityConfig::default()), 0.0);
}

#[test]
fn geometry_only_hotspots_score_zero() {
    // No timestamps: nothing to align, documented to score 0.
    let set = vec![hotspot(&[(47.0, 8.0, None), (47.001, 8.001, None)])];
    assert_eq!(
        hotspot_similarity(&set, &set, &SimilarityConfig::default()),
        0.0
    );
}

#[test]
fn distant_points_at_same_time_are_compared_but_unmatched() {
    let a = vec![hotspot(&[(47.0, 8.0, Some(0)), (47.001, 8.001, Some(60))])];
    // Same schedule, ~11 km east.
    let b = vec![hotspot(&[(47.0, 8.15, Some(0)), (47.001, 8.151, Some(60))])];
    assert_eq!(hotspot_similarity(&a, &b, &SimilarityConfig::default()), 0.0);
}

#[test]
fn disjoint_schedules_score_zero() {
    let a = vec![hotspot(&[(47.0, 8.0, Some(0)), (47.001, 8.001, Some(60))])];
    // Same places, hours later: outside the time threshold.
    let b = vec![hotspot(&[
        (47.0, 8.0, Some(100_000)),
        (47.001, 8.001, Some(100_060)),
    ])];
    assert_eq!(hotspot_similarity(&a, &b, &SimilarityConfig::default()), 0.0);
}

#[test]
fn partial_overlap_scores_between_zero_and_one() {
    let a = vec![hotspot(&[
        (47.0, 8.0, Some(0)),
        (47.001, 8.001, Some(60)),
        (47.002, 8.002, Some(120)),
        (47.003, 8.003, Some(180)),
    ])];
    let b = vec![hotspot(&[
        (47.0, 8.0, Some(0)),
        (47.001, 8.001, Some(60)),
        // Diverges far away for the second half.
        (47.2, 8.2, Some(120)),
        (47.201, 8.201, Some(180)),
    ])];
    let score = hotspot_similarity(&a, &b, &SimilarityConfig::default());
    assert!((score - 0.5).abs() < f64::EPSILON, "score {}", score);
}

#[test]
fn looser_thresholds_match_more() {
    let a = vec![hotspot(&[(47.0, 8.0, Some(0)), (47.001, 8.001, Some(60))])];
    // ~400m offset: beyond the default 100m, inside 1km.
    let b = vec![hotspot(&[
        (47.0, 8.005, Some(0)),
        (47.001, 8.006, Some(60)),
    ])];

    let strict = hotspot_similarity(&a, &b, &SimilarityConfig::default());
    let loose = hotspot_similarity(
        &a,
        &b,
        &SimilarityConfig {
            distance_threshold_meters: 1_000.0,
            ..Default::default()
        },
    );
    assert_eq!(strict, 0.0);
    assert!((loose - 1.0).abs() < f64::EPSILON);
}
