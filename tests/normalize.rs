//! Tests for trajectory normalization

use pathmine::{normalize_batch, MineError, TrackPoint, Trajectory};

fn trajectory(id: &str, points: Vec<TrackPoint>) -> Trajectory {
    Trajectory::new(id, "user-1", points)
}

#[test]
fn empty_batch_is_rejected() {
    let result = normalize_batch(&[]);
    assert!(matches!(result, Err(MineError::EmptyBatch)));
}

#[test]
fn batch_emptied_by_cleaning_is_rejected() {
    // Single trajectory with one valid point: excluded, leaving nothing.
    let batch = vec![trajectory("t1", vec![TrackPoint::new(47.0, 8.0, 0)])];
    let result = normalize_batch(&batch);
    assert!(matches!(
        result,
        Err(MineError::AllTrajectoriesDiscarded { discarded: 1 })
    ));
}

#[test]
fn out_of_range_points_are_dropped() {
    let batch = vec![trajectory(
        "t1",
        vec![
            TrackPoint::new(91.0, 8.0, 0),     // latitude out of range
            TrackPoint::new(47.0, -200.0, 10), // longitude out of range
            TrackPoint::new(f64::NAN, 8.0, 20),
            TrackPoint::new(47.0, 8.0, 30),
            TrackPoint::new(47.1, 8.1, 40),
        ],
    )];
    let normalized = normalize_batch(&batch).unwrap();
    assert_eq!(normalized.len(), 1);
    assert_eq!(normalized[0].point_count(), 2);
    assert!(normalized[0].points.iter().all(|p| p.is_valid()));
}

#[test]
fn points_are_sorted_by_timestamp() {
    let batch = vec![trajectory(
        "t1",
        vec![
            TrackPoint::new(47.2, 8.2, 200),
            TrackPoint::new(47.0, 8.0, 0),
            TrackPoint::new(47.1, 8.1, 100),
        ],
    )];
    let normalized = normalize_batch(&batch).unwrap();
    let stamps: Vec<i64> = normalized[0].points.iter().map(|p| p.timestamp).collect();
    assert_eq!(stamps, vec![0, 100, 200]);
}

#[test]
fn short_trajectories_are_excluded_but_batch_survives() {
    let batch = vec![
        trajectory("short", vec![TrackPoint::new(47.0, 8.0, 0)]),
        trajectory(
            "ok",
            vec![TrackPoint::new(47.0, 8.0, 0), TrackPoint::new(47.1, 8.1, 60)],
        ),
    ];
    let normalized = normalize_batch(&batch).unwrap();
    assert_eq!(normalized.len(), 1);
    assert_eq!(normalized[0].id, "ok");
}
