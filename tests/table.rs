//! Tests for the path table substrate

use pathmine::{NodeIdentity, NodeKey, Path, PathTable, TrackPoint};

fn node(lat: f64, lon: f64) -> NodeKey {
    NodeKey::from_point(&TrackPoint::new(lat, lon, 0), NodeIdentity::Geometry)
}

fn sequences() -> Vec<Vec<NodeKey>> {
    let a = node(47.0, 8.0);
    let b = node(47.1, 8.1);
    let c = node(47.2, 8.2);
    vec![vec![a, b, c], vec![a, b], vec![b, c]]
}

#[test]
fn seed_pairs_counts_distinct_trajectories() {
    let seqs = sequences();
    let table = PathTable::seed_pairs(&seqs);
    assert_eq!(table.len(), 2);

    let ab = Path::pair(seqs[0][0], seqs[0][1]);
    assert_eq!(table.support_of(&ab), Some(2));
    let bc = Path::pair(seqs[0][1], seqs[0][2]);
    assert_eq!(table.support_of(&bc), Some(2));
}

#[test]
fn repeated_occurrences_in_one_trajectory_count_once() {
    let a = node(47.0, 8.0);
    let b = node(47.1, 8.1);
    // A->B appears twice within the same trajectory.
    let seqs = vec![vec![a, b, a, b]];
    let table = PathTable::seed_pairs(&seqs);
    assert_eq!(table.support_of(&Path::pair(a, b)), Some(1));
}

#[test]
fn prune_removes_below_threshold() {
    let seqs = sequences();
    let mut table = PathTable::seed_nodes(&seqs);
    assert_eq!(table.len(), 3);

    // a:2, b:3, c:2 -> pruning at 3 keeps only b.
    let pruned = table.prune(3);
    assert_eq!(pruned, 2);
    assert_eq!(table.len(), 1);
    assert_eq!(table.support_of(&Path::single(seqs[0][1])), Some(3));
}

#[test]
fn frontier_is_sorted_and_stable() {
    let seqs = sequences();
    let table = PathTable::seed_pairs(&seqs);
    let first = table.frontier();
    let second = table.frontier();
    assert_eq!(first.len(), second.len());
    for ((path_a, _), (path_b, _)) in first.iter().zip(&second) {
        assert_eq!(path_a, path_b);
    }
    assert!(first.windows(2).all(|w| w[0].0 < w[1].0));
}

#[test]
fn absorb_unions_support_sets() {
    let a = node(47.0, 8.0);
    let b = node(47.1, 8.1);
    let path = Path::pair(a, b);

    let mut left = PathTable::new();
    left.add(path.clone(), 0);
    let mut right = PathTable::new();
    right.add(path.clone(), 1);

    left.absorb(&right);
    assert_eq!(left.support_of(&path), Some(2));
}

#[test]
fn path_join_requires_suffix_prefix_match() {
    let a = node(47.0, 8.0);
    let b = node(47.1, 8.1);
    let c = node(47.2, 8.2);

    let ab = Path::pair(a, b);
    let bc = Path::pair(b, c);
    let joined = ab.joined(&bc).unwrap();
    assert_eq!(joined.nodes(), &[a, b, c]);

    // Mismatched overlap does not join.
    let ac = Path::pair(a, c);
    assert!(ab.joined(&ac).is_none());
    // Length mismatch does not join.
    assert!(joined.joined(&bc).is_none());
}

#[test]
fn node_identity_policy_changes_equality() {
    let p1 = TrackPoint::new(47.0, 8.0, 100);
    let p2 = TrackPoint::new(47.0, 8.0, 200);

    assert_eq!(
        NodeKey::from_point(&p1, NodeIdentity::Geometry),
        NodeKey::from_point(&p2, NodeIdentity::Geometry)
    );
    assert_ne!(
        NodeKey::from_point(&p1, NodeIdentity::GeometryAndTime),
        NodeKey::from_point(&p2, NodeIdentity::GeometryAndTime)
    );
}
