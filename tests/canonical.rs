//! Tests for canonical ordering and idempotency hashing

use pathmine::{canonical_hash, canonical_sort, Hotspot, PathNode};

fn hotspot(id: &str, coords: &[(f64, f64)]) -> Hotspot {
    Hotspot {
        id: id.to_string(),
        polyline: coords
            .iter()
            .map(|&(latitude, longitude)| PathNode {
                latitude,
                longitude,
                timestamp: None,
            })
            .collect(),
        support: 2,
        trajectory_ids: vec!["t1".to_string(), "t2".to_string()],
    }
}

#[test]
fn hash_is_invariant_to_element_order() {
    let a = hotspot("hs_0", &[(47.0, 8.0), (47.1, 8.1)]);
    let b = hotspot("hs_1", &[(47.2, 8.2), (47.3, 8.3)]);

    let forward = canonical_hash(&[a.clone(), b.clone()]);
    let reversed = canonical_hash(&[b, a]);
    assert_eq!(forward, reversed);
}

#[test]
fn hash_ignores_volatile_ids() {
    let mut a = hotspot("hs_0", &[(47.0, 8.0), (47.1, 8.1)]);
    let before = canonical_hash(std::slice::from_ref(&a));
    a.id = "hs_99".to_string();
    a.trajectory_ids = vec!["renamed".to_string()];
    assert_eq!(before, canonical_hash(&[a]));
}

#[test]
fn hash_distinguishes_different_paths() {
    let a = hotspot("hs_0", &[(47.0, 8.0), (47.1, 8.1)]);
    let b = hotspot("hs_0", &[(47.0, 8.0), (47.2, 8.2)]);
    assert_ne!(
        canonical_hash(std::slice::from_ref(&a)),
        canonical_hash(std::slice::from_ref(&b))
    );
}

#[test]
fn hash_distinguishes_node_order() {
    let a = hotspot("hs_0", &[(47.0, 8.0), (47.1, 8.1)]);
    let b = hotspot("hs_0", &[(47.1, 8.1), (47.0, 8.0)]);
    assert_ne!(canonical_hash(&[a]), canonical_hash(&[b]));
}

#[test]
fn hash_of_empty_set_is_stable() {
    assert_eq!(canonical_hash(&[]), canonical_hash(&[]));
}

#[test]
fn timestamped_and_plain_nodes_hash_differently() {
    let plain = hotspot("hs_0", &[(47.0, 8.0), (47.1, 8.1)]);
    let mut timed = plain.clone();
    for (i, node) in timed.polyline.iter_mut().enumerate() {
        node.timestamp = Some(i as i64 * 60);
    }
    assert_ne!(
        canonical_hash(std::slice::from_ref(&plain)),
        canonical_hash(&[timed])
    );
}

#[test]
fn sort_orders_by_node_sequence() {
    let first = hotspot("x", &[(47.0, 8.0), (47.1, 8.1)]);
    let second = hotspot("y", &[(47.0, 8.0), (47.2, 8.2)]);
    let third = hotspot("z", &[(47.5, 8.5)]);

    let mut hotspots = vec![third.clone(), first.clone(), second.clone()];
    canonical_sort(&mut hotspots);
    assert_eq!(hotspots[0].id, first.id);
    assert_eq!(hotspots[1].id, second.id);
    assert_eq!(hotspots[2].id, third.id);
}
