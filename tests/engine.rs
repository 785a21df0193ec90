//! Integration tests for the owner-scoped hotspot engine

use pathmine::{
    HotspotEngine, MemoryHotspotSink, MemoryTrajectorySource, MineConfig, MineError,
    PersistOutcome, TrackPoint, Trajectory,
};

fn commute(id: &str, owner: &str, lat_offset: f64) -> Trajectory {
    let points = (0..4)
        .map(|i| {
            TrackPoint::new(
                47.0 + lat_offset,
                8.0 + i as f64 * 0.001,
                i as i64 * 60,
            )
        })
        .collect();
    Trajectory::new(id, owner, points)
}

fn engine_with_owner() -> HotspotEngine {
    let mut engine = HotspotEngine::with_config(MineConfig::new(2, 2));
    engine.add_trajectories(vec![
        commute("t1", "alice", 0.0),
        commute("t2", "alice", 0.0),
        commute("t3", "alice", 0.0),
    ]);
    engine
}

#[test]
fn mines_lazily_per_owner() {
    let mut engine = engine_with_owner();
    assert_eq!(engine.stats().mined_owners, 0);

    let mined = engine.mine_owner("alice").unwrap();
    assert!(!mined.hotspots.is_empty());
    assert_eq!(engine.stats().mined_owners, 1);
}

#[test]
fn unknown_owner_is_an_error() {
    let mut engine = engine_with_owner();
    assert!(matches!(
        engine.mine_owner("nobody"),
        Err(MineError::UnknownOwner { .. })
    ));
}

#[test]
fn persist_deduplicates_by_canonical_hash() {
    let mut engine = engine_with_owner();
    let mut sink = MemoryHotspotSink::new();

    assert_eq!(
        engine.persist_owner("alice", &mut sink).unwrap(),
        PersistOutcome::Inserted
    );
    // Second persist of the unchanged set is a duplicate.
    assert_eq!(
        engine.persist_owner("alice", &mut sink).unwrap(),
        PersistOutcome::Duplicate
    );
    assert_eq!(sink.stored_sets("alice"), 1);
    assert!(!sink.hotspots_for("alice").unwrap().is_empty());
}

#[test]
fn mutating_trajectories_invalidates_the_mined_set() {
    let mut engine = engine_with_owner();
    let hash_before = engine.canonical_hash_for("alice").unwrap();

    // Dropping one of three identical commutes re-mines but keeps the same
    // paths: the hash covers path content, not support counts.
    engine.remove_trajectory("t3");
    let hash_after = engine.canonical_hash_for("alice").unwrap();
    assert_eq!(hash_before, hash_after);

    engine.remove_trajectory("t2");
    // Only one trajectory left: nothing reaches support 2.
    let mined = engine.mine_owner("alice").unwrap();
    assert!(mined.hotspots.is_empty());
}

#[test]
fn load_owner_pulls_from_source() {
    let source = MemoryTrajectorySource::new(vec![
        commute("t1", "bob", 0.0),
        commute("t2", "bob", 0.0),
        commute("other", "carol", 5.0),
    ]);

    let mut engine = HotspotEngine::with_config(MineConfig::new(2, 2));
    let loaded = engine.load_owner(&source, "bob").unwrap();
    assert_eq!(loaded, 2);
    assert_eq!(engine.trajectory_count(), 2);
    assert!(!engine.mine_owner("bob").unwrap().hotspots.is_empty());

    assert!(matches!(
        engine.load_owner(&source, "nobody"),
        Err(MineError::UnknownOwner { .. })
    ));
}

#[test]
fn viewport_query_finds_owner_hotspots() {
    let mut engine = engine_with_owner();
    engine.add_trajectories(vec![
        commute("n1", "north", 1.0),
        commute("n2", "north", 1.0),
    ]);

    // Viewport around the alice commute only.
    let hits = engine.query_viewport(46.99, 47.01, 7.99, 8.01).unwrap();
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|id| id.starts_with("alice:")));

    // Viewport around the north commute.
    let hits = engine.query_viewport(47.99, 48.01, 7.99, 8.01).unwrap();
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|id| id.starts_with("north:")));

    // Viewport over open water.
    let hits = engine.query_viewport(0.0, 1.0, 0.0, 1.0).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn stats_track_store_and_mined_state() {
    let mut engine = engine_with_owner();
    engine.add_trajectories(vec![
        commute("n1", "north", 1.0),
        commute("n2", "north", 1.0),
    ]);

    let stats = engine.stats();
    assert_eq!(stats.trajectories, 5);
    assert_eq!(stats.owners, 2);
    assert_eq!(stats.mined_owners, 0);

    engine.mine_owner("alice").unwrap();
    engine.mine_owner("north").unwrap();
    let stats = engine.stats();
    assert_eq!(stats.mined_owners, 2);
    assert!(stats.hotspots > 0);
}

#[test]
fn hotspots_json_is_parseable() {
    let mut engine = engine_with_owner();
    let json = engine.hotspots_json("alice").unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
    assert!(!parsed.is_empty());
    assert!(parsed[0].get("polyline").is_some());
    assert!(parsed[0].get("support").is_some());
}
