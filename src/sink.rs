//! Boundary traits for trajectory sources and hotspot persistence.
//!
//! The core never touches files, networks or databases; it consumes
//! trajectories from a [`TrajectorySource`] and hands mined hotspots plus
//! their canonical hash to a [`HotspotSink`]. Both traits are object-safe
//! and `Send + Sync` so implementations can sit behind services or FFI.
//! In-memory implementations ship for tests and the CLI.

use std::collections::{HashMap, HashSet};

use crate::error::{MineError, Result};
use crate::{Hotspot, Trajectory};

/// Supplies raw, pre-normalization trajectories per owner.
pub trait TrajectorySource: Send + Sync {
    fn fetch(&self, owner_id: &str) -> Result<Vec<Trajectory>>;
}

/// Outcome of an idempotent persist attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// The hotspot set was new for this owner and was stored.
    Inserted,
    /// An identical set (same canonical hash) was already stored.
    Duplicate,
}

/// Receives mined hotspot sets, deduplicating by canonical hash.
pub trait HotspotSink: Send + Sync {
    fn persist_if_new(
        &mut self,
        owner_id: &str,
        hotspots: &[Hotspot],
        hash: &str,
    ) -> Result<PersistOutcome>;
}

/// In-memory trajectory source backed by a flat batch.
#[derive(Debug, Default)]
pub struct MemoryTrajectorySource {
    trajectories: Vec<Trajectory>,
}

impl MemoryTrajectorySource {
    pub fn new(trajectories: Vec<Trajectory>) -> Self {
        Self { trajectories }
    }
}

impl TrajectorySource for MemoryTrajectorySource {
    fn fetch(&self, owner_id: &str) -> Result<Vec<Trajectory>> {
        let owned: Vec<Trajectory> = self
            .trajectories
            .iter()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect();
        if owned.is_empty() {
            return Err(MineError::UnknownOwner {
                owner_id: owner_id.to_string(),
            });
        }
        Ok(owned)
    }
}

/// In-memory hotspot sink for tests and the CLI.
#[derive(Debug, Default)]
pub struct MemoryHotspotSink {
    hashes: HashMap<String, HashSet<String>>,
    stored: HashMap<String, Vec<Hotspot>>,
}

impl MemoryHotspotSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently inserted hotspot set for an owner.
    pub fn hotspots_for(&self, owner_id: &str) -> Option<&[Hotspot]> {
        self.stored.get(owner_id).map(Vec::as_slice)
    }

    /// Number of distinct hashes stored for an owner.
    pub fn stored_sets(&self, owner_id: &str) -> usize {
        self.hashes.get(owner_id).map_or(0, HashSet::len)
    }
}

impl HotspotSink for MemoryHotspotSink {
    fn persist_if_new(
        &mut self,
        owner_id: &str,
        hotspots: &[Hotspot],
        hash: &str,
    ) -> Result<PersistOutcome> {
        let hashes = self.hashes.entry(owner_id.to_string()).or_default();
        if !hashes.insert(hash.to_string()) {
            return Ok(PersistOutcome::Duplicate);
        }
        self.stored.insert(owner_id.to_string(), hotspots.to_vec());
        Ok(PersistOutcome::Inserted)
    }
}
