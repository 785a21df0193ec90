//! # Hotspot Engine
//!
//! Owner-scoped facade over the mining pipeline, composed of focused
//! modules:
//! - `TrajectoryStore` - trajectory CRUD with owner-scoped retrieval
//! - `HotspotIndex` - R-tree for viewport queries over mined hotspots
//!
//! Mining is lazy with dirty tracking: mutating an owner's trajectories
//! invalidates that owner's mined set, and the next query re-mines it. The
//! engine ties fetch → mine → hash → persist-if-new together; actual
//! persistence stays behind the [`HotspotSink`] trait.

pub mod hotspot_index;
pub mod trajectory_store;

pub use hotspot_index::HotspotIndex;
pub use trajectory_store::TrajectoryStore;

use std::collections::{HashMap, HashSet};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash;
use crate::error::{MineError, Result};
use crate::mine::{mine, MineConfig, Mined};
use crate::sink::{HotspotSink, PersistOutcome, TrajectorySource};
use crate::{HotspotBounds, Trajectory};

/// Engine-level statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineStats {
    /// Trajectories currently stored
    pub trajectories: u32,
    /// Distinct owners with stored trajectories
    pub owners: u32,
    /// Owners with an up-to-date mined set
    pub mined_owners: u32,
    /// Hotspots across all up-to-date mined sets
    pub hotspots: u32,
}

/// Owner-scoped hotspot mining engine.
pub struct HotspotEngine {
    pub store: TrajectoryStore,
    pub index: HotspotIndex,

    config: MineConfig,
    mined: HashMap<String, Mined>,
    hashes: HashMap<String, String>,
    dirty_owners: HashSet<String>,
}

impl Default for HotspotEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HotspotEngine {
    /// Create an engine with the default mining configuration.
    pub fn new() -> Self {
        Self::with_config(MineConfig::default())
    }

    /// Create an engine with a custom mining configuration.
    pub fn with_config(config: MineConfig) -> Self {
        Self {
            store: TrajectoryStore::new(),
            index: HotspotIndex::new(),
            config,
            mined: HashMap::new(),
            hashes: HashMap::new(),
            dirty_owners: HashSet::new(),
        }
    }

    /// The engine's mining configuration.
    pub fn config(&self) -> &MineConfig {
        &self.config
    }

    // ========================================================================
    // Trajectory Management (delegates to TrajectoryStore)
    // ========================================================================

    /// Add a trajectory, invalidating its owner's mined set.
    pub fn add_trajectory(&mut self, trajectory: Trajectory) {
        self.mark_dirty(&trajectory.owner_id);
        self.store.add(trajectory);
    }

    /// Add multiple trajectories.
    pub fn add_trajectories(&mut self, trajectories: Vec<Trajectory>) {
        for trajectory in trajectories {
            self.add_trajectory(trajectory);
        }
    }

    /// Remove a trajectory by id, invalidating its owner's mined set.
    pub fn remove_trajectory(&mut self, id: &str) -> Option<Trajectory> {
        let removed = self.store.remove(id);
        if let Some(trajectory) = &removed {
            let owner = trajectory.owner_id.clone();
            self.mark_dirty(&owner);
        }
        removed
    }

    /// Fetch an owner's trajectories from a source and store them.
    ///
    /// Returns the number of trajectories loaded.
    pub fn load_owner(&mut self, source: &dyn TrajectorySource, owner_id: &str) -> Result<usize> {
        let fetched = source.fetch(owner_id)?;
        let count = fetched.len();
        self.add_trajectories(fetched);
        Ok(count)
    }

    /// Clear all trajectories and mined state.
    pub fn clear(&mut self) {
        self.store.clear();
        self.index.clear();
        self.mined.clear();
        self.hashes.clear();
        self.dirty_owners.clear();
    }

    /// Number of stored trajectories.
    pub fn trajectory_count(&self) -> usize {
        self.store.len()
    }

    /// Distinct owner ids, sorted.
    pub fn owners(&self) -> Vec<String> {
        self.store.owners()
    }

    fn mark_dirty(&mut self, owner_id: &str) {
        self.dirty_owners.insert(owner_id.to_string());
        self.index.mark_dirty();
    }

    // ========================================================================
    // Mining (lazy, per owner)
    // ========================================================================

    /// Mine (or return the cached mined set for) one owner.
    pub fn mine_owner(&mut self, owner_id: &str) -> Result<&Mined> {
        self.ensure_mined(owner_id)?;
        Ok(&self.mined[owner_id])
    }

    /// Canonical hash of an owner's current hotspot set.
    pub fn canonical_hash_for(&mut self, owner_id: &str) -> Result<String> {
        self.ensure_mined(owner_id)?;
        Ok(self.hashes[owner_id].clone())
    }

    /// Mine an owner and hand the result to a sink, deduplicated by hash.
    pub fn persist_owner(
        &mut self,
        owner_id: &str,
        sink: &mut dyn HotspotSink,
    ) -> Result<PersistOutcome> {
        self.ensure_mined(owner_id)?;
        let mined = &self.mined[owner_id];
        let hash = &self.hashes[owner_id];
        sink.persist_if_new(owner_id, &mined.hotspots, hash)
    }

    /// An owner's hotspots as JSON (empty array on serialization failure).
    pub fn hotspots_json(&mut self, owner_id: &str) -> Result<String> {
        self.ensure_mined(owner_id)?;
        let mined = &self.mined[owner_id];
        Ok(serde_json::to_string(&mined.hotspots).unwrap_or_else(|e| {
            warn!(
                "Failed to serialize hotspots for owner '{}': {}",
                owner_id, e
            );
            "[]".to_string()
        }))
    }

    fn ensure_mined(&mut self, owner_id: &str) -> Result<()> {
        if self.mined.contains_key(owner_id) && !self.dirty_owners.contains(owner_id) {
            return Ok(());
        }

        let batch = self.store.owner_batch(owner_id);
        if batch.is_empty() {
            return Err(MineError::UnknownOwner {
                owner_id: owner_id.to_string(),
            });
        }

        let mined = mine(&batch, &self.config)?;
        let hash = canonical_hash(&mined.hotspots);
        self.mined.insert(owner_id.to_string(), mined);
        self.hashes.insert(owner_id.to_string(), hash);
        self.dirty_owners.remove(owner_id);
        self.index.mark_dirty();
        Ok(())
    }

    // ========================================================================
    // Spatial Queries (delegates to HotspotIndex)
    // ========================================================================

    /// Hotspots of all owners intersecting a viewport.
    ///
    /// Returned ids are qualified as `<owner_id>:<hotspot_id>` since
    /// `hs_<n>` ids are only unique per owner. Mines every dirty owner
    /// first.
    pub fn query_viewport(
        &mut self,
        min_lat: f64,
        max_lat: f64,
        min_lng: f64,
        max_lng: f64,
    ) -> Result<Vec<String>> {
        self.ensure_index()?;
        Ok(self
            .index
            .query_viewport(min_lat, max_lat, min_lng, max_lng))
    }

    fn ensure_index(&mut self) -> Result<()> {
        for owner in self.owners() {
            self.ensure_mined(&owner)?;
        }
        if !self.index.is_dirty() {
            return Ok(());
        }

        let mut bounds: Vec<HotspotBounds> = Vec::new();
        for (owner, mined) in &self.mined {
            for hotspot in &mined.hotspots {
                if let Some(mut b) = hotspot.bounds() {
                    b.hotspot_id = format!("{}:{}", owner, hotspot.id);
                    bounds.push(b);
                }
            }
        }
        self.index.rebuild(bounds);
        Ok(())
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Current engine statistics.
    pub fn stats(&self) -> EngineStats {
        let mined_owners = self
            .mined
            .keys()
            .filter(|owner| !self.dirty_owners.contains(*owner))
            .count();
        let hotspots: usize = self
            .mined
            .iter()
            .filter(|(owner, _)| !self.dirty_owners.contains(*owner))
            .map(|(_, mined)| mined.hotspots.len())
            .sum();
        EngineStats {
            trajectories: self.store.len() as u32,
            owners: self.store.owners().len() as u32,
            mined_owners: mined_owners as u32,
            hotspots: hotspots as u32,
        }
    }
}
