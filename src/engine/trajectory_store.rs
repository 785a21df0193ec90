//! Trajectory storage with owner-scoped retrieval.
//!
//! Holds the raw trajectories the engine mines from. Normalization happens
//! inside [`crate::mine`]; the store keeps trajectories as uploaded.

use std::collections::HashMap;

use crate::Trajectory;

/// Storage for owner-tagged trajectories, keyed by trajectory id.
#[derive(Debug, Default)]
pub struct TrajectoryStore {
    trajectories: HashMap<String, Trajectory>,
}

impl TrajectoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            trajectories: HashMap::new(),
        }
    }

    /// Add a trajectory, replacing any existing one with the same id.
    ///
    /// Returns the previous trajectory if one was replaced.
    pub fn add(&mut self, trajectory: Trajectory) -> Option<Trajectory> {
        self.trajectories.insert(trajectory.id.clone(), trajectory)
    }

    /// Add multiple trajectories. Returns the ids added.
    pub fn add_many(&mut self, trajectories: Vec<Trajectory>) -> Vec<String> {
        trajectories
            .into_iter()
            .map(|t| {
                let id = t.id.clone();
                self.add(t);
                id
            })
            .collect()
    }

    /// Remove a trajectory by id, returning it if it existed.
    pub fn remove(&mut self, id: &str) -> Option<Trajectory> {
        self.trajectories.remove(id)
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.trajectories.clear();
    }

    /// Get a trajectory by id.
    pub fn get(&self, id: &str) -> Option<&Trajectory> {
        self.trajectories.get(id)
    }

    /// Check if a trajectory exists.
    pub fn contains(&self, id: &str) -> bool {
        self.trajectories.contains_key(id)
    }

    /// All trajectory ids.
    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.trajectories.keys()
    }

    /// Iterate all stored trajectories.
    pub fn iter(&self) -> impl Iterator<Item = &Trajectory> {
        self.trajectories.values()
    }

    /// Number of stored trajectories.
    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    /// Distinct owner ids, sorted.
    pub fn owners(&self) -> Vec<String> {
        let mut owners: Vec<String> = self
            .trajectories
            .values()
            .map(|t| t.owner_id.clone())
            .collect();
        owners.sort_unstable();
        owners.dedup();
        owners
    }

    /// All trajectories of one owner, sorted by id for deterministic mining
    /// input.
    pub fn owner_batch(&self, owner_id: &str) -> Vec<Trajectory> {
        let mut batch: Vec<Trajectory> = self
            .trajectories
            .values()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect();
        batch.sort_unstable_by(|a, b| a.id.cmp(&b.id));
        batch
    }
}
