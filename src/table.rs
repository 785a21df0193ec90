//! Path table substrate shared by the table-based miners.
//!
//! A [`PathTable`] maps each candidate path to its support set: the distinct
//! trajectory indices in which the path occurs. Tables are rebuilt per
//! mining iteration and obey the Apriori invariant — the support of any
//! (k+1)-path is at most the minimum support of its two constituent
//! k-sub-paths — which is the sole basis for pruning.

use std::collections::{HashMap, HashSet};

use crate::{NodeKey, Path};

/// Distinct trajectory indices supporting a path.
///
/// Trajectory ids are interned to dense `u32` indices once per mining run;
/// output materialization maps them back to their string ids.
pub type SupportSet = HashSet<u32>;

/// Mapping from candidate path to supporting trajectories.
#[derive(Debug, Clone, Default)]
pub struct PathTable {
    entries: HashMap<Path, SupportSet>,
}

impl PathTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table of 2-paths from every adjacent node pair in every
    /// sequence.
    pub fn seed_pairs(sequences: &[Vec<NodeKey>]) -> Self {
        let mut table = Self::new();
        for (index, nodes) in sequences.iter().enumerate() {
            for pair in nodes.windows(2) {
                table.add(Path::pair(pair[0], pair[1]), index as u32);
            }
        }
        table
    }

    /// Seed a table of single-node paths from every node in every sequence.
    pub fn seed_nodes(sequences: &[Vec<NodeKey>]) -> Self {
        let mut table = Self::new();
        for (index, nodes) in sequences.iter().enumerate() {
            for node in nodes {
                table.add(Path::single(*node), index as u32);
            }
        }
        table
    }

    /// Record one supporting trajectory for a path.
    pub fn add(&mut self, path: Path, trajectory: u32) {
        self.entries.entry(path).or_default().insert(trajectory);
    }

    /// Merge a whole support set into a path's entry.
    pub fn merge(&mut self, path: Path, support: SupportSet) {
        self.entries.entry(path).or_default().extend(support);
    }

    /// Drop every path supported by fewer than `min_support` trajectories.
    /// Returns the number of pruned paths.
    pub fn prune(&mut self, min_support: u32) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, support| support.len() as u32 >= min_support);
        before - self.entries.len()
    }

    /// Support (distinct trajectory count) of a path, if present.
    pub fn support_of(&self, path: &Path) -> Option<u32> {
        self.entries.get(path).map(|s| s.len() as u32)
    }

    /// Support set of a path, if present.
    pub fn get(&self, path: &Path) -> Option<&SupportSet> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &SupportSet)> {
        self.entries.iter()
    }

    /// Union another table's entries into this one (result accumulation
    /// across iterations).
    pub fn absorb(&mut self, other: &PathTable) {
        for (path, support) in &other.entries {
            self.entries
                .entry(path.clone())
                .or_default()
                .extend(support.iter().copied());
        }
    }

    /// Snapshot the table as a frontier frozen for one mining iteration.
    ///
    /// Sorted by path so task order — and therefore reduction order and
    /// stats — is deterministic regardless of hash map iteration order.
    pub fn frontier(&self) -> Vec<(Path, SupportSet)> {
        let mut frontier: Vec<(Path, SupportSet)> = self
            .entries
            .iter()
            .map(|(p, s)| (p.clone(), s.clone()))
            .collect();
        frontier.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        frontier
    }

    /// Consume the table, yielding its entries.
    pub fn into_entries(self) -> HashMap<Path, SupportSet> {
        self.entries
    }
}
