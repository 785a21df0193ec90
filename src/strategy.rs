//! Mining strategy selection.
//!
//! The selector is a pure function of the batch shape: trajectory count and
//! total point count. Sparse batches favor exhaustive pairwise joining,
//! moderate densities favor in-order traversal, and dense batches favor the
//! transition graph, which collapses repeated transitions instead of
//! enumerating every candidate path.

use serde::{Deserialize, Serialize};

/// Available mining strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MiningStrategy {
    /// Apriori-style path table self-join (sparse data).
    JoinExpansion,
    /// Contiguous in-order sequence extension (moderate density).
    #[default]
    TraversalExpansion,
    /// Transition-graph depth-first search (dense or long trajectories).
    GraphDfs,
}

impl MiningStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MiningStrategy::JoinExpansion => "join-expansion",
            MiningStrategy::TraversalExpansion => "traversal-expansion",
            MiningStrategy::GraphDfs => "graph-dfs",
        }
    }
}

impl std::fmt::Display for MiningStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MiningStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "join" | "join-expansion" | "join_expansion" => Ok(MiningStrategy::JoinExpansion),
            "traversal" | "traversal-expansion" | "traversal_expansion" => {
                Ok(MiningStrategy::TraversalExpansion)
            }
            "graph" | "dfs" | "graph-dfs" | "graph_dfs" => Ok(MiningStrategy::GraphDfs),
            _ => Err(format!("unknown mining strategy: {}", s)),
        }
    }
}

/// Tunable cutoffs for automatic strategy selection.
///
/// The metric is average points per trajectory. The defaults come from the
/// density bands observed to keep each algorithm in its sweet spot; deployments
/// with very long commutes may want a higher `dense_above`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorConfig {
    /// Below this average, use join expansion.
    /// Default: 5.0 points per trajectory
    pub sparse_below: f64,

    /// Above this average, use graph DFS; between the two bounds
    /// (inclusive), use traversal expansion.
    /// Default: 20.0 points per trajectory
    pub dense_above: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            sparse_below: 5.0,
            dense_above: 20.0,
        }
    }
}

/// Pick a mining strategy from the batch shape.
///
/// Pure function: the same `(trajectory_count, total_points, config)`
/// always yields the same strategy. An empty batch (which [`crate::mine`]
/// rejects before selection) degenerates to the sparse band.
pub fn select_strategy(
    trajectory_count: usize,
    total_points: usize,
    config: &SelectorConfig,
) -> MiningStrategy {
    if trajectory_count == 0 {
        return MiningStrategy::JoinExpansion;
    }

    let avg = total_points as f64 / trajectory_count as f64;

    if avg < config.sparse_below {
        MiningStrategy::JoinExpansion
    } else if avg <= config.dense_above {
        MiningStrategy::TraversalExpansion
    } else {
        MiningStrategy::GraphDfs
    }
}
