//! # Hotspot Mining Pipeline
//!
//! Turns a raw trajectory batch into a set of frequent, sufficiently-long
//! sub-paths ("hotspots").
//!
//! ## Pipeline
//! 1. Validate thresholds and normalize the batch
//! 2. Select a mining strategy from the batch shape (unless forced)
//! 3. Run the miner, iteratively extending a path table or walking the
//!    transition graph, pruning by support at every step
//! 4. Filter candidates by length and support thresholds
//! 5. Canonically order the survivors and assign stable ids
//!
//! All three miners share the anti-monotone pruning contract: a path can
//! only be frequent if both of its length-(k-1) sub-paths are frequent.
//! Iteration bounds (`max_iterations`, `max_path_len`, `deadline`) guarantee
//! termination; hitting one yields a best-effort partial result flagged as
//! truncated, never an error.

mod frontier;
mod graph;
mod join;
mod traversal;

pub(crate) use frontier::{expand_tasks, TaskFailure};
pub use graph::TransitionGraph;

use std::time::{Duration, Instant};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{MineError, Result};
use crate::normalize::normalize_batch;
use crate::strategy::{select_strategy, MiningStrategy, SelectorConfig};
use crate::table::{PathTable, SupportSet};
use crate::{Hotspot, NodeIdentity, NodeKey, Path, Trajectory};

/// Configuration for a mining run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MineConfig {
    /// Minimum path length in nodes for a hotspot (kmin, >= 1).
    /// Default: 2
    pub min_path_len: u32,
    /// Minimum number of distinct supporting trajectories (mmin, >= 1).
    /// Default: 2
    pub min_support: u32,
    /// Forced mining strategy; `None` selects automatically from the
    /// batch shape. Default: None
    pub strategy: Option<MiningStrategy>,
    /// Node identity policy, fixed for the whole run.
    /// Default: geometry only
    pub node_identity: NodeIdentity,
    /// Cutoffs for automatic strategy selection.
    pub selector: SelectorConfig,
    /// Maximum number of extension iterations (table miners).
    /// Default: 64
    pub max_iterations: u32,
    /// Maximum path length in nodes, the termination guarantee independent
    /// of the frequency bound. Default: 64
    pub max_path_len: u32,
    /// Optional wall-clock budget, checked at iteration barriers. On expiry
    /// the run returns what it has, flagged truncated.
    /// Default: None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Duration>,
}

impl Default for MineConfig {
    fn default() -> Self {
        Self {
            min_path_len: 2,
            min_support: 2,
            strategy: None,
            node_identity: NodeIdentity::default(),
            selector: SelectorConfig::default(),
            max_iterations: 64,
            max_path_len: 64,
            deadline: None,
        }
    }
}

impl MineConfig {
    /// Config with explicit length and support thresholds.
    pub fn new(min_path_len: u32, min_support: u32) -> Self {
        Self {
            min_path_len,
            min_support,
            ..Default::default()
        }
    }

    /// Config forcing the join-expansion miner (sparse batches).
    pub fn sparse(min_path_len: u32, min_support: u32) -> Self {
        Self {
            strategy: Some(MiningStrategy::JoinExpansion),
            ..Self::new(min_path_len, min_support)
        }
    }

    /// Config forcing the graph-DFS miner (dense batches).
    pub fn dense(min_path_len: u32, min_support: u32) -> Self {
        Self {
            strategy: Some(MiningStrategy::GraphDfs),
            ..Self::new(min_path_len, min_support)
        }
    }

    /// Validate the threshold contract (both must be >= 1).
    pub fn validate(&self) -> Result<()> {
        if self.min_path_len < 1 || self.min_support < 1 {
            return Err(MineError::InvalidThresholds {
                min_path_len: self.min_path_len,
                min_support: self.min_support,
            });
        }
        Ok(())
    }
}

/// Statistics from a mining run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiningStats {
    /// Strategy that ran (selected or forced)
    pub strategy: MiningStrategy,
    /// Trajectories that survived normalization
    pub trajectories: u32,
    /// Total points across surviving trajectories
    pub total_points: u32,
    /// Extension iterations executed (table miners) or start nodes
    /// expanded (graph miner)
    pub iterations: u32,
    /// Frequent candidate paths accumulated before the length filter
    pub candidate_paths: u32,
    /// Candidates discarded by support pruning
    pub pruned_paths: u32,
    /// Extension tasks that failed and were dropped
    pub task_failures: u32,
    /// Wall-clock mining time in milliseconds
    pub elapsed_ms: u64,
}

/// Result of a mining run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mined {
    /// Canonically ordered hotspot set
    pub hotspots: Vec<Hotspot>,
    /// True when an iteration/length/deadline bound cut the search short
    pub truncated: bool,
    /// Run statistics
    pub stats: MiningStats,
}

/// Per-run mining state threaded through every miner.
///
/// Trajectory ids are interned to dense indices; node sequences are
/// pre-resolved under the run's identity policy. No process-wide state.
pub(crate) struct MineContext {
    pub sequences: Vec<Vec<NodeKey>>,
    pub ids: Vec<String>,
    pub min_support: u32,
    pub min_path_len: usize,
    pub max_iterations: u32,
    pub max_path_len: usize,
    pub deadline: Option<Instant>,
}

impl MineContext {
    fn new(normalized: &[Trajectory], config: &MineConfig) -> Self {
        let sequences = normalized
            .iter()
            .map(|t| {
                t.points
                    .iter()
                    .map(|p| NodeKey::from_point(p, config.node_identity))
                    .collect()
            })
            .collect();
        let ids = normalized.iter().map(|t| t.id.clone()).collect();
        Self {
            sequences,
            ids,
            min_support: config.min_support,
            min_path_len: config.min_path_len as usize,
            max_iterations: config.max_iterations,
            max_path_len: config.max_path_len as usize,
            deadline: config.deadline.map(|d| Instant::now() + d),
        }
    }

    /// Whether the run's wall-clock budget has expired.
    pub fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// What a miner hands back to the pipeline: every frequent path it found
/// (all lengths, filtered by length afterwards) plus bookkeeping.
pub(crate) struct MineOutcome {
    pub results: PathTable,
    pub iterations: u32,
    pub truncated: bool,
    pub pruned_paths: u32,
    pub task_failures: u32,
}

/// Mine frequent sub-paths from a trajectory batch.
///
/// Deterministic for fixed input and config: the returned hotspot set, its
/// order and its canonical hash are identical across runs.
///
/// # Errors
///
/// - [`MineError::InvalidThresholds`] when either threshold is below 1.
/// - [`MineError::EmptyBatch`] / [`MineError::AllTrajectoriesDiscarded`]
///   from normalization.
pub fn mine(trajectories: &[Trajectory], config: &MineConfig) -> Result<Mined> {
    let start = Instant::now();
    config.validate()?;

    let normalized = normalize_batch(trajectories)?;
    let total_points: usize = normalized.iter().map(|t| t.point_count()).sum();

    let strategy = config
        .strategy
        .unwrap_or_else(|| select_strategy(normalized.len(), total_points, &config.selector));

    info!(
        "[Mine] Strategy {} over {} trajectories ({} points, kmin={}, mmin={})",
        strategy,
        normalized.len(),
        total_points,
        config.min_path_len,
        config.min_support
    );

    let ctx = MineContext::new(&normalized, config);
    let outcome = match strategy {
        MiningStrategy::JoinExpansion => join::mine_join(&ctx),
        MiningStrategy::TraversalExpansion => traversal::mine_traversal(&ctx),
        MiningStrategy::GraphDfs => graph::mine_graph(&ctx),
    };

    let candidate_paths = outcome.results.len() as u32;
    let hotspots = materialize(outcome.results, &ctx);

    let stats = MiningStats {
        strategy,
        trajectories: ctx.ids.len() as u32,
        total_points: total_points as u32,
        iterations: outcome.iterations,
        candidate_paths,
        pruned_paths: outcome.pruned_paths,
        task_failures: outcome.task_failures,
        elapsed_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "[Mine] {} hotspots in {}ms ({} iterations{})",
        hotspots.len(),
        stats.elapsed_ms,
        stats.iterations,
        if outcome.truncated { ", truncated" } else { "" }
    );

    Ok(Mined {
        hotspots,
        truncated: outcome.truncated,
        stats,
    })
}

/// Filter the result table by length and support, order it canonically and
/// assign stable `hs_<n>` ids.
fn materialize(results: PathTable, ctx: &MineContext) -> Vec<Hotspot> {
    let mut entries: Vec<(Path, SupportSet)> = results
        .into_entries()
        .into_iter()
        .filter(|(path, support)| {
            path.len() >= ctx.min_path_len && support.len() as u32 >= ctx.min_support
        })
        .collect();
    // Path order is the canonical order; id assignment follows it.
    entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    entries
        .into_iter()
        .enumerate()
        .map(|(n, (path, support))| {
            let mut trajectory_ids: Vec<String> = support
                .iter()
                .map(|&index| ctx.ids[index as usize].clone())
                .collect();
            trajectory_ids.sort_unstable();
            Hotspot {
                id: format!("hs_{}", n),
                polyline: path.to_polyline(),
                support: support.len() as u32,
                trajectory_ids,
            }
        })
        .collect()
}
