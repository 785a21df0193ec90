//! Graph-DFS miner: transition-graph depth-first search.
//!
//! Collapses the batch into a directed transition graph — one edge per
//! observed (node → next node) step, carrying the set of distinct
//! trajectories exhibiting it — then searches depth-first from every node.
//! Each extension intersects the carried trajectory set with the edge's
//! set, so the frequency bound is monotonically non-increasing along a path
//! and any branch whose bound drops below `min_support` is cut.
//!
//! Trajectories may revisit nodes, so the graph can contain cycles. The
//! search therefore uses an explicit frontier stack (never recursion), a
//! visited set keyed by the full path tuple to stop re-expansion of an
//! identical path, and a hard path-length cap as the termination guarantee
//! independent of the frequency bound.

use std::collections::{BTreeMap, HashSet};

use log::debug;

use crate::table::{PathTable, SupportSet};
use crate::{NodeKey, Path};

use super::{expand_tasks, MineContext, MineOutcome, TaskFailure};

/// Directed graph of observed node transitions.
///
/// Ephemeral: built per mining invocation from the normalized batch and
/// never persisted. Node and adjacency order is sorted by key, so search
/// order is deterministic regardless of build order.
#[derive(Debug, Clone, Default)]
pub struct TransitionGraph {
    /// Node -> distinct trajectories containing the node.
    nodes: BTreeMap<NodeKey, SupportSet>,
    /// Node -> outgoing (neighbor, distinct trajectories with the edge),
    /// sorted by neighbor key.
    edges: BTreeMap<NodeKey, Vec<(NodeKey, SupportSet)>>,
}

impl TransitionGraph {
    /// Build the graph from per-trajectory node sequences.
    pub fn build(sequences: &[Vec<NodeKey>]) -> Self {
        let mut nodes: BTreeMap<NodeKey, SupportSet> = BTreeMap::new();
        let mut edges: BTreeMap<NodeKey, BTreeMap<NodeKey, SupportSet>> = BTreeMap::new();

        for (index, sequence) in sequences.iter().enumerate() {
            let trajectory = index as u32;
            for node in sequence {
                nodes.entry(*node).or_default().insert(trajectory);
            }
            for pair in sequence.windows(2) {
                edges
                    .entry(pair[0])
                    .or_default()
                    .entry(pair[1])
                    .or_default()
                    .insert(trajectory);
            }
        }

        let edges = edges
            .into_iter()
            .map(|(from, outgoing)| (from, outgoing.into_iter().collect()))
            .collect();
        Self { nodes, edges }
    }

    /// Number of distinct nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(|out| out.len()).sum()
    }

    /// Weight of the edge u -> v: distinct trajectories with the transition.
    pub fn edge_weight(&self, from: &NodeKey, to: &NodeKey) -> u32 {
        self.neighbors(from)
            .iter()
            .find(|(neighbor, _)| neighbor == to)
            .map(|(_, support)| support.len() as u32)
            .unwrap_or(0)
    }

    fn neighbors(&self, from: &NodeKey) -> &[(NodeKey, SupportSet)] {
        self.edges.get(from).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Paths recorded by one start node's depth-first search.
struct StartResult {
    recorded: Vec<(Path, SupportSet)>,
    truncated: bool,
}

pub(crate) fn mine_graph(ctx: &MineContext) -> MineOutcome {
    let graph = TransitionGraph::build(&ctx.sequences);
    debug!(
        "[Mine] Transition graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    // One search task per sufficiently-supported start node; the graph is
    // frozen and read-only during the fan-out.
    let starts: Vec<(NodeKey, SupportSet)> = graph
        .nodes
        .iter()
        .filter(|(_, support)| support.len() as u32 >= ctx.min_support)
        .map(|(node, support)| (*node, support.clone()))
        .collect();

    let (outcomes, task_failures) =
        expand_tasks(&starts, "graph search", |(start, support)| {
            dfs_from(&graph, *start, support, ctx)
        });

    let mut results = PathTable::new();
    let mut truncated = false;
    for outcome in outcomes {
        truncated |= outcome.truncated;
        for (path, support) in outcome.recorded {
            results.merge(path, support);
        }
    }

    MineOutcome {
        iterations: starts.len() as u32,
        results,
        truncated,
        pruned_paths: 0,
        task_failures,
    }
}

/// Iterative depth-first search from one start node.
fn dfs_from(
    graph: &TransitionGraph,
    start: NodeKey,
    support: &SupportSet,
    ctx: &MineContext,
) -> Result<StartResult, TaskFailure> {
    let mut recorded: Vec<(Path, SupportSet)> = Vec::new();
    let mut truncated = false;

    // Explicit stack; frames carry the path and the intersection of all
    // edge trajectory sets along it (the exact frequency bound).
    let mut stack: Vec<(Path, SupportSet)> = vec![(Path::single(start), support.clone())];
    let mut visited: HashSet<Path> = HashSet::new();

    while let Some((path, bound)) = stack.pop() {
        if ctx.expired() {
            truncated = true;
            break;
        }

        if path.len() >= ctx.min_path_len {
            recorded.push((path.clone(), bound.clone()));
        }

        let last = path.last().ok_or_else(|| TaskFailure {
            reason: "empty path on graph search stack".to_string(),
        })?;

        if path.len() >= ctx.max_path_len {
            // Length cap: viable continuations exist but are cut off.
            if graph
                .neighbors(last)
                .iter()
                .any(|(_, edge)| bound.intersection(edge).count() as u32 >= ctx.min_support)
            {
                truncated = true;
            }
            continue;
        }

        // Push in reverse so neighbors expand in ascending key order.
        for (neighbor, edge) in graph.neighbors(last).iter().rev() {
            let next_bound: SupportSet = bound.intersection(edge).copied().collect();
            if (next_bound.len() as u32) < ctx.min_support {
                continue;
            }
            let next_path = path.extended(*neighbor);
            // Revisit guard: an identical path is never expanded twice.
            if visited.insert(next_path.clone()) {
                stack.push((next_path, next_bound));
            }
        }
    }

    Ok(StartResult { recorded, truncated })
}
