//! Join-expansion miner: Apriori-style path table self-join.
//!
//! Seeds a table of 2-paths from every adjacent node pair, then repeatedly
//! joins surviving paths whose suffix matches another survivor's prefix.
//! The joined path's support set is the intersection of its parents', so
//! support can only shrink with length (anti-monotone) and pruning by
//! `min_support` at every step is safe.
//!
//! The join is synthetic: it can discover a path supported across
//! trajectories even when no single trajectory contains it contiguously
//! beyond its constituent pairs. Best suited to sparse batches where the
//! pairwise search space stays small.

use std::collections::HashMap;

use log::debug;

use crate::table::{PathTable, SupportSet};
use crate::{NodeKey, Path};

use super::{expand_tasks, MineContext, MineOutcome, TaskFailure};

pub(crate) fn mine_join(ctx: &MineContext) -> MineOutcome {
    let mut results = PathTable::new();
    let mut pruned_paths = 0usize;
    let mut task_failures = 0u32;
    let mut truncated = false;

    // Single-node support pass so the kmin = 1 boundary holds for this
    // strategy too.
    if ctx.min_path_len <= 1 {
        let mut nodes = PathTable::seed_nodes(&ctx.sequences);
        pruned_paths += nodes.prune(ctx.min_support);
        results.absorb(&nodes);
    }

    let mut current = PathTable::seed_pairs(&ctx.sequences);
    pruned_paths += current.prune(ctx.min_support);
    results.absorb(&current);

    let mut iterations = 0u32;
    let mut path_len = 2usize;

    while !current.is_empty() {
        if iterations >= ctx.max_iterations || path_len >= ctx.max_path_len {
            truncated = true;
            break;
        }
        if ctx.expired() {
            truncated = true;
            break;
        }

        let frontier = current.frontier();

        // Prefix index over the frozen frontier: join partners for a path
        // are exactly the entries sharing its suffix as their prefix.
        let mut by_prefix: HashMap<&[NodeKey], Vec<usize>> = HashMap::new();
        for (index, (path, _)) in frontier.iter().enumerate() {
            by_prefix.entry(path.prefix()).or_default().push(index);
        }

        let (contributions, failures) = expand_tasks(&frontier, "join", |(path, support)| {
            if path.is_empty() {
                return Err(TaskFailure {
                    reason: "empty path in join frontier".to_string(),
                });
            }
            let mut extensions: Vec<(Path, SupportSet)> = Vec::new();
            if let Some(partners) = by_prefix.get(path.suffix()) {
                for &partner in partners {
                    let (other, other_support) = &frontier[partner];
                    let combined: SupportSet =
                        support.intersection(other_support).copied().collect();
                    if combined.len() as u32 >= ctx.min_support {
                        if let Some(joined) = path.joined(other) {
                            extensions.push((joined, combined));
                        }
                    }
                }
            }
            Ok(extensions)
        });
        task_failures += failures;

        let mut next = PathTable::new();
        for extensions in contributions {
            for (path, support) in extensions {
                next.merge(path, support);
            }
        }
        pruned_paths += next.prune(ctx.min_support);

        debug!(
            "[Mine] Join iteration {}: {} candidate paths of length {}",
            iterations + 1,
            next.len(),
            path_len + 1
        );

        results.absorb(&next);
        current = next;
        iterations += 1;
        path_len += 1;
    }

    MineOutcome {
        results,
        iterations,
        truncated,
        pruned_paths: pruned_paths as u32,
        task_failures,
    }
}
