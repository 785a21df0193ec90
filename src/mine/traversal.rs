//! Traversal-expansion miner: contiguous in-order sequence extension.
//!
//! Seeds a table of single-node paths, then grows path length one node at a
//! time by walking each supporting trajectory's literal point sequence: a
//! (k+1)-path becomes a candidate only where it actually occurs as a
//! contiguous run. No synthetic joins across unrelated trajectories, so
//! this miner stays faithful to trajectory order and cannot blow up on
//! denser data the way pairwise joining can — but it also cannot discover a
//! path that never occurs contiguously in any single trajectory.

use log::debug;

use crate::table::PathTable;
use crate::Path;

use super::{expand_tasks, MineContext, MineOutcome, TaskFailure};

pub(crate) fn mine_traversal(ctx: &MineContext) -> MineOutcome {
    let mut results = PathTable::new();
    let mut pruned_paths = 0usize;
    let mut task_failures = 0u32;
    let mut truncated = false;

    let mut current = PathTable::seed_nodes(&ctx.sequences);
    pruned_paths += current.prune(ctx.min_support);
    results.absorb(&current);

    let mut iterations = 0u32;
    // All paths in the current table share this length.
    let mut path_len = 1usize;

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

        let (contributions, failures) = expand_tasks(&frontier, "traversal", |(path, support)| {
            if path.is_empty() {
                return Err(TaskFailure {
                    reason: "empty path in traversal frontier".to_string(),
                });
            }
            // Scan only the trajectories already known to contain the path.
            let mut extensions: Vec<(Path, u32)> = Vec::new();
            for &trajectory in support.iter() {
                let nodes = &ctx.sequences[trajectory as usize];
                if nodes.len() <= path.len() {
                    continue;
                }
                for start in 0..(nodes.len() - path.len()) {
                    if &nodes[start..start + path.len()] == path.nodes() {
                        extensions.push((path.extended(nodes[start + path.len()]), trajectory));
                    }
                }
            }
            Ok(extensions)
        });
        task_failures += failures;

        let mut next = PathTable::new();
        for extensions in contributions {
            for (path, trajectory) in extensions {
                next.add(path, trajectory);
            }
        }
        pruned_paths += next.prune(ctx.min_support);

        debug!(
            "[Mine] Traversal iteration {}: {} contiguous paths of length {}",
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
