//! Concurrency harness for per-iteration frontier expansion.
//!
//! One task per frontier item, each reading structures frozen for the
//! current iteration and producing its contributions independently. The
//! rayon pool is the bounded worker set; collecting the mapped results is
//! the iteration barrier. Reduction back into a table happens
//! single-threaded in the calling miner, so no worker ever mutates shared
//! state concurrently with another.
//!
//! Task failures are explicit values, not panics: a failed task's
//! contribution is logged and dropped, never fatal to the run.

use log::warn;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Why a single extension task was dropped.
#[derive(Debug, Clone)]
pub(crate) struct TaskFailure {
    pub reason: String,
}

impl std::fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Run one task per item and collect the successful outputs in item order.
///
/// Returns the outputs plus the number of failed tasks. Failures are logged
/// at the barrier; their contributions are dropped. Output order follows
/// input order whether or not the `parallel` feature is active, so the
/// caller's reduction is deterministic.
pub(crate) fn expand_tasks<I, T, F>(items: &[I], stage: &str, task: F) -> (Vec<T>, u32)
where
    I: Sync,
    T: Send,
    F: Fn(&I) -> Result<T, TaskFailure> + Sync,
{
    #[cfg(feature = "parallel")]
    let outputs: Vec<Result<T, TaskFailure>> = items.par_iter().map(&task).collect();

    #[cfg(not(feature = "parallel"))]
    let outputs: Vec<Result<T, TaskFailure>> = items.iter().map(&task).collect();

    let mut results = Vec::with_capacity(outputs.len());
    let mut failures = 0u32;
    for output in outputs {
        match output {
            Ok(value) => results.push(value),
            Err(failure) => {
                failures += 1;
                warn!("[Mine] Dropped {} task: {}", stage, failure);
            }
        }
    }
    (results, failures)
}
