//! Trajectory batch validation and canonicalization.
//!
//! Every miner consumes the output of [`normalize_batch`]: points with
//! invalid coordinates are dropped, surviving points are time-sorted, and
//! trajectories left with fewer than 2 points are excluded. An empty batch
//! (before or after cleaning) is the only hard failure of this stage.

use log::debug;

use crate::error::{MineError, Result};
use crate::Trajectory;

/// Normalize a single trajectory.
///
/// Returns `None` when fewer than 2 valid points remain, in which case the
/// trajectory is excluded from mining.
pub fn normalize_trajectory(trajectory: &Trajectory) -> Option<Trajectory> {
    let mut points: Vec<_> = trajectory
        .points
        .iter()
        .copied()
        .filter(|p| p.is_valid())
        .collect();

    let dropped = trajectory.points.len() - points.len();
    if dropped > 0 {
        debug!(
            "[Normalize] Trajectory {}: dropped {} invalid point(s)",
            trajectory.id, dropped
        );
    }

    if points.len() < 2 {
        debug!(
            "[Normalize] Trajectory {} excluded: {} valid point(s)",
            trajectory.id,
            points.len()
        );
        return None;
    }

    // Stable sort keeps recording order for points sharing a timestamp.
    points.sort_by_key(|p| p.timestamp);

    Some(Trajectory {
        id: trajectory.id.clone(),
        owner_id: trajectory.owner_id.clone(),
        points,
    })
}

/// Normalize a trajectory batch for mining.
///
/// # Errors
///
/// - [`MineError::EmptyBatch`] when the input batch is empty.
/// - [`MineError::AllTrajectoriesDiscarded`] when cleaning leaves nothing
///   to mine.
pub fn normalize_batch(trajectories: &[Trajectory]) -> Result<Vec<Trajectory>> {
    if trajectories.is_empty() {
        return Err(MineError::EmptyBatch);
    }

    let normalized: Vec<Trajectory> = trajectories.iter().filter_map(normalize_trajectory).collect();

    if normalized.is_empty() {
        return Err(MineError::AllTrajectoriesDiscarded {
            discarded: trajectories.len(),
        });
    }

    debug!(
        "[Normalize] {} of {} trajectories usable",
        normalized.len(),
        trajectories.len()
    );

    Ok(normalized)
}
