//! Synthetic trajectory generator for stress testing and benchmarking.
//!
//! Generates trajectory batches with a known shared corridor, providing
//! ground truth for validating the miners. Corridor coordinates repeat
//! exactly across trajectories (snapped to a microdegree grid), so node
//! identity matches the way repeated fixes from a map-matched feed would.
//!
//! Feature-gated behind `synthetic` — not included in production builds.
//!
//! # Example
//!
//! ```rust
//! use pathmine::synthetic::{CorridorSpec, SyntheticScenario};
//!
//! let scenario = SyntheticScenario {
//!     trajectory_count: 20,
//!     corridor: CorridorSpec {
//!         node_count: 6,
//!         traversal_fraction: 0.5,
//!     },
//!     ..Default::default()
//! };
//!
//! let dataset = scenario.generate();
//! assert_eq!(dataset.trajectories.len(), 20);
//! assert_eq!(dataset.expected_corridor.len(), 6);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geo_utils::{meters_to_degrees, meters_to_degrees_lat};
use crate::{TrackPoint, Trajectory};

/// Seconds between consecutive synthetic fixes.
const POINT_INTERVAL_SECS: i64 = 60;

/// Base timestamp for generated batches.
const BASE_TIMESTAMP: i64 = 1_700_000_000;

/// The shared corridor planted in a generated batch.
#[derive(Debug, Clone, Copy)]
pub struct CorridorSpec {
    /// Number of corridor nodes (corridor path length).
    pub node_count: usize,
    /// Fraction of trajectories that traverse the corridor (0.0-1.0).
    pub traversal_fraction: f64,
}

/// Scenario configuration for generating synthetic trajectories.
#[derive(Debug, Clone)]
pub struct SyntheticScenario {
    /// Origin of the corridor (latitude, longitude).
    pub origin: (f64, f64),
    /// Spacing between consecutive generated nodes in meters.
    pub grid_step_meters: f64,
    /// Number of trajectories to generate.
    pub trajectory_count: usize,
    /// The shared corridor (ground truth hotspot).
    pub corridor: CorridorSpec,
    /// Unique detour nodes prepended/appended around the corridor.
    pub detour_len: usize,
    /// RNG seed for deterministic reproduction.
    pub seed: u64,
}

impl Default for SyntheticScenario {
    fn default() -> Self {
        Self {
            origin: (47.3769, 8.5417),
            grid_step_meters: 50.0,
            trajectory_count: 20,
            corridor: CorridorSpec {
                node_count: 6,
                traversal_fraction: 0.5,
            },
            detour_len: 3,
            seed: 42,
        }
    }
}

/// A generated batch with its ground truth.
#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    /// Generated trajectories, all owned by `owner-synthetic`.
    pub trajectories: Vec<Trajectory>,
    /// Corridor coordinates (latitude, longitude) every traversing
    /// trajectory contains contiguously.
    pub expected_corridor: Vec<(f64, f64)>,
    /// Number of trajectories traversing the corridor (the corridor
    /// path's expected support).
    pub corridor_support: usize,
}

/// Snap a coordinate to the microdegree grid the node keys use, so
/// generated fixes repeat exactly.
fn snap(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

impl SyntheticScenario {
    /// Generate the dataset. Deterministic for a fixed scenario.
    pub fn generate(&self) -> SyntheticDataset {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let (origin_lat, origin_lon) = self.origin;
        let step_lon = meters_to_degrees(self.grid_step_meters, origin_lat);
        let step_lat = meters_to_degrees_lat(self.grid_step_meters);

        // Corridor runs east from the origin.
        let corridor: Vec<(f64, f64)> = (0..self.corridor.node_count)
            .map(|i| (snap(origin_lat), snap(origin_lon + i as f64 * step_lon)))
            .collect();

        let traversing = ((self.trajectory_count as f64) * self.corridor.traversal_fraction)
            .round() as usize;
        let traversing = traversing.min(self.trajectory_count);

        let mut trajectories = Vec::with_capacity(self.trajectory_count);
        for n in 0..self.trajectory_count {
            let start_at = BASE_TIMESTAMP + (n as i64) * 3600;
            let coords = if n < traversing {
                // Unique approach north of the corridor, then the corridor
                // itself, then a unique departure.
                let own_lat = snap(origin_lat + (n + 1) as f64 * step_lat);
                let mut coords: Vec<(f64, f64)> = (0..self.detour_len)
                    .map(|i| (own_lat, snap(origin_lon + i as f64 * step_lon)))
                    .collect();
                coords.extend(corridor.iter().copied());
                coords.extend((0..self.detour_len).map(|i| {
                    (
                        own_lat,
                        snap(origin_lon + (self.corridor.node_count + i) as f64 * step_lon),
                    )
                }));
                coords
            } else {
                // Random walk south of the corridor on this trajectory's own
                // latitude band; shares no node with any other trajectory.
                let own_lat = snap(origin_lat - (n + 1) as f64 * step_lat);
                let mut lon = origin_lon;
                (0..self.corridor.node_count + 2 * self.detour_len)
                    .map(|_| {
                        lon += step_lon * rng.gen_range(1..=3) as f64;
                        (own_lat, snap(lon))
                    })
                    .collect()
            };

            let points: Vec<TrackPoint> = coords
                .into_iter()
                .enumerate()
                .map(|(i, (lat, lon))| {
                    TrackPoint::new(lat, lon, start_at + i as i64 * POINT_INTERVAL_SECS)
                })
                .collect();

            trajectories.push(Trajectory::new(
                &format!("synthetic-{}", n),
                "owner-synthetic",
                points,
            ));
        }

        SyntheticDataset {
            trajectories,
            expected_corridor: corridor,
            corridor_support: traversing,
        }
    }
}
