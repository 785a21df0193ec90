//! # Pathmine
//!
//! Trajectory hotspot mining library for movement data.
//!
//! This library provides:
//! - Frequent sub-path ("hotspot") mining over GPS trajectory batches
//! - Three mining strategies: Apriori-style join expansion, in-order
//!   traversal expansion, and transition-graph depth-first search
//! - Automatic strategy selection from data shape
//! - Deterministic canonical hashing for idempotent persistence
//! - Hotspot similarity scoring for shared-commute matching
//! - An owner-scoped engine with spatial hotspot queries
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel frontier expansion with rayon
//! - **`cli`** - Enable the `pathmine` command-line binary
//! - **`synthetic`** - Enable the seeded synthetic trajectory generator
//!
//! ## Quick Start
//!
//! ```rust
//! use pathmine::{mine, MineConfig, TrackPoint, Trajectory};
//!
//! // Three trips sharing the same short commute
//! let commute = |id: &str| {
//!     Trajectory::new(
//!         id,
//!         "user-1",
//!         vec![
//!             TrackPoint::new(47.3769, 8.5417, 0),
//!             TrackPoint::new(47.3775, 8.5425, 60),
//!             TrackPoint::new(47.3781, 8.5433, 120),
//!         ],
//!     )
//! };
//!
//! let batch = vec![commute("trip-1"), commute("trip-2"), commute("trip-3")];
//! let mined = mine(&batch, &MineConfig::new(2, 2)).unwrap();
//!
//! assert!(!mined.hotspots.is_empty());
//! println!("{} hotspots, strategy {}", mined.hotspots.len(), mined.stats.strategy);
//! ```

use rstar::{RTreeObject, AABB};
use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{MineError, Result};

// Geographic utilities (haversine distance, meter/degree conversion)
pub mod geo_utils;

// Trajectory batch validation and canonicalization
pub mod normalize;
pub use normalize::normalize_batch;

// Mining strategy selection from data shape
pub mod strategy;
pub use strategy::{select_strategy, MiningStrategy, SelectorConfig};

// Path table substrate shared by the table-based miners
pub mod table;
pub use table::{PathTable, SupportSet};

// Hotspot mining pipeline (join / traversal / graph-DFS miners)
pub mod mine;
pub use mine::{mine, MineConfig, Mined, MiningStats, TransitionGraph};

// Deterministic result ordering and idempotency hashing
pub mod canonical;
pub use canonical::{canonical_hash, canonical_sort};

// Hotspot similarity scoring for shared-commute matching
pub mod similarity;
pub use similarity::{hotspot_similarity, SimilarityConfig};

// Boundary traits for trajectory sources and hotspot persistence
pub mod sink;
pub use sink::{
    HotspotSink, MemoryHotspotSink, MemoryTrajectorySource, PersistOutcome, TrajectorySource,
};

// Owner-scoped engine with lazy mining and spatial lookup
pub mod engine;
pub use engine::{EngineStats, HotspotEngine, HotspotIndex, TrajectoryStore};

// Synthetic trajectory generation for benches and stress tests
#[cfg(feature = "synthetic")]
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A recorded GPS fix with latitude, longitude and a unix timestamp.
///
/// # Example
/// ```
/// use pathmine::TrackPoint;
/// let point = TrackPoint::new(51.5074, -0.1278, 1_700_000_000); // London
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Unix timestamp in seconds. Batches without timing data may omit it;
    /// it then defaults to 0 and geometry-only mining is unaffected.
    #[serde(default)]
    pub timestamp: i64,
}

impl TrackPoint {
    /// Create a new track point.
    pub fn new(latitude: f64, longitude: f64, timestamp: i64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// An owner-tagged, uniquely identified sequence of track points.
///
/// Normalization (see [`normalize_batch`]) sorts the points ascending by
/// timestamp and drops trajectories that keep fewer than 2 valid points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trajectory {
    /// Unique identifier for this trajectory (e.g. a trip id)
    pub id: String,
    /// Identifier of the user the trajectory belongs to
    pub owner_id: String,
    /// Recorded points, time-ordered after normalization
    pub points: Vec<TrackPoint>,
}

impl Trajectory {
    /// Create a new trajectory.
    pub fn new(id: &str, owner_id: &str, points: Vec<TrackPoint>) -> Self {
        Self {
            id: id.to_string(),
            owner_id: owner_id.to_string(),
            points,
        }
    }

    /// Number of points in the trajectory.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }
}

/// Rule deciding when two points from different trajectories are
/// "the same place".
///
/// Fixed once per mining run via [`MineConfig`]; it changes which node keys
/// trajectories share and therefore which sub-paths can become frequent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeIdentity {
    /// Points match when their coordinates match (timestamps ignored).
    #[default]
    Geometry,
    /// Points match only when coordinates and timestamp all match.
    GeometryAndTime,
}

impl NodeIdentity {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeIdentity::Geometry => "geometry",
            NodeIdentity::GeometryAndTime => "geometry-and-time",
        }
    }
}

impl std::fmt::Display for NodeIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NodeIdentity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "geometry" => Ok(NodeIdentity::Geometry),
            "geometry-and-time" | "geometry_and_time" | "full" => {
                Ok(NodeIdentity::GeometryAndTime)
            }
            _ => Err(format!("unknown node identity: {}", s)),
        }
    }
}

/// Quantization factor for canonical node keys: microdegrees (~0.11 m).
const NODE_KEY_SCALE: f64 = 1_000_000.0;

/// Canonical, hashable identity of a track point under a [`NodeIdentity`]
/// policy.
///
/// Coordinates are quantized to microdegrees so floating-point fixes gain
/// defined equality and hashing; the timestamp component is present only
/// under [`NodeIdentity::GeometryAndTime`]. Derived `Ord` gives every key a
/// stable total order, which the miners use for deterministic expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    lat_e6: i32,
    lon_e6: i32,
    at: Option<i64>,
}

impl NodeKey {
    /// Build the canonical key for a point under the given identity policy.
    pub fn from_point(point: &TrackPoint, identity: NodeIdentity) -> Self {
        Self {
            lat_e6: (point.latitude * NODE_KEY_SCALE).round() as i32,
            lon_e6: (point.longitude * NODE_KEY_SCALE).round() as i32,
            at: match identity {
                NodeIdentity::Geometry => None,
                NodeIdentity::GeometryAndTime => Some(point.timestamp),
            },
        }
    }

    /// Latitude in degrees (de-quantized).
    pub fn latitude(&self) -> f64 {
        f64::from(self.lat_e6) / NODE_KEY_SCALE
    }

    /// Longitude in degrees (de-quantized).
    pub fn longitude(&self) -> f64 {
        f64::from(self.lon_e6) / NODE_KEY_SCALE
    }

    /// Timestamp component, if the run's identity policy keeps it.
    pub fn timestamp(&self) -> Option<i64> {
        self.at
    }

    /// De-quantize into an output path node.
    pub fn to_node(self) -> PathNode {
        PathNode {
            latitude: self.latitude(),
            longitude: self.longitude(),
            timestamp: self.at,
        }
    }
}

/// An ordered tuple of node identities representing a candidate sub-route.
///
/// Paths are immutable once constructed; extension and joining build new
/// paths. Equality, hashing and ordering follow the node sequence, so a
/// `Path` can key tables, visited-sets and canonical sorts directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    nodes: Vec<NodeKey>,
}

impl Path {
    /// A path of a single node.
    pub fn single(node: NodeKey) -> Self {
        Self { nodes: vec![node] }
    }

    /// A path of two adjacent nodes.
    pub fn pair(from: NodeKey, to: NodeKey) -> Self {
        Self {
            nodes: vec![from, to],
        }
    }

    /// Build a path from an explicit node sequence.
    pub fn from_nodes(nodes: Vec<NodeKey>) -> Self {
        Self { nodes }
    }

    /// The node sequence.
    pub fn nodes(&self) -> &[NodeKey] {
        &self.nodes
    }

    /// Path length in nodes (k for a k-path).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn first(&self) -> Option<&NodeKey> {
        self.nodes.first()
    }

    pub fn last(&self) -> Option<&NodeKey> {
        self.nodes.last()
    }

    /// All nodes except the first (join predicate: suffix of the left path).
    pub fn suffix(&self) -> &[NodeKey] {
        &self.nodes[1..]
    }

    /// All nodes except the last (join predicate: prefix of the right path).
    pub fn prefix(&self) -> &[NodeKey] {
        &self.nodes[..self.nodes.len() - 1]
    }

    /// New path with `node` appended.
    pub fn extended(&self, node: NodeKey) -> Self {
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.extend_from_slice(&self.nodes);
        nodes.push(node);
        Self { nodes }
    }

    /// Join with another path of equal length whose prefix matches this
    /// path's suffix. Returns the combined (len + 1)-path.
    pub fn joined(&self, other: &Path) -> Option<Self> {
        if self.nodes.len() != other.nodes.len() || self.suffix() != other.prefix() {
            return None;
        }
        other.last().map(|last| self.extended(*last))
    }

    /// De-quantize into output path nodes.
    pub fn to_polyline(&self) -> Vec<PathNode> {
        self.nodes.iter().map(|n| n.to_node()).collect()
    }
}

/// A de-quantized node of a mined hotspot path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathNode {
    pub latitude: f64,
    pub longitude: f64,
    /// Present only when the run's node identity policy keeps timestamps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// A frequent sub-path: the engine's output unit.
///
/// A hotspot is a path of length >= `min_path_len` supported by at least
/// `min_support` distinct trajectories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    /// Stable identifier assigned after canonical ordering (`hs_<n>`)
    pub id: String,
    /// The mined sub-path, de-quantized for display
    pub polyline: Vec<PathNode>,
    /// Number of distinct trajectories containing the path
    pub support: u32,
    /// Sorted ids of the supporting trajectories
    pub trajectory_ids: Vec<String>,
}

impl Hotspot {
    /// Path length in nodes.
    pub fn len(&self) -> usize {
        self.polyline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polyline.is_empty()
    }

    /// Bounding box of the hotspot path (for spatial indexing).
    pub fn bounds(&self) -> Option<HotspotBounds> {
        if self.polyline.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for node in &self.polyline {
            min_lat = min_lat.min(node.latitude);
            max_lat = max_lat.max(node.latitude);
            min_lng = min_lng.min(node.longitude);
            max_lng = max_lng.max(node.longitude);
        }

        Some(HotspotBounds {
            hotspot_id: self.id.clone(),
            min_lat,
            max_lat,
            min_lng,
            max_lng,
            support: self.support,
        })
    }
}

// ============================================================================
// Spatial Indexing Types
// ============================================================================

/// Bounding box of a hotspot (used for spatial indexing).
#[derive(Debug, Clone)]
pub struct HotspotBounds {
    pub hotspot_id: String,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
    pub support: u32,
}

impl RTreeObject for HotspotBounds {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_lng, self.min_lat], [self.max_lng, self.max_lat])
    }
}
