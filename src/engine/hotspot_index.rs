//! Spatial indexing for hotspot viewport queries.
//!
//! Uses an R-tree over hotspot bounding boxes to answer "which hotspots
//! intersect this map viewport" without scanning every mined path.

use rstar::{RTree, AABB};

use crate::HotspotBounds;

/// Spatial index over hotspot bounds with dirty tracking.
#[derive(Debug, Default)]
pub struct HotspotIndex {
    tree: RTree<HotspotBounds>,
    dirty: bool,
}

impl HotspotIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            dirty: false,
        }
    }

    /// Mark the index as needing rebuild.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check if the index needs rebuild.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Bulk-load the index from hotspot bounds.
    pub fn rebuild(&mut self, bounds: Vec<HotspotBounds>) {
        self.tree = RTree::bulk_load(bounds);
        self.dirty = false;
    }

    /// Clear the index.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.dirty = false;
    }

    /// Ids of hotspots whose bounds intersect the viewport, sorted.
    pub fn query_viewport(
        &self,
        min_lat: f64,
        max_lat: f64,
        min_lng: f64,
        max_lng: f64,
    ) -> Vec<String> {
        let search = AABB::from_corners([min_lng, min_lat], [max_lng, max_lat]);
        let mut ids: Vec<String> = self
            .tree
            .locate_in_envelope_intersecting(&search)
            .map(|b| b.hotspot_id.clone())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Hotspots near a point, within a square of `radius_degrees`.
    pub fn find_nearby(&self, lat: f64, lng: f64, radius_degrees: f64) -> Vec<String> {
        self.query_viewport(
            lat - radius_degrees,
            lat + radius_degrees,
            lng - radius_degrees,
            lng + radius_degrees,
        )
    }

    /// Number of indexed hotspots.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
