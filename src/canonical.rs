//! Deterministic result ordering and idempotency hashing.
//!
//! Two mining runs over equal input can surface hotspots in different
//! internal order (hash map iteration, parallel reduction). The canonical
//! form fixes that: hotspots sort by their quantized node sequence, and the
//! content hash is computed over the sorted form, so equal sets always hash
//! identically. The hash covers path content only — geometry, optional
//! timestamps and node order — not the volatile `hs_<n>` ids or trajectory
//! id lists, so re-uploads that merely renumber trajectories still
//! deduplicate.

use sha2::{Digest, Sha256};

use crate::{Hotspot, PathNode};

/// Quantized, totally ordered form of one hotspot polyline.
type CanonicalKey = Vec<(i64, i64, Option<i64>)>;

fn canonical_key(polyline: &[PathNode]) -> CanonicalKey {
    polyline
        .iter()
        .map(|node| {
            (
                (node.latitude * 1_000_000.0).round() as i64,
                (node.longitude * 1_000_000.0).round() as i64,
                node.timestamp,
            )
        })
        .collect()
}

fn canonical_line(key: &CanonicalKey) -> String {
    let nodes: Vec<String> = key
        .iter()
        .map(|(lat, lon, at)| match at {
            Some(at) => format!("{},{},{}", lat, lon, at),
            None => format!("{},{},-", lat, lon),
        })
        .collect();
    nodes.join(";")
}

/// Sort hotspots into canonical order (by quantized node sequence).
///
/// [`crate::mine`] returns hotspots already in this order; the function is
/// exposed for callers that reassemble sets from external storage.
pub fn canonical_sort(hotspots: &mut [Hotspot]) {
    hotspots.sort_by_cached_key(|h| canonical_key(&h.polyline));
}

/// Deterministic content hash over a hotspot set.
///
/// Stable under element reordering: the serialized lines are sorted before
/// hashing. Returns lowercase hex SHA-256. This is the idempotency key a
/// persistence collaborator uses to skip duplicate inserts.
pub fn canonical_hash(hotspots: &[Hotspot]) -> String {
    let mut lines: Vec<String> = hotspots
        .iter()
        .map(|h| canonical_line(&canonical_key(&h.polyline)))
        .collect();
    lines.sort_unstable();

    let mut hasher = Sha256::new();
    for line in &lines {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}
