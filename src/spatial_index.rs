//! Spatial Index Module
//!
//! R-tree over point pixel positions for hit testing and area selection.
//! Point picking and rectangle queries drop from O(n) to O(log n).

use crate::geometry::PixelPos;
use crate::point_store::PointId;
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// A spatial entry for one placed point.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub point_id: PointId,
    pub x: f64,
    pub y: f64,
}

impl SpatialEntry {
    pub fn new(point_id: PointId, pos: PixelPos) -> Self {
        Self {
            point_id,
            x: pos.x,
            y: pos.y,
        }
    }

    #[inline]
    fn distance_to(&self, pos: PixelPos) -> f64 {
        (self.x - pos.x).hypot(self.y - pos.y)
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.point_id == other.point_id
    }
}

/// Spatial index of point positions.
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<PointId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, point_id: PointId, pos: PixelPos) {
        if let Some(old_entry) = self.entries.remove(&point_id) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(point_id, pos);
        self.tree.insert(entry);
        self.entries.insert(point_id, entry);
    }

    pub fn remove(&mut self, point_id: PointId) -> bool {
        if let Some(entry) = self.entries.remove(&point_id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// Closest point within `radius` pixels. Equal distances resolve to the
    /// lowest id so picking is deterministic for stacked points.
    pub fn nearest_within(&self, pos: PixelPos, radius: f64) -> Option<PointId> {
        let envelope = AABB::from_corners(
            [pos.x - radius, pos.y - radius],
            [pos.x + radius, pos.y + radius],
        );

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| (entry.distance_to(pos), entry.point_id))
            .filter(|(d, _)| *d <= radius)
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
            .map(|(_, id)| id)
    }

    /// All points inside the rectangle spanned by two corners, bounds inclusive.
    pub fn query_rect(&self, a: PixelPos, b: PixelPos) -> Vec<PointId> {
        let envelope = AABB::from_corners([a.x, a.y], [b.x, b.y]);

        let mut ids: Vec<PointId> = self
            .tree
            .locate_in_envelope(&envelope)
            .map(|entry| entry.point_id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rebuild<I>(&mut self, points: I)
    where
        I: Iterator<Item = (PointId, PixelPos)>,
    {
        let entries: Vec<SpatialEntry> = points
            .map(|(id, pos)| SpatialEntry::new(id, pos))
            .collect();

        self.entries = entries.iter().map(|e| (e.point_id, *e)).collect();
        self.tree = RTree::bulk_load(entries);
        tracing::trace!(points = self.entries.len(), "Spatial index rebuilt");
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
