//! Authoritative table of placed vertices.
//!
//! Ids are allocated from a counter that only moves forward; a deleted id is
//! never handed out again until [`PointStore::clear`]. Each point keeps its
//! metric position as the durable truth and its pixel position as a view
//! that [`PointStore::rescale`] recomputes.

use crate::error::{EngineError, EngineResult};
use crate::geometry::{MetricPos, PixelPos};
use crate::spatial_index::SpatialIndex;
use crate::transform::CoordinateTransform;
use serde::Serialize;
use std::collections::BTreeMap;

pub type PointId = u64;

/// A placed vertex.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub id: PointId,
    pub pixel: PixelPos,
    pub real: MetricPos,
}

pub struct PointStore {
    points: BTreeMap<PointId, Point>,
    index: SpatialIndex,
    next_id: PointId,
}

impl PointStore {
    pub fn new() -> Self {
        Self {
            points: BTreeMap::new(),
            index: SpatialIndex::new(),
            next_id: 1,
        }
    }

    /// Store a new point and return its id. Positions may coincide with
    /// existing points.
    pub fn create(&mut self, pixel: PixelPos, real: MetricPos) -> PointId {
        let id = self.next_id;
        self.next_id += 1;
        self.points.insert(id, Point { id, pixel, real });
        self.index.insert(id, pixel);
        id
    }

    pub fn get(&self, id: PointId) -> EngineResult<&Point> {
        self.points.get(&id).ok_or(EngineError::PointNotFound(id))
    }

    #[inline]
    pub fn contains(&self, id: PointId) -> bool {
        self.points.contains_key(&id)
    }

    /// Remove a point. Shapes still referencing it are the caller's concern.
    pub fn delete(&mut self, id: PointId) -> EngineResult<Point> {
        let point = self
            .points
            .remove(&id)
            .ok_or(EngineError::PointNotFound(id))?;
        self.index.remove(id);
        Ok(point)
    }

    /// Re-snap every pixel position from its metric position.
    pub fn rescale(&mut self, transform: &CoordinateTransform) {
        for point in self.points.values_mut() {
            point.pixel = transform.metric_to_grid(point.real);
        }
        self.index
            .rebuild(self.points.values().map(|p| (p.id, p.pixel)));
    }

    /// Drop all points and restart ids at 1.
    pub fn clear(&mut self) {
        self.points.clear();
        self.index.clear();
        self.next_id = 1;
    }

    /// Points in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.values()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Id the next `create` will return.
    #[inline]
    pub fn next_id(&self) -> PointId {
        self.next_id
    }

    /// The point nearest to `pos` within `radius` pixels.
    pub fn point_at(&self, pos: PixelPos, radius: f64) -> Option<PointId> {
        self.index.nearest_within(pos, radius)
    }

    /// Points whose pixel position lies in the rectangle, bounds inclusive.
    pub fn points_in_rect(&self, a: PixelPos, b: PixelPos) -> Vec<PointId> {
        self.index.query_rect(a, b)
    }
}

impl Default for PointStore {
    fn default() -> Self {
        Self::new()
    }
}
