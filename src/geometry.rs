//! Pure 2D geometry helpers.
//!
//! Positions come in two flavors that must not be mixed: [`PixelPos`] is the
//! snapped on-canvas view, [`MetricPos`] is the real-world position in meters.
//! Rings passed to the polygon functions are circular: the closing edge from
//! the last vertex back to the first is implied, never repeated.

use serde::{Deserialize, Serialize};

/// Position on the canvas, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelPos {
    pub x: f64,
    pub y: f64,
}

impl PixelPos {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_to(&self, other: &PixelPos) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Real-world position, in meters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricPos {
    pub x: f64,
    pub y: f64,
}

impl MetricPos {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between two metric points.
#[inline]
pub fn distance(a: MetricPos, b: MetricPos) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Shoelace sum over the ring, halved. Positive for counterclockwise
/// winding in a y-up frame.
pub fn signed_area(ring: &[MetricPos]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let n = ring.len();
    let twice = (0..n).fold(0.0, |acc, i| {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        acc + (a.x * b.y - b.x * a.y)
    });
    twice / 2.0
}

/// Unsigned polygon area in square meters; 0 for fewer than 3 points.
#[inline]
pub fn polygon_area(ring: &[MetricPos]) -> f64 {
    signed_area(ring).abs()
}

/// Even-odd ray casting. Points exactly on an edge may land either way.
pub fn point_in_polygon(test: PixelPos, ring: &[PixelPos]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (pi, pj) = (ring[i], ring[j]);
        if (pi.y > test.y) != (pj.y > test.y)
            && test.x < (pj.x - pi.x) * (test.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// True if the segment is within `tolerance` pixels of horizontal or vertical.
#[inline]
pub fn is_axis_aligned(a: PixelPos, b: PixelPos, tolerance: f64) -> bool {
    (a.x - b.x).abs() <= tolerance || (a.y - b.y).abs() <= tolerance
}

/// Vertex average of a ring, used to anchor area labels.
pub fn centroid(ring: &[PixelPos]) -> Option<PixelPos> {
    if ring.is_empty() {
        return None;
    }
    let n = ring.len() as f64;
    let (sx, sy) = ring
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(PixelPos::new(sx / n, sy / n))
}
