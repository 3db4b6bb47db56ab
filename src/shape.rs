//! Polygons and polylines built from point ids.
//!
//! A closed polygon is an implicit ring: its id sequence never repeats the
//! first id, and the closing segment from the last vertex back to the first
//! is produced by iteration. The same ring convention is used by the area
//! and containment helpers in [`crate::geometry`].

use crate::constants::{AUTO_NAME_PREFIX, MIN_CLOSED_POINTS, SHAPE_LIGHTNESS, SHAPE_SATURATION};
use crate::error::{EngineError, EngineResult};
use crate::geometry::{self, MetricPos, PixelPos};
use crate::point_store::{Point, PointId, PointStore};
use rand::Rng;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum ShapeKind {
    /// Closable outline with an area
    #[default]
    Polygon,
    /// Open measured line; never closes
    Polyline,
}

/// Display color as an HSL hue; saturation and lightness are fixed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ShapeColor {
    pub hue: f32,
}

impl ShapeColor {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            hue: rng.gen_range(0.0..360.0),
        }
    }

    pub fn to_css(&self) -> String {
        format!(
            "hsl({:.0}, {}%, {}%)",
            self.hue, SHAPE_SATURATION, SHAPE_LIGHTNESS
        )
    }
}

/// One edge of a shape with its real-world length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub length_m: f64,
}

impl Segment {
    fn between(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            length_m: geometry::distance(start.real, end.real),
        }
    }

    /// Pixel midpoint, where the length label goes.
    pub fn midpoint(&self) -> PixelPos {
        PixelPos::new(
            (self.start.pixel.x + self.end.pixel.x) / 2.0,
            (self.start.pixel.y + self.end.pixel.y) / 2.0,
        )
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub name: String,
    pub color: ShapeColor,
    points: Vec<PointId>,
    closed: bool,
}

impl Shape {
    pub fn new(kind: ShapeKind, color: ShapeColor) -> Self {
        Self {
            kind,
            name: String::new(),
            color,
            points: Vec::new(),
            closed: false,
        }
    }

    /// Auto-generated name for the shape at list position `index`.
    pub fn auto_name(index: usize) -> String {
        format!("{} {}", AUTO_NAME_PREFIX, index + 1)
    }

    #[inline]
    pub fn points(&self) -> &[PointId] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[inline]
    pub fn contains_point(&self, id: PointId) -> bool {
        self.points.contains(&id)
    }

    /// The closing anchor: a click near it closes the shape.
    #[inline]
    pub fn first_point(&self) -> Option<PointId> {
        self.points.first().copied()
    }

    #[inline]
    pub fn last_point(&self) -> Option<PointId> {
        self.points.last().copied()
    }

    pub fn add_point(&mut self, id: PointId) -> EngineResult<()> {
        if self.closed {
            return Err(EngineError::ShapeClosed);
        }
        if self.points.contains(&id) {
            return Err(EngineError::DuplicatePoint(id));
        }
        self.points.push(id);
        Ok(())
    }

    /// Remove the point if present. A closed shape left with fewer than
    /// three vertices reopens.
    pub fn remove_point(&mut self, id: PointId) -> bool {
        let Some(pos) = self.points.iter().position(|p| *p == id) else {
            return false;
        };
        self.points.remove(pos);
        if self.points.len() < MIN_CLOSED_POINTS {
            self.reopen();
        }
        true
    }

    /// Open a closed shape again. Returns whether it was closed.
    pub fn reopen(&mut self) -> bool {
        std::mem::replace(&mut self.closed, false)
    }

    /// Close the ring. Fails without mutation on fewer than three points,
    /// and always for polylines.
    pub fn try_close(&mut self) -> bool {
        if self.kind == ShapeKind::Polyline || self.points.len() < MIN_CLOSED_POINTS {
            return false;
        }
        self.closed = true;
        true
    }

    /// Like [`Shape::try_close`] but reports why closing was refused.
    pub fn close(&mut self) -> EngineResult<()> {
        if self.closed {
            return Err(EngineError::ShapeClosed);
        }
        if self.try_close() {
            Ok(())
        } else {
            Err(EngineError::DegenerateShape {
                points: self.points.len(),
            })
        }
    }

    /// Resolve ids to points, skipping any that no longer exist.
    pub fn resolve<'a>(&'a self, store: &'a PointStore) -> impl Iterator<Item = Point> + 'a {
        self.points.iter().filter_map(move |id| match store.get(*id) {
            Ok(p) => Some(*p),
            Err(e) => {
                tracing::warn!(shape = %self.name, "{}", e);
                None
            }
        })
    }

    pub fn pixel_ring(&self, store: &PointStore) -> Vec<PixelPos> {
        self.resolve(store).map(|p| p.pixel).collect()
    }

    pub fn metric_ring(&self, store: &PointStore) -> Vec<MetricPos> {
        self.resolve(store).map(|p| p.real).collect()
    }

    /// Area in square meters; 0 for open or degenerate shapes.
    pub fn area(&self, store: &PointStore) -> f64 {
        if !self.closed || self.points.len() < MIN_CLOSED_POINTS {
            return 0.0;
        }
        geometry::polygon_area(&self.metric_ring(store))
    }

    /// Consecutive segments in drawing order, plus the closing segment when
    /// the shape is closed.
    pub fn perimeter_segments<'a>(
        &'a self,
        store: &'a PointStore,
    ) -> impl Iterator<Item = Segment> + 'a {
        let resolved: Vec<Point> = self.resolve(store).collect();
        let n = resolved.len();
        let edges = match n {
            0 | 1 => 0,
            _ if self.closed => n,
            _ => n - 1,
        };
        (0..edges).map(move |i| Segment::between(resolved[i], resolved[(i + 1) % n]))
    }

    /// Total length of all segments in meters.
    pub fn perimeter_m(&self, store: &PointStore) -> f64 {
        self.perimeter_segments(store)
            .fold(0.0, |acc, s| acc + s.length_m)
    }

    /// Even-odd containment of a pixel position; open shapes with at least
    /// three points are tested as if closed.
    pub fn contains_pixel(&self, pos: PixelPos, store: &PointStore) -> bool {
        self.kind == ShapeKind::Polygon
            && self.points.len() >= MIN_CLOSED_POINTS
            && geometry::point_in_polygon(pos, &self.pixel_ring(store))
    }

    /// Label anchor for the area text.
    pub fn centroid(&self, store: &PointStore) -> Option<PixelPos> {
        geometry::centroid(&self.pixel_ring(store))
    }
}
