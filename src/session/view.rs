//! Read-only snapshot of session state for renderers.

use super::DrawingSession;
use super::construction::GuideSegment;
use super::state::DrawingMode;
use crate::geometry::PixelPos;
use crate::point_store::{Point, PointId};
use crate::shape::{Segment, Shape, ShapeKind};
use serde::Serialize;

/// Everything needed to draw one shape and its labels.
#[derive(Clone, Debug, Serialize)]
pub struct ShapeView {
    pub index: usize,
    pub name: String,
    pub kind: ShapeKind,
    pub closed: bool,
    pub active: bool,
    /// CSS color string
    pub color: String,
    pub points: Vec<Point>,
    pub segments: Vec<Segment>,
    pub area_m2: f64,
    /// Where the area label goes; closed shapes only
    pub label_anchor: Option<PixelPos>,
}

/// One row of the shape list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShapeSummary {
    pub index: usize,
    pub name: String,
    pub area_m2: f64,
    pub closed: bool,
    pub active: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct SessionView {
    pub cell_size: f64,
    pub mode: DrawingMode,
    pub show_dimensions: bool,
    pub active_shape: Option<usize>,
    pub selection: Vec<PointId>,
    pub shapes: Vec<ShapeView>,
    pub guide: Option<GuideSegment>,
    pub selection_rect: Option<(PixelPos, PixelPos)>,
    pub total_area_m2: f64,
}

impl DrawingSession {
    /// Snapshot for the renderer. Cheap enough to rebuild on every change.
    pub fn view(&self) -> SessionView {
        SessionView {
            cell_size: self.transform.cell_size(),
            mode: self.mode,
            show_dimensions: self.show_dimensions,
            active_shape: self.active,
            selection: self.selection.iter().copied().collect(),
            shapes: self
                .shapes
                .iter()
                .enumerate()
                .map(|(index, shape)| self.shape_view(index, shape))
                .collect(),
            guide: self.guide(),
            selection_rect: self.selection_rect(),
            total_area_m2: self.total_area(),
        }
    }

    fn shape_view(&self, index: usize, shape: &Shape) -> ShapeView {
        ShapeView {
            index,
            name: shape.name.clone(),
            kind: shape.kind,
            closed: shape.is_closed(),
            active: self.active == Some(index),
            color: shape.color.to_css(),
            points: shape.resolve(&self.points).collect(),
            segments: shape.perimeter_segments(&self.points).collect(),
            area_m2: shape.area(&self.points),
            label_anchor: if shape.is_closed() {
                shape.centroid(&self.points)
            } else {
                None
            },
        }
    }

    /// Shape list rows for every shape with points. Unnamed shapes get
    /// their auto name.
    pub fn shape_summaries(&self) -> Vec<ShapeSummary> {
        self.shapes
            .iter()
            .enumerate()
            .filter(|(_, shape)| !shape.is_empty())
            .map(|(index, shape)| ShapeSummary {
                index,
                name: if shape.name.is_empty() {
                    Shape::auto_name(index)
                } else {
                    shape.name.clone()
                },
                area_m2: shape.area(&self.points),
                closed: shape.is_closed(),
                active: self.active == Some(index),
            })
            .collect()
    }
}
