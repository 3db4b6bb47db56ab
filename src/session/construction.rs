//! Shape construction - placing points, closing shapes, fill and the guide line.

use super::DrawingSession;
use super::state::{ClickOutcome, DrawingMode};
use crate::constants::MIN_CLOSED_POINTS;
use crate::error::{EngineError, EngineResult};
use crate::geometry::{self, PixelPos};
use crate::point_store::PointId;
use crate::shape::{Shape, ShapeKind};
use crate::transform::GridPosition;
use serde::Serialize;

/// The dashed segment from the last placed point to the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GuideSegment {
    pub start: PixelPos,
    pub end: PixelPos,
    pub length_m: f64,
    /// Within tolerance of horizontal or vertical
    pub axis_aligned: bool,
    /// End was pulled onto the first point; a click here closes the shape
    pub closes_shape: bool,
}

impl DrawingSession {
    /// Handle a click at a canvas position. With the selection modifier held
    /// the click toggles the point under the cursor instead of drawing.
    pub fn click(&mut self, pos: PixelPos, modifier: bool) -> ClickOutcome {
        if modifier {
            return match self.toggle_selection_at(pos) {
                Some((point, selected)) => ClickOutcome::SelectionToggled { point, selected },
                None => ClickOutcome::Ignored,
            };
        }

        let grid = self.transform.screen_to_grid(pos);
        self.cursor = Some(grid);
        match self.mode {
            DrawingMode::Polygon => match self.closable_active(&grid) {
                Some(index) => match self.close_active(index) {
                    Ok(outcome) => outcome,
                    Err(_) => self.place_point(grid),
                },
                None => self.place_point(grid),
            },
            DrawingMode::Polyline => self.place_point(grid),
            DrawingMode::Fill => self.fill_at(grid.snapped),
        }
    }

    /// Track the pointer for the guide segment and drag selection.
    pub fn pointer_moved(&mut self, pos: PixelPos) -> GridPosition {
        let grid = self.transform.screen_to_grid(pos);
        self.cursor = Some(grid);
        self.pointer.set_drag_current(pos);
        grid
    }

    /// Pointer left the canvas.
    pub fn pointer_left(&mut self) {
        self.cursor = None;
    }

    /// Append a point at a grid position to the active shape, starting a new
    /// shape if there is none or it is closed.
    pub fn place_point(&mut self, grid: GridPosition) -> ClickOutcome {
        let active = self.active;
        let index = match active {
            Some(i) if self.shapes.get(i).is_some_and(|s| !s.is_closed()) => i,
            _ => self.spawn_shape(),
        };

        let id = self.points.create(grid.snapped, grid.real);
        if let Err(e) = self.shapes[index].add_point(id) {
            tracing::warn!(shape = index, "Point placement rejected: {}", e);
            let _ = self.points.delete(id);
            return ClickOutcome::Ignored;
        }

        tracing::debug!(
            point_id = id,
            shape = index,
            x = grid.snapped.x,
            y = grid.snapped.y,
            "Point placed"
        );
        ClickOutcome::Placed { point: id, shape: index }
    }

    /// Close the active polygon if it can close. A no-op otherwise.
    pub fn close_active_shape(&mut self) -> ClickOutcome {
        let Some(index) = self.active else {
            return ClickOutcome::Ignored;
        };
        match self.close_active(index) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(shape = index, "Close refused: {}", e);
                ClickOutcome::Ignored
            }
        }
    }

    /// Finish the active shape: polygons close, polylines are named and
    /// left open. Either way a fresh active shape follows. Returns the
    /// finished shape, or `None` if it was too short to finish.
    pub fn finish_shape(&mut self) -> Option<usize> {
        let index = self.active?;
        let (kind, len) = self.shapes.get(index).map(|s| (s.kind, s.len()))?;
        match kind {
            ShapeKind::Polygon => match self.close_active_shape() {
                ClickOutcome::Closed { shape, .. } => Some(shape),
                _ => None,
            },
            ShapeKind::Polyline if len >= 2 => {
                self.finalize_name(index);
                tracing::debug!(shape = index, "Polyline finished");
                self.spawn_shape();
                Some(index)
            }
            ShapeKind::Polyline => None,
        }
    }

    /// The active shape index if a click at `grid` would close it.
    fn closable_active(&self, grid: &GridPosition) -> Option<usize> {
        let index = self.active?;
        let shape = self.shapes.get(index)?;
        if shape.is_closed() || shape.kind != ShapeKind::Polygon || shape.len() < MIN_CLOSED_POINTS {
            return None;
        }
        let anchor = self.points.get(shape.first_point()?).ok()?;
        (geometry::distance(anchor.real, grid.real) < self.config.closing_tolerance_m)
            .then_some(index)
    }

    fn close_active(&mut self, index: usize) -> EngineResult<ClickOutcome> {
        self.shapes
            .get_mut(index)
            .ok_or(EngineError::ShapeNotFound(index))?
            .close()?;
        self.finalize_name(index);
        let area_m2 = self.shapes[index].area(&self.points);
        tracing::debug!(
            shape = index,
            name = %self.shapes[index].name,
            area_m2,
            "Shape closed"
        );
        self.spawn_shape();
        Ok(ClickOutcome::Closed {
            shape: index,
            area_m2,
        })
    }

    /// Close the topmost open polygon containing `pos`.
    fn fill_at(&mut self, pos: PixelPos) -> ClickOutcome {
        let Some(index) = self.shape_at(pos) else {
            return ClickOutcome::Ignored;
        };
        if let Err(e) = self.shapes[index].close() {
            tracing::debug!(shape = index, "Fill refused: {}", e);
            return ClickOutcome::Ignored;
        }

        self.finalize_name(index);
        let area_m2 = self.shapes[index].area(&self.points);
        tracing::debug!(shape = index, area_m2, "Shape filled");
        if self.active == Some(index) {
            self.spawn_shape();
        }
        ClickOutcome::Filled {
            shape: index,
            area_m2,
        }
    }

    /// A pending user name wins; otherwise keep an existing name or fall back
    /// to the auto name.
    fn finalize_name(&mut self, index: usize) {
        let shape = &mut self.shapes[index];
        if let Some(name) = self.pending_name.take() {
            shape.name = name;
        } else if shape.name.is_empty() {
            shape.name = Shape::auto_name(index);
        }
    }

    /// Live guide from the last point of the active shape to the cursor.
    pub fn guide(&self) -> Option<GuideSegment> {
        let cursor = self.cursor?;
        let shape = self.active_shape().filter(|s| !s.is_closed())?;
        let last = self.points.get(shape.last_point()?).ok()?;

        let mut end = cursor;
        let mut closes_shape = false;
        if let Some(index) = self.closable_active(&cursor) {
            if let Some(anchor) = self.shapes[index]
                .first_point()
                .and_then(|id| self.points.get(id).ok())
            {
                end = GridPosition {
                    snapped: anchor.pixel,
                    real: anchor.real,
                };
                closes_shape = true;
            }
        }

        Some(GuideSegment {
            start: last.pixel,
            end: end.snapped,
            length_m: geometry::distance(last.real, end.real),
            axis_aligned: geometry::is_axis_aligned(
                last.pixel,
                end.snapped,
                self.config.axis_tolerance_px,
            ),
            closes_shape,
        })
    }

    /// The point a click at `pos` would hit, if any.
    pub fn point_at(&self, pos: PixelPos) -> Option<PointId> {
        self.points.point_at(pos, self.config.hit_radius_px)
    }

    /// Topmost shape containing `pos`.
    pub fn shape_at(&self, pos: PixelPos) -> Option<usize> {
        self.shapes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, shape)| shape.contains_pixel(pos, &self.points))
            .map(|(i, _)| i)
    }
}
