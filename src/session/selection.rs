//! Point selection and deletion.

use super::DrawingSession;
use crate::error::{EngineError, EngineResult};
use crate::geometry::PixelPos;
use crate::point_store::PointId;
use std::collections::BTreeSet;

impl DrawingSession {
    pub fn selection(&self) -> &BTreeSet<PointId> {
        &self.selection
    }

    pub fn is_selected(&self, id: PointId) -> bool {
        self.selection.contains(&id)
    }

    /// Flip one point's membership. Returns whether it is now selected.
    pub fn toggle_selection(&mut self, id: PointId) -> EngineResult<bool> {
        if !self.points.contains(id) {
            let err = EngineError::PointNotFound(id);
            tracing::warn!("Selection toggle ignored: {}", err);
            return Err(err);
        }
        let selected = if self.selection.remove(&id) {
            false
        } else {
            self.selection.insert(id);
            true
        };
        tracing::debug!(point_id = id, selected, "Selection toggled");
        Ok(selected)
    }

    /// Toggle the point under `pos`, if any.
    pub fn toggle_selection_at(&mut self, pos: PixelPos) -> Option<(PointId, bool)> {
        let id = self.point_at(pos)?;
        self.toggle_selection(id).ok().map(|selected| (id, selected))
    }

    pub fn select_all(&mut self) {
        self.selection.extend(self.points.iter().map(|p| p.id));
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Begin a modifier-drag selection rectangle.
    pub fn begin_drag_select(&mut self, pos: PixelPos) {
        self.pointer.start_drag_select(pos);
    }

    pub fn update_drag_select(&mut self, pos: PixelPos) {
        self.pointer.set_drag_current(pos);
    }

    /// Finish the drag, adding every point inside the rectangle (bounds
    /// inclusive) to the selection. Returns how many points were added.
    pub fn end_drag_select(&mut self, pos: PixelPos) -> usize {
        self.pointer.set_drag_current(pos);
        let Some((start, end)) = self.pointer.drag_rect() else {
            return 0;
        };
        self.pointer.reset();

        let added = self
            .points
            .points_in_rect(start, end)
            .into_iter()
            .filter(|id| self.selection.insert(*id))
            .count();
        tracing::debug!(added, total = self.selection.len(), "Drag selection finished");
        added
    }

    /// The selection rectangle being dragged, if any.
    pub fn selection_rect(&self) -> Option<(PixelPos, PixelPos)> {
        self.pointer.drag_rect()
    }

    /// Delete all selected points. Each point is removed from every shape
    /// first, then from the store; shapes left with fewer than three points
    /// reopen, and the last one reopened becomes the active shape.
    /// Returns the number of points deleted.
    pub fn delete_selected(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }

        let ids = std::mem::take(&mut self.selection);
        let mut reopened = None;
        let mut deleted = 0;
        for id in ids {
            for (index, shape) in self.shapes.iter_mut().enumerate() {
                let was_closed = shape.is_closed();
                if shape.remove_point(id) && was_closed && !shape.is_closed() {
                    reopened = Some(index);
                }
            }
            match self.points.delete(id) {
                Ok(_) => deleted += 1,
                Err(e) => tracing::warn!("Stale selection entry: {}", e),
            }
        }

        if let Some(index) = reopened {
            self.activate(index);
        }
        tracing::debug!(deleted, ?reopened, "Selected points deleted");
        deleted
    }
}
