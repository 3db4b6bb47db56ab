//! Session state enums - drawing modes, pointer gestures and click results.
//!
//! ## Construction States
//!
//! ```text
//! Idle     -> Building     (click places the first point of the active shape)
//! Building -> Building     (click places another point)
//! Building -> Idle         (click within closing tolerance of the first point,
//!                           3+ points: shape closes, a fresh active shape spawns)
//! Any      -> Idle         (reset, or abandoning the shape)
//! ```

use crate::geometry::PixelPos;
use crate::point_store::PointId;
use crate::shape::ShapeKind;
use serde::Serialize;

/// What a plain click does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum DrawingMode {
    /// Place points and close polygons on their first point
    #[default]
    Polygon,
    /// Place points of an open measured line
    Polyline,
    /// Close the open polygon under the cursor
    Fill,
}

impl DrawingMode {
    /// Kind of shape new points go into in this mode.
    pub fn shape_kind(&self) -> ShapeKind {
        match self {
            Self::Polygon | Self::Fill => ShapeKind::Polygon,
            Self::Polyline => ShapeKind::Polyline,
        }
    }
}

/// Construction progress of the active shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstructionState {
    /// Active shape has no points
    Idle,
    /// Active shape is open with at least one point
    Building {
        /// Number of placed points
        points: usize,
        /// First point; clicking near it closes a polygon
        anchor: PointId,
    },
}

impl ConstructionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_building(&self) -> bool {
        matches!(self, Self::Building { .. })
    }

    /// True once enough points exist for the closing gesture.
    pub fn can_close(&self) -> bool {
        matches!(self, Self::Building { points, .. } if *points >= crate::constants::MIN_CLOSED_POINTS)
    }
}

/// Pointer gesture in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerState {
    /// No gesture
    #[default]
    Idle,

    /// Modifier-drag rectangle selection
    DragSelecting {
        /// Where the drag started
        start: PixelPos,
        /// Current pointer position
        current: PixelPos,
    },
}

impl PointerState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_drag_selecting(&self) -> bool {
        matches!(self, Self::DragSelecting { .. })
    }

    /// Start rectangle selection
    pub fn start_drag_select(&mut self, start: PixelPos) {
        *self = Self::DragSelecting {
            start,
            current: start,
        };
    }

    /// Update the rectangle's moving corner
    pub fn set_drag_current(&mut self, current: PixelPos) {
        if let Self::DragSelecting { current: c, .. } = self {
            *c = current;
        }
    }

    /// Both corners of the selection rectangle, if selecting
    pub fn drag_rect(&self) -> Option<(PixelPos, PixelPos)> {
        match self {
            Self::DragSelecting { start, current } => Some((*start, *current)),
            _ => None,
        }
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}

/// Result of a click on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum ClickOutcome {
    /// A new point was appended to a shape
    Placed { point: PointId, shape: usize },
    /// The active polygon closed on its first point
    Closed { shape: usize, area_m2: f64 },
    /// Fill mode closed the polygon under the cursor
    Filled { shape: usize, area_m2: f64 },
    /// Modifier click flipped a point's selection
    SelectionToggled { point: PointId, selected: bool },
    /// Nothing changed
    Ignored,
}

impl ClickOutcome {
    /// Area of the shape closed by this click, if any
    pub fn closed_area(&self) -> Option<f64> {
        match self {
            Self::Closed { area_m2, .. } | Self::Filled { area_m2, .. } => Some(*area_m2),
            _ => None,
        }
    }
}
