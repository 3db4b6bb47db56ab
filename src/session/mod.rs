//! Drawing session - the single owner of all engine state.
//!
//! The host constructs a [`DrawingSession`], feeds it pointer and keyboard
//! events one at a time, and reads its state back for rendering. Every
//! operation runs to completion synchronously; failures leave state
//! unchanged and are reported through return values.
//!
//! ## Modules
//!
//! - `state` - Drawing modes, construction/pointer state machines, click outcomes
//! - `construction` - Point placement, closing, fill and the live guide segment
//! - `selection` - Point selection by click or drag, deletion with shape repair
//! - `view` - Serializable snapshot of everything a renderer needs

mod construction;
mod selection;
mod state;
mod view;

pub use construction::GuideSegment;
pub use state::{ClickOutcome, ConstructionState, DrawingMode, PointerState};
pub use view::{SessionView, ShapeSummary, ShapeView};

use crate::config::DrawingConfig;
use crate::error::{EngineError, EngineResult};
use crate::point_store::{PointId, PointStore};
use crate::shape::{Shape, ShapeColor};
use crate::transform::{CoordinateTransform, GridPosition};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeSet;

pub struct DrawingSession {
    config: DrawingConfig,
    transform: CoordinateTransform,
    points: PointStore,
    shapes: Vec<Shape>,
    /// Shape receiving new points
    active: Option<usize>,
    selection: BTreeSet<PointId>,
    mode: DrawingMode,
    pointer: PointerState,
    /// Last snapped pointer position
    cursor: Option<GridPosition>,
    /// Name applied to the next shape that closes
    pending_name: Option<String>,
    show_dimensions: bool,
    rng: StdRng,
}

impl DrawingSession {
    pub fn new(config: DrawingConfig) -> Self {
        let rng = match config.color_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut session = Self {
            transform: CoordinateTransform::new(&config),
            config,
            points: PointStore::new(),
            shapes: Vec::new(),
            active: None,
            selection: BTreeSet::new(),
            mode: DrawingMode::default(),
            pointer: PointerState::default(),
            cursor: None,
            pending_name: None,
            show_dimensions: true,
            rng,
        };
        session.spawn_shape();
        session
    }

    /// Clear points, shapes, selection and the id counter, then start a
    /// fresh empty shape. The grid scale and mode are kept.
    pub fn reset(&mut self) {
        self.points.clear();
        self.shapes.clear();
        self.selection.clear();
        self.active = None;
        self.pointer.reset();
        self.pending_name = None;
        self.spawn_shape();
        tracing::debug!("Session reset");
    }

    // ------------------------------------------------------------------------
    // Grid scale
    // ------------------------------------------------------------------------

    /// Set the grid cell size from direct input. Out-of-range sizes are
    /// rejected and nothing moves. Returns whether the size changed.
    pub fn rescale_grid(&mut self, cell_size: f64) -> EngineResult<bool> {
        let changed = self.transform.set_cell_size(cell_size).inspect_err(|e| {
            tracing::warn!("Rejected grid rescale: {}", e);
        })?;
        if changed {
            self.reproject();
        }
        Ok(changed)
    }

    /// Wheel zoom by whole notches; clamps at the bounds.
    pub fn zoom_grid(&mut self, notches: i32) -> bool {
        let changed = self.transform.zoom(notches);
        if changed {
            self.reproject();
        }
        changed
    }

    fn reproject(&mut self) {
        self.points.rescale(&self.transform);
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.snapped = self.transform.metric_to_grid(cursor.real);
        }
        if !self.pointer.is_idle() {
            self.pointer.reset();
        }
        tracing::debug!(
            cell_size = self.transform.cell_size(),
            points = self.points.len(),
            "Points reprojected"
        );
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    /// Switch the click behavior. Leaving for a different shape kind
    /// abandons the active shape; its points stay where they are.
    pub fn set_mode(&mut self, mode: DrawingMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        if mode != DrawingMode::Fill {
            let kind = mode.shape_kind();
            let keep_active = match self.active_shape_mut() {
                Some(shape) if shape.is_empty() => {
                    shape.kind = kind;
                    true
                }
                Some(shape) => shape.kind == kind && !shape.is_closed(),
                None => false,
            };
            if !keep_active {
                self.spawn_shape();
            }
        }
        tracing::debug!(?mode, "Drawing mode changed");
    }

    /// Name for the next shape that closes; blank clears it.
    pub fn set_pending_name(&mut self, name: Option<String>) {
        self.pending_name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
    }

    pub fn set_show_dimensions(&mut self, show: bool) {
        self.show_dimensions = show;
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &DrawingConfig {
        &self.config
    }

    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    pub fn points(&self) -> &PointStore {
        &self.points
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, index: usize) -> EngineResult<&Shape> {
        self.shapes
            .get(index)
            .ok_or(EngineError::ShapeNotFound(index))
    }

    pub fn active_shape_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_shape(&self) -> Option<&Shape> {
        self.active.and_then(|i| self.shapes.get(i))
    }

    fn active_shape_mut(&mut self) -> Option<&mut Shape> {
        self.active.and_then(|i| self.shapes.get_mut(i))
    }

    pub fn mode(&self) -> DrawingMode {
        self.mode
    }

    pub fn pointer_state(&self) -> PointerState {
        self.pointer
    }

    pub fn cursor(&self) -> Option<GridPosition> {
        self.cursor
    }

    pub fn pending_name(&self) -> Option<&str> {
        self.pending_name.as_deref()
    }

    pub fn show_dimensions(&self) -> bool {
        self.show_dimensions
    }

    pub fn construction_state(&self) -> ConstructionState {
        match self.active_shape() {
            Some(shape) if !shape.is_closed() => match shape.first_point() {
                Some(anchor) => ConstructionState::Building {
                    points: shape.len(),
                    anchor,
                },
                None => ConstructionState::Idle,
            },
            _ => ConstructionState::Idle,
        }
    }

    /// Area of one shape in square meters; 0 unless closed.
    pub fn shape_area(&self, index: usize) -> EngineResult<f64> {
        Ok(self.shape(index)?.area(&self.points))
    }

    /// Sum of the areas of all closed shapes.
    pub fn total_area(&self) -> f64 {
        self.shapes
            .iter()
            .filter(|s| s.is_closed())
            .map(|s| s.area(&self.points))
            .fold(0.0, |acc, a| acc + a)
    }

    // ------------------------------------------------------------------------
    // Shape bookkeeping
    // ------------------------------------------------------------------------

    /// Abandon the active shape and start a new one. An active shape with
    /// no points is reused instead.
    pub fn start_new_shape(&mut self) -> usize {
        let kind = self.mode.shape_kind();
        if let Some(index) = self.active {
            if let Some(shape) = self.shapes.get_mut(index) {
                if shape.is_empty() {
                    shape.kind = kind;
                    return index;
                }
            }
        }
        self.spawn_shape()
    }

    fn spawn_shape(&mut self) -> usize {
        let shape = Shape::new(self.mode.shape_kind(), ShapeColor::random(&mut self.rng));
        self.shapes.push(shape);
        let index = self.shapes.len() - 1;
        self.active = Some(index);
        tracing::debug!(shape = index, "Active shape created");
        index
    }

    /// Make `index` the active shape, dropping an untouched empty active
    /// shape at the end of the list.
    fn activate(&mut self, index: usize) {
        if let Some(current) = self.active {
            if current != index
                && current + 1 == self.shapes.len()
                && self.shapes[current].is_empty()
            {
                self.shapes.pop();
            }
        }
        self.active = Some(index);
        tracing::debug!(shape = index, "Shape reactivated");
    }
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::new(DrawingConfig::default())
    }
}
