//! Coordinate conversion between canvas pixels, grid-snapped pixels and meters.
//!
//! The metric scale follows the grid: one cell is always `unit_meters` long,
//! so changing the cell size zooms the drawing without moving it in the
//! real world.

use crate::config::DrawingConfig;
use crate::error::{EngineError, EngineResult};
use crate::geometry::{MetricPos, PixelPos};
use serde::Serialize;

/// Context needed to bring raw pointer positions into canvas space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasContext {
    /// Client-space position of the canvas top-left corner
    pub origin: PixelPos,
    /// Device-to-canvas scale factor per axis
    pub scale: (f64, f64),
}

impl Default for CanvasContext {
    fn default() -> Self {
        Self {
            origin: PixelPos::default(),
            scale: (1.0, 1.0),
        }
    }
}

impl CanvasContext {
    #[inline]
    pub fn new(origin: PixelPos, scale: (f64, f64)) -> Self {
        Self { origin, scale }
    }

    /// Convert a client position to canvas pixels
    #[inline]
    pub fn to_canvas(&self, client: PixelPos) -> PixelPos {
        PixelPos::new(
            (client.x - self.origin.x) * self.scale.0,
            (client.y - self.origin.y) * self.scale.1,
        )
    }
}

/// A pointer position snapped to the grid, in both coordinate spaces
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GridPosition {
    pub snapped: PixelPos,
    pub real: MetricPos,
}

/// Owns the grid cell size and maps between pixel and metric space.
#[derive(Clone, Debug)]
pub struct CoordinateTransform {
    cell_size: f64,
    min_cell_size: f64,
    max_cell_size: f64,
    unit_meters: f64,
    zoom_step: f64,
}

impl CoordinateTransform {
    pub fn new(config: &DrawingConfig) -> Self {
        Self {
            cell_size: round_tenth(config.default_cell_size),
            min_cell_size: config.min_cell_size,
            max_cell_size: config.max_cell_size,
            unit_meters: config.unit_meters,
            zoom_step: config.zoom_step,
        }
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    #[inline]
    pub fn bounds(&self) -> (f64, f64) {
        (self.min_cell_size, self.max_cell_size)
    }

    #[inline]
    pub fn unit_meters(&self) -> f64 {
        self.unit_meters
    }

    /// Snap a canvas position to the nearest grid intersection (half rounds up).
    pub fn screen_to_grid(&self, pos: PixelPos) -> GridPosition {
        let snapped = PixelPos::new(self.snap(pos.x), self.snap(pos.y));
        GridPosition {
            snapped,
            real: self.pixel_to_metric(snapped),
        }
    }

    /// Grid intersection for a metric position at the current cell size.
    pub fn metric_to_grid(&self, pos: MetricPos) -> PixelPos {
        let px = self.metric_to_pixel(pos);
        PixelPos::new(self.snap(px.x), self.snap(px.y))
    }

    #[inline]
    fn snap(&self, v: f64) -> f64 {
        (v / self.cell_size + 0.5).floor() * self.cell_size
    }

    #[inline]
    pub fn pixel_to_metric(&self, pos: PixelPos) -> MetricPos {
        MetricPos::new(
            pos.x / self.cell_size * self.unit_meters,
            pos.y / self.cell_size * self.unit_meters,
        )
    }

    #[inline]
    pub fn metric_to_pixel(&self, pos: MetricPos) -> PixelPos {
        PixelPos::new(
            pos.x / self.unit_meters * self.cell_size,
            pos.y / self.unit_meters * self.cell_size,
        )
    }

    /// Length of a pixel segment in meters at the current scale.
    #[inline]
    pub fn length_m(&self, a: PixelPos, b: PixelPos) -> f64 {
        a.distance_to(&b) / self.cell_size * self.unit_meters
    }

    /// Set the cell size from direct configuration.
    ///
    /// Out-of-range values are rejected and the previous size kept.
    /// Returns `Ok(false)` when the size is unchanged.
    pub fn set_cell_size(&mut self, size: f64) -> EngineResult<bool> {
        if !size.is_finite() || size < self.min_cell_size || size > self.max_cell_size {
            return Err(EngineError::OutOfRange {
                value: size,
                min: self.min_cell_size,
                max: self.max_cell_size,
            });
        }
        let size = round_tenth(size).clamp(self.min_cell_size, self.max_cell_size);
        Ok(self.apply(size))
    }

    /// Set the cell size, clamping into bounds. Returns true if it changed.
    pub fn clamp_cell_size(&mut self, size: f64) -> bool {
        if !size.is_finite() {
            return false;
        }
        let size = round_tenth(size.clamp(self.min_cell_size, self.max_cell_size));
        self.apply(size)
    }

    /// Wheel zoom: round to a multiple of the zoom step, move by `notches`
    /// steps, clamp. Returns true if the size changed.
    pub fn zoom(&mut self, notches: i32) -> bool {
        let base = (self.cell_size / self.zoom_step).round() * self.zoom_step;
        self.clamp_cell_size(base + f64::from(notches) * self.zoom_step)
    }

    fn apply(&mut self, size: f64) -> bool {
        if (size - self.cell_size).abs() < f64::EPSILON {
            return false;
        }
        tracing::debug!(from = self.cell_size, to = size, "Grid cell size changed");
        self.cell_size = size;
        true
    }
}

impl Default for CoordinateTransform {
    fn default() -> Self {
        Self::new(&DrawingConfig::default())
    }
}

/// Cell sizes carry one decimal digit.
#[inline]
fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
