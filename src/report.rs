//! Plain-text measurement report and label formatting.

use crate::geometry::MetricPos;
use crate::session::{DrawingSession, ShapeSummary};
use std::fmt;

/// Segment length label, e.g. `1.25m`.
pub fn format_length(meters: f64) -> String {
    format!("{meters:.2}m")
}

/// Area label, e.g. `3.50 m²`.
pub fn format_area(square_meters: f64) -> String {
    format!("{square_meters:.2} m²")
}

/// Cursor readout, e.g. `1.20m, 0.40m`.
pub fn format_coordinates(pos: MetricPos) -> String {
    format!("{}, {}", format_length(pos.x), format_length(pos.y))
}

/// Shape list with areas and the running total.
#[derive(Clone, Debug)]
pub struct MeasurementReport {
    pub rows: Vec<ShapeSummary>,
    pub total_area_m2: f64,
}

impl MeasurementReport {
    pub fn from_session(session: &DrawingSession) -> Self {
        Self {
            rows: session.shape_summaries(),
            total_area_m2: session.total_area(),
        }
    }
}

impl fmt::Display for MeasurementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let marker = if row.active { "*" } else { " " };
            writeln!(f, "{marker} {}: {}", row.name, format_area(row.area_m2))?;
        }
        write!(f, "Total area: {}", format_area(self.total_area_m2))
    }
}

impl DrawingSession {
    /// Cursor position in meters for the status bar.
    pub fn coordinates_readout(&self) -> Option<String> {
        self.cursor().map(|c| format_coordinates(c.real))
    }
}
