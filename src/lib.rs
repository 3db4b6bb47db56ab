//! Grid-snapped vector geometry engine.
//!
//! Builds named polygons and open polylines on a snapped grid and measures
//! them in real-world units: segment lengths, polygon areas, containment,
//! hit testing and area selection. Rendering and input wiring live in the
//! host; the host owns a [`DrawingSession`], feeds it events and reads back
//! a [`SessionView`] to paint.

pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod point_store;
pub mod report;
pub mod session;
pub mod shape;
pub mod spatial_index;
pub mod transform;

pub use config::DrawingConfig;
pub use error::{ConfigError, EngineError, EngineResult};
pub use geometry::{MetricPos, PixelPos};
pub use point_store::{Point, PointId, PointStore};
pub use session::{ClickOutcome, DrawingMode, DrawingSession, SessionView};
pub use shape::{Segment, Shape, ShapeKind};
pub use transform::{CanvasContext, CoordinateTransform, GridPosition};
