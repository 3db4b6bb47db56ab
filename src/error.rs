//! Error types for engine operations
//!
//! Every engine error is absorbed at the session boundary: operations that
//! fail leave state untouched and report the reason instead of panicking.

use crate::point_store::PointId;
use thiserror::Error;

/// Errors raised by geometry and session operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A stale or unknown point id was referenced
    #[error("Point {0} not found")]
    PointNotFound(PointId),

    /// A shape index outside the shape list
    #[error("Shape {0} not found")]
    ShapeNotFound(usize),

    /// Mutation attempted on a closed shape
    #[error("Shape is closed")]
    ShapeClosed,

    /// The point already belongs to the shape
    #[error("Point {0} is already part of the shape")]
    DuplicatePoint(PointId),

    /// Grid cell size outside configured bounds
    #[error("Cell size {value} out of range [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },

    /// Shape has too few points for the requested operation
    #[error("Degenerate shape: {points} points (need at least 3)")]
    DegenerateShape { points: usize },
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Values parsed but inconsistent
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl From<String> for ConfigError {
    fn from(s: String) -> Self {
        ConfigError::Invalid(s)
    }
}

impl From<&str> for ConfigError {
    fn from(s: &str) -> Self {
        ConfigError::Invalid(s.to_string())
    }
}
