//! Drawing configuration.
//!
//! Loaded from a JSON file (or string) with every field optional; missing
//! fields fall back to the values in [`crate::constants`].

use crate::constants::{
    AXIS_TOLERANCE_PX, CLOSING_TOLERANCE_M, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CELL_SIZE,
    HIT_RADIUS_PX, MAX_CELL_SIZE, MIN_CELL_SIZE, UNIT_METERS, ZOOM_STEP,
};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    /// Grid cell size at session start, in pixels
    pub default_cell_size: f64,
    pub min_cell_size: f64,
    pub max_cell_size: f64,
    /// Meters represented by one grid cell
    pub unit_meters: f64,
    pub closing_tolerance_m: f64,
    pub hit_radius_px: f64,
    pub axis_tolerance_px: f64,
    /// Cell size change per wheel notch
    pub zoom_step: f64,
    /// Seed for shape colors; random when absent
    pub color_seed: Option<u64>,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_cell_size: DEFAULT_CELL_SIZE,
            min_cell_size: MIN_CELL_SIZE,
            max_cell_size: MAX_CELL_SIZE,
            unit_meters: UNIT_METERS,
            closing_tolerance_m: CLOSING_TOLERANCE_M,
            hit_radius_px: HIT_RADIUS_PX,
            axis_tolerance_px: AXIS_TOLERANCE_PX,
            zoom_step: ZOOM_STEP,
            color_seed: None,
        }
    }
}

impl DrawingConfig {
    /// Parse and validate a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), "Loaded drawing config");
        Ok(config)
    }

    /// Load the config at the default location, falling back to defaults
    /// when the file is missing or broken.
    pub fn load_or_default() -> Self {
        let Some(path) = default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("min_cell_size", self.min_cell_size),
            ("max_cell_size", self.max_cell_size),
            ("unit_meters", self.unit_meters),
            ("closing_tolerance_m", self.closing_tolerance_m),
            ("hit_radius_px", self.hit_radius_px),
            ("zoom_step", self.zoom_step),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be positive, got {value}").into());
            }
        }
        if !self.axis_tolerance_px.is_finite() || self.axis_tolerance_px < 0.0 {
            return Err(format!(
                "axis_tolerance_px must not be negative, got {}",
                self.axis_tolerance_px
            )
            .into());
        }
        if self.min_cell_size > self.max_cell_size {
            return Err(format!(
                "min_cell_size {} exceeds max_cell_size {}",
                self.min_cell_size, self.max_cell_size
            )
            .into());
        }
        if !(self.min_cell_size..=self.max_cell_size).contains(&self.default_cell_size) {
            return Err(format!(
                "default_cell_size {} outside [{}, {}]",
                self.default_cell_size, self.min_cell_size, self.max_cell_size
            )
            .into());
        }
        Ok(())
    }
}

/// Platform location of the config file, e.g. `~/.config/gridsketch/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
