//! Per-stroke rendering options

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COMPOSITE_OPERATION, DEFAULT_DOT_SIZE, DEFAULT_MAX_WIDTH, DEFAULT_MIN_WIDTH,
    DEFAULT_PEN_COLOR, DEFAULT_VELOCITY_FILTER_WEIGHT,
};

/// Rendering parameters for one stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrokeOptions {
    /// CSS color of the pen
    pub pen_color: String,
    /// Radius of a single-point stroke; 0 selects the width midpoint
    pub dot_size: f64,
    /// Lower bound for the velocity-derived width
    pub min_width: f64,
    /// Upper bound for the velocity-derived width
    pub max_width: f64,
    /// Weight of the newest velocity sample in the low-pass filter
    pub velocity_filter_weight: f64,
    /// Canvas composite operation. Carried as metadata only.
    pub composite_operation: String,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self {
            pen_color: DEFAULT_PEN_COLOR.to_string(),
            dot_size: DEFAULT_DOT_SIZE,
            min_width: DEFAULT_MIN_WIDTH,
            max_width: DEFAULT_MAX_WIDTH,
            velocity_filter_weight: DEFAULT_VELOCITY_FILTER_WEIGHT,
            composite_operation: DEFAULT_COMPOSITE_OPERATION.to_string(),
        }
    }
}

impl StrokeOptions {
    /// Midpoint of the min/max width range
    pub fn mid_width(&self) -> f64 {
        (self.min_width + self.max_width) / 2.0
    }

    /// Radius used when a stroke collapses to a single point
    pub fn dot_radius(&self) -> f64 {
        if self.dot_size != 0.0 {
            self.dot_size
        } else {
            self.mid_width()
        }
    }

    /// Width for a filtered velocity. Faster motion draws thinner lines.
    pub fn width_for_velocity(&self, velocity: f64) -> f64 {
        (self.max_width / (velocity + 1.0)).max(self.min_width)
    }
}
