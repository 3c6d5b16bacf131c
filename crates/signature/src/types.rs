use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::options::StrokeOptions;
use crate::point::Point;

/// One pen-down to pen-up sequence of samples
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Samples in capture order. They are never re-sorted.
    pub points: Vec<Point>,
    pub options: StrokeOptions,
    /// Whether the capture record wrote the dot numbers as JSON integers
    #[serde(default)]
    pub spelling: NumberSpelling,
}

/// JSON integer/float spelling of the numbers a dot is drawn from.
///
/// Existing consumers print dot attributes exactly as the capture widget
/// wrote them: `50` stays `50`, `50.0` stays `50.0`. Strokes built in code
/// default to floats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberSpelling {
    pub x_integer: bool,
    pub y_integer: bool,
    pub dot_size_integer: bool,
}

impl Stroke {
    /// Create a stroke with default options
    pub fn new(points: Vec<Point>) -> Self {
        Self::with_options(points, StrokeOptions::default())
    }

    /// Create a stroke with explicit options
    pub fn with_options(points: Vec<Point>, options: StrokeOptions) -> Self {
        Self {
            points,
            options,
            spelling: NumberSpelling::default(),
        }
    }
}

/// A fitted cubic segment with the widths at each end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierSegment {
    pub start: Point,
    /// Control point leaving `start`
    pub control1: Point,
    /// Control point arriving at `end`
    pub control2: Point,
    pub end: Point,
    pub start_width: f64,
    pub end_width: f64,
}

/// Stroke record as produced by the capture widget (camelCase JSON)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeRecord {
    pub points: Option<Vec<PointRecord>>,
    pub pen_color: Option<String>,
    pub dot_size: Option<Number>,
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub velocity_filter_weight: Option<f64>,
    pub composite_operation: Option<String>,
}

/// Point record as produced by the capture widget
///
/// Required fields are optional here so that a missing one can be reported
/// by name instead of as a generic decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PointRecord {
    pub x: Option<Number>,
    pub y: Option<Number>,
    pub time: Option<f64>,
    pub pressure: Option<f64>,
}
