//! Path renderer: strokes to an ordered list of draw commands
//!
//! Each stroke is fed through a freshly reset [`CurveFitter`]. Strokes with
//! several samples become curve commands, a stroke with a single sample
//! becomes a dot, and an empty stroke contributes nothing.

use std::fmt;

use serde::{Deserialize, Serialize};
use signature_config::{CanvasConfig, RenderMode};
use tracing::debug;

use crate::constants::{DEFAULT_PEN_COLOR, STROKE_WIDTH_SCALE};
use crate::fitter::CurveFitter;
use crate::point::Point;
use crate::types::{BezierSegment, Stroke};

/// A coordinate pair in document space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A number printed the way the capture widget's JSON spelled it.
///
/// Integers print bare (`50`). Floats always carry a fraction or an
/// exponent (`2.0`, `63.16668701171875`, `1e+16`, `1.5e-05`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Integer(i64),
    Float(f64),
}

impl Scalar {
    /// Wrap `value`, keeping it an integer only when it was written as one
    pub fn spelled(value: f64, integer: bool) -> Self {
        if integer && value.fract() == 0.0 && value.abs() < 9.007_199_254_740_992e15 {
            Self::Integer(value as i64)
        } else {
            Self::Float(value)
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Self::Integer(i) => i as f64,
            Self::Float(v) => v,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = match *self {
            Self::Integer(i) => return write!(f, "{i}"),
            Self::Float(v) => v,
        };

        if v.is_nan() {
            return f.write_str("nan");
        }
        if v.is_infinite() {
            return f.write_str(if v > 0.0 { "inf" } else { "-inf" });
        }

        let magnitude = v.abs();
        if magnitude == 0.0 || (1e-4..1e16).contains(&magnitude) {
            let text = v.to_string();
            if text.contains('.') {
                f.write_str(&text)
            } else {
                write!(f, "{text}.0")
            }
        } else {
            // `{:e}` gives `1.5e-5`; the exponent is signed and at least two digits wide
            let text = format!("{v:e}");
            let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            write!(f, "{mantissa}e{sign}{digits:0>2}")
        }
    }
}

/// A single drawing instruction
///
/// Values are kept at full precision; rounding happens when the document
/// is serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DrawCommand {
    /// Cubic curve stroked with a fixed width and round caps
    Curve {
        start: Vec2,
        /// First control point in output order
        control1: Vec2,
        /// Second control point in output order
        control2: Vec2,
        end: Vec2,
        stroke_width: f64,
        color: String,
    },
    /// Filled circle for a single-sample stroke
    Dot {
        cx: Scalar,
        cy: Scalar,
        radius: Scalar,
        fill: String,
    },
}

/// Rendered signature prior to text serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathDocument {
    pub width: u32,
    pub height: u32,
    /// Commands in stroke order, then fitting order within a stroke
    pub commands: Vec<DrawCommand>,
}

impl PathDocument {
    /// Create an empty document with the given canvas bounds
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of curve commands
    pub fn curve_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Curve { .. }))
            .count()
    }

    /// Number of dot commands
    pub fn dot_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Dot { .. }))
            .count()
    }
}

/// Renders strokes into a [`PathDocument`] for one canvas configuration
#[derive(Debug, Clone, Default)]
pub struct PathRenderer {
    config: CanvasConfig,
}

impl PathRenderer {
    pub fn new(config: CanvasConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Render every stroke in order
    pub fn render(&self, strokes: &[Stroke]) -> PathDocument {
        let mut document = PathDocument::new(self.config.width, self.config.height);
        let mut fitter = CurveFitter::default();

        for stroke in strokes {
            let options = &stroke.options;
            fitter.reset(options);

            match stroke.points.as_slice() {
                [] => {}
                [point] => {
                    let spelling = stroke.spelling;
                    // A configured dot size keeps its spelling; the midpoint width is a quotient
                    let radius = if options.dot_size != 0.0 {
                        Scalar::spelled(options.dot_size, spelling.dot_size_integer)
                    } else {
                        Scalar::Float(options.dot_radius())
                    };
                    document.commands.push(DrawCommand::Dot {
                        cx: Scalar::spelled(point.x, spelling.x_integer),
                        cy: Scalar::spelled(point.y, spelling.y_integer),
                        radius,
                        fill: self.color_for(stroke).to_string(),
                    });
                }
                points => {
                    let color = self.color_for(stroke);
                    for point in points {
                        if let Some(segment) = fitter.add_point(*point, options) {
                            document.commands.push(self.curve_command(&segment, color));
                        }
                    }
                }
            }
        }

        debug!(
            "PathRenderer::render: {} strokes -> {} curves, {} dots ({}x{})",
            strokes.len(),
            document.curve_count(),
            document.dot_count(),
            document.width,
            document.height
        );

        document
    }

    fn color_for<'a>(&self, stroke: &'a Stroke) -> &'a str {
        match self.config.render_mode {
            RenderMode::Reference => DEFAULT_PEN_COLOR,
            RenderMode::PenColor => &stroke.options.pen_color,
        }
    }

    fn curve_command(&self, segment: &BezierSegment, color: &str) -> DrawCommand {
        let to_vec2 = |p: &Point| Vec2::new(p.x, p.y);

        // Existing consumers expect the end-side control point first
        let (control1, control2) = match self.config.render_mode {
            RenderMode::Reference => (to_vec2(&segment.control2), to_vec2(&segment.control1)),
            RenderMode::PenColor => (to_vec2(&segment.control1), to_vec2(&segment.control2)),
        };

        DrawCommand::Curve {
            start: to_vec2(&segment.start),
            control1,
            control2,
            end: to_vec2(&segment.end),
            stroke_width: segment.end_width * STROKE_WIDTH_SCALE,
            color: color.to_string(),
        }
    }
}

/// Render strokes onto a canvas of the given size using the reference mode
pub fn render(strokes: &[Stroke], width: u32, height: u32) -> PathDocument {
    PathRenderer::new(CanvasConfig::new(width, height)).render(strokes)
}
