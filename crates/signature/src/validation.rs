use std::fmt;

use serde_json::Number;
use thiserror::Error;

use crate::constants::DEFAULT_PRESSURE;
use crate::options::StrokeOptions;
use crate::point::Point;
use crate::types::{NumberSpelling, PointRecord, Stroke, StrokeRecord};

/// Where in the input a problem was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLocation {
    pub stroke: usize,
    pub point: Option<usize>,
}

impl fmt::Display for InputLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.point {
            Some(point) => write!(f, "stroke {}, point {}", self.stroke, point),
            None => write!(f, "stroke {}", self.stroke),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid input: missing `{field}` at {at}")]
    InvalidInput { field: &'static str, at: InputLocation },
    #[error("Invalid option `{field}` at {at}: {reason}")]
    InvalidOption {
        field: &'static str,
        at: InputLocation,
        reason: &'static str,
    },
    #[error("Signature data must be a list of strokes")]
    NotAList,
}

/// Convert capture records into validated strokes.
///
/// Every record is checked before any stroke is returned, so callers never
/// run geometry over a partially valid signature.
pub fn strokes_from_records(records: Vec<StrokeRecord>) -> Result<Vec<Stroke>, ValidationError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| stroke_from_record(index, record))
        .collect()
}

/// Validate one stroke record
pub fn stroke_from_record(index: usize, record: StrokeRecord) -> Result<Stroke, ValidationError> {
    let at = InputLocation {
        stroke: index,
        point: None,
    };

    let records = record.points.ok_or(ValidationError::InvalidInput {
        field: "points",
        at,
    })?;

    let defaults = StrokeOptions::default();
    let options = StrokeOptions {
        pen_color: record.pen_color.unwrap_or(defaults.pen_color),
        dot_size: record.dot_size.as_ref().map_or(defaults.dot_size, number_value),
        min_width: record.min_width.unwrap_or(defaults.min_width),
        max_width: record.max_width.unwrap_or(defaults.max_width),
        velocity_filter_weight: record
            .velocity_filter_weight
            .unwrap_or(defaults.velocity_filter_weight),
        composite_operation: record
            .composite_operation
            .unwrap_or(defaults.composite_operation),
    };
    validate_options(&options, at)?;

    let points = records
        .iter()
        .enumerate()
        .map(|(point_index, point)| {
            point_from_record(
                point,
                InputLocation {
                    stroke: index,
                    point: Some(point_index),
                },
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let first = records.first();
    let spelling = NumberSpelling {
        x_integer: first.and_then(|p| p.x.as_ref()).is_some_and(is_integer),
        y_integer: first.and_then(|p| p.y.as_ref()).is_some_and(is_integer),
        dot_size_integer: record.dot_size.as_ref().is_some_and(is_integer),
    };

    Ok(Stroke {
        points,
        options,
        spelling,
    })
}

fn number_value(number: &Number) -> f64 {
    // Only fails for arbitrary-precision numbers; NaN is then caught as non-finite
    number.as_f64().unwrap_or(f64::NAN)
}

fn is_integer(number: &Number) -> bool {
    number.is_i64() || number.is_u64()
}

fn point_from_record(record: &PointRecord, at: InputLocation) -> Result<Point, ValidationError> {
    let x = record
        .x
        .as_ref()
        .map(number_value)
        .ok_or(ValidationError::InvalidInput { field: "x", at })?;
    let y = record
        .y
        .as_ref()
        .map(number_value)
        .ok_or(ValidationError::InvalidInput { field: "y", at })?;
    let time = record
        .time
        .ok_or(ValidationError::InvalidInput { field: "time", at })?;

    Ok(Point {
        x,
        y,
        pressure: record.pressure.unwrap_or(DEFAULT_PRESSURE),
        // Capture clocks report whole milliseconds; fractional parts are dropped
        time: time as i64,
    })
}

/// Check that stroke options lie in the domain the fitter assumes
pub fn validate_options(options: &StrokeOptions, at: InputLocation) -> Result<(), ValidationError> {
    let numeric = [
        ("dotSize", options.dot_size),
        ("minWidth", options.min_width),
        ("maxWidth", options.max_width),
        ("velocityFilterWeight", options.velocity_filter_weight),
    ];
    for (field, value) in numeric {
        if !value.is_finite() {
            return Err(ValidationError::InvalidOption {
                field,
                at,
                reason: "must be a finite number",
            });
        }
        if value < 0.0 {
            return Err(ValidationError::InvalidOption {
                field,
                at,
                reason: "must not be negative",
            });
        }
    }

    if options.min_width > options.max_width {
        return Err(ValidationError::InvalidOption {
            field: "minWidth",
            at,
            reason: "must not exceed maxWidth",
        });
    }

    let weight = options.velocity_filter_weight;
    if weight <= 0.0 || weight >= 1.0 {
        return Err(ValidationError::InvalidOption {
            field: "velocityFilterWeight",
            at,
            reason: "must be strictly between 0 and 1",
        });
    }

    Ok(())
}
