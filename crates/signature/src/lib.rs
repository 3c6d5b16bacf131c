//! Signature path conversion - pen strokes to a smooth SVG data URI
//!
//! This crate turns captured pen input into a portable vector image:
//! - [`point::Point`] - A timestamped sample with distance/velocity helpers
//! - [`options::StrokeOptions`] - Per-stroke widths, colors and filter weight
//! - [`validation`] - Boundary checks for capture records
//! - [`fitter::CurveFitter`] - Sliding-window cubic fitting with dynamic width
//! - [`render::PathRenderer`] - Strokes to an ordered [`render::PathDocument`]
//! - [`encode`] - SVG text and `data:image/svg+xml;base64,` encoding
//!
//! Conversion is pure: each call builds its own fitter, so identical input
//! always yields identical output and calls may run concurrently.

pub mod constants;
pub mod encode;
pub mod fitter;
pub mod options;
pub mod point;
pub mod render;
pub mod types;
pub mod validation;

pub use constants::*;
pub use encode::*;
pub use fitter::*;
pub use options::*;
pub use point::*;
pub use render::*;
pub use types::*;
pub use validation::*;

pub use signature_config::{CanvasConfig, RenderMode};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Error type for converting external signature data.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Malformed signature data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a JSON list of stroke records into validated strokes
pub fn parse_strokes(json: &str) -> Result<Vec<Stroke>, SignatureError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    strokes_from_value(&value)
}

/// Convert an already-decoded JSON value into validated strokes
pub fn strokes_from_value(value: &serde_json::Value) -> Result<Vec<Stroke>, SignatureError> {
    if !value.is_array() {
        return Err(ValidationError::NotAList.into());
    }
    let records = Vec::<StrokeRecord>::deserialize(value)?;
    Ok(strokes_from_records(records)?)
}

/// Convert strokes to a data URI on the default 400x200 canvas
pub fn convert(strokes: &[Stroke]) -> String {
    convert_with(strokes, &CanvasConfig::default())
}

/// Convert strokes to a data URI for the given canvas
pub fn convert_with(strokes: &[Stroke], config: &CanvasConfig) -> String {
    let document = PathRenderer::new(config.clone()).render(strokes);
    encode(&document)
}

/// Parse, validate and convert a JSON signature in one step
pub fn convert_json(json: &str, config: &CanvasConfig) -> Result<String, SignatureError> {
    let strokes = parse_strokes(json)?;
    Ok(convert_with(&strokes, config))
}

/// Lenient conversion for display templates.
///
/// Returns an empty string when there is nothing to show: `null`, a value
/// that is not a list, an empty list, or data that fails validation. The
/// canvas comes from [`CanvasConfig::from_env`].
pub fn signature_base64(value: &serde_json::Value) -> String {
    match value.as_array() {
        Some(strokes) if !strokes.is_empty() => {}
        _ => return String::new(),
    }

    match strokes_from_value(value) {
        Ok(strokes) => convert_with(&strokes, &CanvasConfig::from_env()),
        Err(e) => {
            warn!("signature_base64: discarding invalid signature data: {}", e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    const REFERENCE_JSON: &str = r#"[{"penColor": "black", "dotSize": 0, "minWidth": 0.5, "maxWidth": 2.5, "velocityFilterWeight": 0.7, "compositeOperation": "source-over", "points": [{"time": 1735421102034, "x": 86, "y": 63.16668701171875, "pressure": 0.5}, {"time": 1735421102128, "x": 93, "y": 67.16668701171875, "pressure": 0.5}, {"time": 1735421102145, "x": 103, "y": 72.16668701171875, "pressure": 0.5}, {"time": 1735421102161, "x": 119, "y": 82.16668701171875, "pressure": 0.5}, {"time": 1735421102178, "x": 128, "y": 88.16668701171875, "pressure": 0.5}, {"time": 1735421102194, "x": 134, "y": 91.16668701171875, "pressure": 0.5}]}]"#;

    const REFERENCE_URI: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHhtbG5zOnhsaW5rPSJodHRwOi8vd3d3LnczLm9yZy8xOTk5L3hsaW5rIiB2aWV3Qm94PSIwIDAgNDAwIDIwMCIgd2lkdGg9IjQwMCIgaGVpZ2h0PSIyMDAiPjxwYXRoIGQ9Ik0gODYuMDAwLDYzLjE2NyBDIDg5LjQzOSw2NS4yODEgODkuNTAwLDY1LjE2NyA5My4wMDAsNjcuMTY3IiBzdHJva2Utd2lkdGg9IjUuMzA2IiBzdHJva2U9ImJsYWNrIiBmaWxsPSJub25lIiBzdHJva2UtbGluZWNhcD0icm91bmQiPjwvcGF0aD48cGF0aCBkPSJNIDkzLjAwMCw2Ny4xNjcgQyA5OC4xNjMsNjkuMzc2IDk3LjkzOSw2OS43ODEgMTAzLjAwMCw3Mi4xNjciIHN0cm9rZS13aWR0aD0iMy44MDUiIHN0cm9rZT0iYmxhY2siIGZpbGw9Im5vbmUiIHN0cm9rZS1saW5lY2FwPSJyb3VuZCI+PC9wYXRoPjxwYXRoIGQ9Ik0gMTAzLjAwMCw3Mi4xNjcgQyAxMTEuMDU1LDc3LjA4MiAxMTEuMTYzLDc2Ljg3NiAxMTkuMDAwLDgyLjE2NyIgc3Ryb2tlLXdpZHRoPSIyLjg1NyIgc3Ryb2tlPSJibGFjayIgZmlsbD0ibm9uZSIgc3Ryb2tlLWxpbmVjYXA9InJvdW5kIj48L3BhdGg+PHBhdGggZD0iTSAxMTkuMDAwLDgyLjE2NyBDIDEyMy4zNzEsODUuMzg5IDEyMy41NTUsODUuMDgyIDEyOC4wMDAsODguMTY3IiBzdHJva2Utd2lkdGg9IjMuMjQwIiBzdHJva2U9ImJsYWNrIiBmaWxsPSJub25lIiBzdHJva2UtbGluZWNhcD0icm91bmQiPjwvcGF0aD48L3N2Zz4=";

    #[test]
    fn test_reference_signature_is_byte_identical() {
        let uri = convert_json(REFERENCE_JSON, &CanvasConfig::default()).unwrap();
        assert_eq!(uri, REFERENCE_URI);
    }

    #[test]
    fn test_reference_document_shape() {
        let strokes = parse_strokes(REFERENCE_JSON).unwrap();
        let document = render(&strokes, 400, 200);
        assert_eq!(document.curve_count(), 4);
        assert_eq!(document.dot_count(), 0);

        let svg = document.to_svg();
        assert!(svg.contains(r#"stroke-width="3.805""#));
        assert!(svg.contains(r#"stroke-width="2.857""#));
        assert!(svg.contains(r#"stroke-width="3.240""#));
    }

    #[test]
    fn test_pen_color_mode_reorders_controls() {
        let strokes: Vec<Stroke> = parse_strokes(REFERENCE_JSON)
            .unwrap()
            .into_iter()
            .map(|mut s| {
                s.options.pen_color = "navy".to_string();
                s
            })
            .collect();
        let config = CanvasConfig::default().with_render_mode(RenderMode::PenColor);
        let svg = PathRenderer::new(config).render(&strokes).to_svg();
        assert!(svg.contains(
            r#"<path d="M 86.000,63.167 C 89.500,65.167 89.439,65.281 93.000,67.167" stroke-width="5.306" stroke="navy""#
        ));
    }

    #[test]
    fn test_single_point_dot() {
        let json = r#"[{"points": [{"x": 50, "y": 50, "time": 0}]}]"#;
        let uri = convert_json(json, &CanvasConfig::default()).unwrap();
        let strokes = parse_strokes(json).unwrap();
        let svg = render(&strokes, 400, 200).to_svg();
        assert_eq!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 400 200" width="400" height="200"><circle r="1.5" cx="50" cy="50" fill="black"></circle></svg>"#
        );
        assert_eq!(uri, encode(&render(&strokes, 400, 200)));
    }

    #[test]
    fn test_midpoint_dot_radius_is_float() {
        let json = r#"[{"minWidth": 1, "maxWidth": 3, "points": [{"x": 50, "y": 50, "time": 0}]}]"#;
        let svg = render(&parse_strokes(json).unwrap(), 400, 200).to_svg();
        assert!(svg.contains(r#"<circle r="2.0" cx="50" cy="50" fill="black">"#));
    }

    #[test]
    fn test_dot_numbers_keep_json_spelling() {
        let json = r#"[{"dotSize": 3, "points": [{"x": 50.0, "y": 12.5, "time": 0}]},
                       {"dotSize": 1.5, "points": [{"x": 7, "y": 8.0, "time": 0}]}]"#;
        let svg = render(&parse_strokes(json).unwrap(), 400, 200).to_svg();
        assert!(svg.contains(r#"<circle r="3" cx="50.0" cy="12.5" fill="black">"#));
        assert!(svg.contains(r#"<circle r="1.5" cx="7" cy="8.0" fill="black">"#));
    }

    #[test]
    fn test_extreme_timestamps_do_not_panic() {
        let json = r#"[{"points": [{"x": 0, "y": 0, "time": -1e19}, {"x": 5, "y": 5, "time": 0}, {"x": 10, "y": 0, "time": 1e19}, {"x": 15, "y": 5, "time": 1e19}]}]"#;
        let strokes = parse_strokes(json).unwrap();
        assert_eq!(strokes[0].points[0].time, i64::MIN);
        assert_eq!(strokes[0].points[2].time, i64::MAX);

        let document = render(&strokes, 400, 200);
        assert_eq!(document.curve_count(), 2);
        assert!(convert_json(json, &CanvasConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_signature() {
        let uri = convert(&[]);
        assert_eq!(
            uri,
            "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHhtbG5zOnhsaW5rPSJodHRwOi8vd3d3LnczLm9yZy8xOTk5L3hsaW5rIiB2aWV3Qm94PSIwIDAgNDAwIDIwMCIgd2lkdGg9IjQwMCIgaGVpZ2h0PSIyMDAiPjwvc3ZnPg=="
        );
    }

    #[test]
    fn test_canvas_size() {
        let svg = PathRenderer::new(CanvasConfig::new(640, 320)).render(&[]).to_svg();
        assert!(svg.contains(r#"viewBox="0 0 640 320" width="640" height="320""#));
    }

    #[test]
    fn test_missing_field_is_reported() {
        let err = parse_strokes(r#"[{"points": [{"x": 1, "y": 2}]}]"#).unwrap_err();
        assert!(matches!(
            err,
            SignatureError::Validation(ValidationError::InvalidInput { field: "time", .. })
        ));
        assert!(err.to_string().contains("time"));
    }

    #[test]
    fn test_not_a_list() {
        let err = parse_strokes(r#"{"points": []}"#).unwrap_err();
        assert!(matches!(
            err,
            SignatureError::Validation(ValidationError::NotAList)
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_strokes("[{").unwrap_err();
        assert!(matches!(err, SignatureError::Json(_)));

        let err = parse_strokes(r#"[{"points": [{"x": "left", "y": 2, "time": 0}]}]"#).unwrap_err();
        assert!(matches!(err, SignatureError::Json(_)));
    }

    #[test]
    fn test_signature_base64() {
        assert_eq!(signature_base64(&serde_json::Value::Null), "");
        assert_eq!(signature_base64(&json!("not a list")), "");
        assert_eq!(signature_base64(&json!([])), "");
        assert_eq!(signature_base64(&json!([{"points": [{"x": 1}]}])), "");

        let value: serde_json::Value = serde_json::from_str(REFERENCE_JSON).unwrap();
        assert_eq!(signature_base64(&value), REFERENCE_URI);
    }

    fn arb_strokes() -> impl Strategy<Value = Vec<Stroke>> {
        let point = (0.0f64..400.0, 0.0f64..200.0, 0i64..40);
        let stroke = prop::collection::vec(point, 0..20).prop_map(|samples| {
            let mut time = 0i64;
            let points = samples
                .into_iter()
                .map(|(x, y, dt)| {
                    time += dt;
                    Point::new(x, y, time)
                })
                .collect();
            Stroke::new(points)
        });
        prop::collection::vec(stroke, 0..6)
    }

    proptest! {
        #[test]
        fn conversion_is_deterministic(strokes in arb_strokes()) {
            prop_assert_eq!(convert(&strokes), convert(&strokes));
        }

        #[test]
        fn command_counts_match_strokes(strokes in arb_strokes()) {
            let document = render(&strokes, 400, 200);
            let dots = strokes.iter().filter(|s| s.points.len() == 1).count();
            let curves: usize = strokes.iter().map(|s| s.points.len().saturating_sub(2)).sum();
            prop_assert_eq!(document.dot_count(), dots);
            prop_assert_eq!(document.curve_count(), curves);
        }
    }
}
