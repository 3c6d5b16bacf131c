//! SVG serialization and data URI encoding
//!
//! The text produced here is a compatibility surface: embedding consumers
//! compare it byte for byte, so attribute order, spacing and number
//! formatting must not drift.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::constants::DATA_URI_PREFIX;
use crate::render::{DrawCommand, PathDocument};

const SVG_NAMESPACES: &str =
    r#"xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink""#;

impl PathDocument {
    /// Serialize to an SVG document.
    ///
    /// Curve coordinates and widths are written with three decimals. Dot
    /// radius and center keep their integer or float spelling, see [`Scalar`](crate::render::Scalar).
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg {SVG_NAMESPACES} viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
            w = self.width,
            h = self.height,
        );

        for command in &self.commands {
            svg.push_str(&command_to_svg(command));
        }

        svg.push_str("</svg>");
        svg
    }
}

fn command_to_svg(command: &DrawCommand) -> String {
    match command {
        DrawCommand::Curve {
            start,
            control1,
            control2,
            end,
            stroke_width,
            color,
        } => format!(
            r#"<path d="M {:.3},{:.3} C {:.3},{:.3} {:.3},{:.3} {:.3},{:.3}" stroke-width="{:.3}" stroke="{}" fill="none" stroke-linecap="round"></path>"#,
            start.x,
            start.y,
            control1.x,
            control1.y,
            control2.x,
            control2.y,
            end.x,
            end.y,
            stroke_width,
            escape_attribute(color),
        ),
        DrawCommand::Dot {
            cx,
            cy,
            radius,
            fill,
        } => format!(
            r#"<circle r="{}" cx="{}" cy="{}" fill="{}"></circle>"#,
            radius,
            cx,
            cy,
            escape_attribute(fill),
        ),
    }
}

/// Escape a caller-supplied color for use inside a double-quoted attribute
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Encode a document as a `data:image/svg+xml;base64,` URI
pub fn encode(document: &PathDocument) -> String {
    let svg = document.to_svg();
    format!("{DATA_URI_PREFIX}{}", STANDARD.encode(svg.as_bytes()))
}
