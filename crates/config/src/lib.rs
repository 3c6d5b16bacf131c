//! Shared configuration for signature rendering
//!
//! This crate provides the single source of truth for the canvas dimensions
//! and the render mode used when turning strokes into a vector document.

use serde::{Deserialize, Serialize};

/// Default canvas width in pixels
pub const DEFAULT_WIDTH: u32 = 400;

/// Default canvas height in pixels
pub const DEFAULT_HEIGHT: u32 = 200;

/// Environment variable read by [`RenderMode::from_env`]
pub const RENDER_MODE_ENV: &str = "SIGNATURE_RENDER_MODE";

/// How stroke colors and control points are written into the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// Byte-compatible with existing consumers (default).
    /// Curves and dots are always black and control points are written
    /// end-side first.
    #[default]
    Reference,
    /// Curves and dots use the stroke's pen color and control points are
    /// written in geometric order (start-side first).
    PenColor,
}

impl RenderMode {
    /// Parse from environment variable SIGNATURE_RENDER_MODE
    pub fn from_env() -> Self {
        Self::from_var(std::env::var(RENDER_MODE_ENV).ok().as_deref())
    }

    /// Resolve an optional variable value; unset or unknown names fall back to
    /// [`RenderMode::Reference`]
    pub fn from_var(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }

    /// Parse a mode name (`reference` or `pen-color`)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reference" => Some(Self::Reference),
            "pen-color" | "pen_color" | "pencolor" => Some(Self::PenColor),
            _ => None,
        }
    }
}

/// Canvas configuration for a conversion call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Canvas width, used for both the viewBox and the width attribute
    pub width: u32,
    /// Canvas height, used for both the viewBox and the height attribute
    pub height: u32,
    /// Color and control-point convention
    #[serde(default)]
    pub render_mode: RenderMode,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            render_mode: RenderMode::default(),
        }
    }
}

impl CanvasConfig {
    /// Create a new canvas config with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            render_mode: RenderMode::default(),
        }
    }

    /// Default canvas with the render mode taken from the environment
    pub fn from_env() -> Self {
        Self::default().with_render_mode(RenderMode::from_env())
    }

    /// Return a copy with a different render mode
    pub fn with_render_mode(mut self, render_mode: RenderMode) -> Self {
        self.render_mode = render_mode;
        self
    }
}
